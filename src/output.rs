use crate::error::Result;
use crate::rating::RatingField;
use crate::types::{
    InspectionRecord, IntervalRow, OutlierRow, RankedRow, RecordRow, ScorePolicy, TrendRow,
};
use crate::util::{format_date, format_number, format_opt};
use crate::views::{AxisRange, IntervalAverage, Outlier, RankedBridge, TrendSeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

const BAR_WIDTH: usize = 40;

/// CSV with the same columns as the console table. Rows that inline a whole
/// record cannot go through `csv`'s serde path, which rejects flattened fields.
pub fn write_csv<T: Tabled>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(T::headers().iter().map(|h| h.as_bytes()))?;
    for r in rows {
        wtr.write_record(r.fields().iter().map(|f| f.as_bytes()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Write rows as JSON when the path ends in `.json`, CSV otherwise.
pub fn export<T: Serialize + Tabled>(path: &Path, rows: &[T]) -> Result<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        write_json(path, rows)?;
    } else {
        write_csv(path, rows)?;
    }
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Markdown table of at most `max_rows` rows, with a note when cut short.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)\n".to_string();
    }
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    let mut out = Table::new(slice).with(Style::markdown()).to_string();
    out.push('\n');
    if rows.len() > max_rows {
        out.push_str(&format!("({} of {} rows shown)\n", max_rows, rows.len()));
    }
    out
}

pub fn preview_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", render_table(rows, max_rows));
}

fn bar(value: f64, axis: AxisRange) -> String {
    let span = axis.max - axis.min;
    if span <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let frac = (axis.clamp(value) - axis.min) / span;
    "█".repeat((frac * BAR_WIDTH as f64).round() as usize)
}

/// Horizontal bars on a fixed axis; values beyond it are drawn at the edge.
pub fn render_bar_chart(rows: &[(String, f64)], axis: AxisRange) -> String {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!(
            "{:<width$} | {:<bar_width$} {}\n",
            label,
            bar(*value, axis),
            format_number(*value, 2),
            width = label_width,
            bar_width = BAR_WIDTH,
        ));
    }
    out.push_str(&format!(
        "{:<width$}   {}{:>w2$}\n",
        "",
        format_number(axis.min, 0),
        format_number(axis.max, 0),
        width = label_width,
        w2 = BAR_WIDTH,
    ));
    out
}

/// One line per point, marker positioned on the axis. Missing values print
/// as a gap.
pub fn render_line_chart(points: &[(NaiveDate, Option<f64>)], axis: AxisRange) -> String {
    let span = axis.max - axis.min;
    let mut out = String::new();
    for (date, value) in points {
        match value {
            Some(v) if span > 0.0 => {
                let frac = (axis.clamp(*v) - axis.min) / span;
                let pos = (frac * BAR_WIDTH as f64).round() as usize;
                out.push_str(&format!(
                    "{} |{}●{} {}\n",
                    date.format("%Y-%m-%d"),
                    "·".repeat(pos),
                    " ".repeat(BAR_WIDTH - pos),
                    format_number(*v, 1)
                ));
            }
            _ => out.push_str(&format!("{} |\n", date.format("%Y-%m-%d"))),
        }
    }
    out
}

/// Axis spanning the data, for series without a fixed scale such as scores.
pub fn fitted_axis(values: impl Iterator<Item = f64>) -> AxisRange {
    let max = values.fold(0.0_f64, f64::max);
    AxisRange {
        min: 0.0,
        max: if max > 0.0 { max } else { 1.0 },
    }
}

pub fn record_rows(table: &[InspectionRecord], policy: ScorePolicy) -> Vec<RecordRow> {
    table.iter().map(|r| RecordRow::new(r, policy)).collect()
}

pub fn ranked_rows(ranked: &[RankedBridge<'_>], policy: ScorePolicy) -> Vec<RankedRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, r)| RankedRow {
            rank: idx + 1,
            record: RecordRow::new(r.record, policy),
        })
        .collect()
}

pub fn trend_rows(series: &TrendSeries<'_>) -> Vec<TrendRow> {
    series
        .records()
        .iter()
        .map(|r| TrendRow {
            inspection_date: format_date(r.inspection_date),
            rating: format_opt(r.rating(series.field), 1),
            condition_score: format_opt(r.condition_score(series.policy), 1),
        })
        .collect()
}

pub fn interval_rows(averages: &[IntervalAverage]) -> Vec<IntervalRow> {
    averages
        .iter()
        .map(|a| IntervalRow {
            interval: a.label(),
            average_rating: format_number(a.mean, 2),
            inspections: a.count,
        })
        .collect()
}

pub fn outlier_rows(
    rows: &[Outlier<'_>],
    field: RatingField,
    policy: ScorePolicy,
) -> Vec<OutlierRow> {
    rows.iter()
        .map(|o| OutlierRow {
            record: RecordRow::new(o.record, policy),
            element: field.label().to_string(),
            rating: format_number(o.value, 1),
            z_score: format_opt(o.z_score, 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{AVERAGE_AXIS, RATING_AXIS};

    #[test]
    fn bars_are_clamped_to_the_axis() {
        let chart = render_bar_chart(
            &[("1960-1969".to_string(), 2.0), ("1970-1979".to_string(), 9.0)],
            AVERAGE_AXIS,
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert!(lines[1].ends_with("9.00"));
    }

    #[test]
    fn line_chart_leaves_gaps_for_missing_values() {
        let d = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
        let chart = render_line_chart(&[(d, Some(5.0)), (d, None)], RATING_AXIS);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0].matches('·').count(), BAR_WIDTH);
        assert_eq!(lines[1], "2001-02-03 |");
    }

    #[test]
    fn table_notes_truncation() {
        let rows = vec![
            IntervalRow {
                interval: "1960-1969".into(),
                average_rating: "1.00".into(),
                inspections: 1,
            };
            3
        ];
        let out = render_table(&rows, 2);
        assert!(out.contains("| Interval"));
        assert!(out.contains("(2 of 3 rows shown)"));
        assert_eq!(render_table::<IntervalRow>(&[], 2), "(no rows)\n");
    }

    #[test]
    fn export_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![IntervalRow {
            interval: "2020-2023".into(),
            average_rating: "2.50".into(),
            inspections: 4,
        }];
        let json = dir.path().join("out.json");
        export(&json, &rows).unwrap();
        let text = std::fs::read_to_string(&json).unwrap();
        assert!(text.contains("\"Interval\": \"2020-2023\""));

        let csv_path = dir.path().join("out.csv");
        export(&csv_path, &rows).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(text, "Interval,AverageRating,Inspections\n2020-2023,2.50,4\n");
    }

    fn inspection(id: &str, fl: f64) -> InspectionRecord {
        let mut ratings = [Some(1.0); crate::rating::RATING_COUNT];
        ratings[RatingField::Fl.index()] = Some(fl);
        ratings[RatingField::An.index()] = None;
        InspectionRecord {
            registration_number: id.to_string(),
            region: "Molde".to_string(),
            report_date: None,
            construction_date: None,
            inspection_date: NaiveDate::from_ymd_opt(2015, 6, 1),
            ratings,
        }
    }

    #[test]
    fn ranked_export_keeps_every_rating() {
        let record = inspection("15-0002", 4.0);
        let ranked = [RankedBridge {
            record: &record,
            score: 16.0,
        }];
        let rows = ranked_rows(&ranked, ScorePolicy::Partial);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].record.fl, "4.0");
        assert_eq!(rows[0].record.condition_score, "16.0");

        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("worst.csv");
        export(&csv_path, &rows).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Rank,registration_number,kommune,report_date,construction_date,\
             general_inspection_date,Fl,Sk,Eu,Mu,Le,Bæ,Is,Kb,Au,Be,Fu,Af,Up,An,condition_score"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,15-0002,Molde,,,2015-06-01,4.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,1.0,,16.0"
        );

        let json_path = dir.path().join("worst.json");
        export(&json_path, &rows).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value[0]["Rank"], 1);
        assert_eq!(value[0]["Bæ"], "1.0");
        assert_eq!(value[0]["An"], "");
    }

    #[test]
    fn outlier_rows_name_the_element_next_to_the_record() {
        let record = inspection("15-0003", 4.0);
        let found = [Outlier {
            record: &record,
            value: 4.0,
            z_score: Some(1.58),
        }];
        let rows = outlier_rows(&found, RatingField::Fl, ScorePolicy::Strict);
        assert_eq!(rows[0].element, "Fl");
        assert_eq!(rows[0].rating, "4.0");
        assert_eq!(rows[0].z_score, "1.58");
        assert_eq!(rows[0].record.sk, "1.0");
        // Strict scoring leaves a record with a blank rating unscored.
        assert_eq!(rows[0].record.condition_score, "");

        let table = render_table(&rows, 5);
        assert!(table.contains("| registration_number"));
        assert!(table.contains("| Element"));
        assert!(table.contains("| ZScore"));
    }

    #[test]
    fn fitted_axis_covers_the_largest_value() {
        assert_eq!(fitted_axis([3.0, 42.0].into_iter()).max, 42.0);
        assert_eq!(fitted_axis(std::iter::empty()).max, 1.0);
    }
}

// Console handlers, one per view. Each recomputes its view from the table
// it is given, prints it, and optionally exports the rows.
use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::LoadReport;
use crate::output::{
    self, export, fitted_axis, interval_rows, outlier_rows, preview_table, ranked_rows,
    record_rows, render_bar_chart, render_line_chart, trend_rows,
};
use crate::rating::RatingField;
use crate::types::InspectionRecord;
use crate::util::{format_date, format_int, format_number, format_opt};
use crate::views::{
    self, BridgeSelection, DateWindow, IntervalOutcome, IntervalSpec, OutlierOutcome,
    TrendOutcome, AVERAGE_AXIS,
};
use chrono::NaiveDate;
use std::path::Path;

pub fn print_load_report(report: &LoadReport) {
    println!(
        "Processing dataset... ({} rows read, {} skipped)",
        format_int(report.total_rows),
        format_int(report.skipped_rows)
    );
    if report.unparsed_dates > 0 {
        println!(
            "Note: {} date values could not be parsed and were left blank.",
            format_int(report.unparsed_dates)
        );
    }
    if report.incomplete_ratings > 0 {
        println!(
            "Note: {} inspections have one or more missing ratings.",
            format_int(report.incomplete_ratings)
        );
    }
    println!();
}

pub fn show_summary(
    table: &[InspectionRecord],
    config: &ReportConfig,
    export_to: Option<&Path>,
) -> Result<()> {
    let summary = views::summarize(table, config.score_policy);
    println!("Inspections:      {}", format_int(summary.total_records));
    println!("Bridges:          {}", format_int(summary.total_bridges));
    println!("Kommuner:         {}", format_int(summary.total_regions));
    println!("Scored:           {}", format_int(summary.scored_records));
    println!(
        "Inspected:        {} .. {}",
        format_date(summary.first_inspection),
        format_date(summary.last_inspection)
    );
    println!(
        "Avg. condition:   {}\n",
        format_opt(summary.avg_condition_score, 2)
    );
    if let Some(path) = export_to {
        output::write_json(path, &summary)?;
    }
    Ok(())
}

pub fn show_list(title: &str, values: &[String]) {
    println!("{} ({}):", title, format_int(values.len()));
    for v in values {
        println!("  {}", v);
    }
    println!();
}

pub fn show_raw(
    table: &[InspectionRecord],
    config: &ReportConfig,
    export_to: Option<&Path>,
) -> Result<()> {
    let rows = record_rows(table, config.score_policy);
    println!("Raw Data\n");
    preview_table(&rows, config.preview_rows);
    if let Some(path) = export_to {
        export(path, &rows)?;
    }
    Ok(())
}

pub fn show_worst(
    table: &[InspectionRecord],
    top: usize,
    config: &ReportConfig,
    export_to: Option<&Path>,
) -> Result<()> {
    let ranked = views::worst_bridges(table, top, config.score_policy);
    let rows = ranked_rows(&ranked, config.score_policy);
    println!("Worst Condition Bridges");
    println!("(Top {} by condition score, lower is better)\n", top);
    preview_table(&rows, top.max(1));
    if let Some(path) = export_to {
        export(path, &rows)?;
    }
    Ok(())
}

pub fn show_trend(
    table: &[InspectionRecord],
    bridge: &str,
    field: RatingField,
    config: &ReportConfig,
    export_to: Option<&Path>,
) -> Result<()> {
    let series = match views::bridge_trend(table, bridge, field, config.score_policy) {
        TrendOutcome::Series(series) => series,
        TrendOutcome::InsufficientHistory { rows } => {
            log::debug!("Bridge {} has {} dated inspections", bridge, rows);
            println!("Not enough historical data for trend analysis for this bridge.\n");
            return Ok(());
        }
    };

    println!("Trend for Bridge {} - Element {}\n", bridge, field);
    let ratings: Vec<_> = series.rating_points().collect();
    println!("{}", render_line_chart(&ratings, series.axis()));

    println!("Trend for Bridge {}\n", bridge);
    let scores: Vec<_> = series.score_points().map(|(d, s)| (d, Some(s))).collect();
    let axis = fitted_axis(series.score_points().map(|(_, s)| s));
    println!("{}", render_line_chart(&scores, axis));

    let rows = trend_rows(&series);
    preview_table(&rows, config.preview_rows);
    if let Some(path) = export_to {
        export(path, &rows)?;
    }
    Ok(())
}

pub fn show_intervals(
    table: &[InspectionRecord],
    field: RatingField,
    selection: &BridgeSelection,
    config: &ReportConfig,
    export_to: Option<&Path>,
) -> Result<()> {
    let spec = IntervalSpec {
        base_year: config.base_year,
        width: config.interval_years,
    };
    let averages = match views::interval_averages(table, field, selection, spec) {
        IntervalOutcome::Averages(averages) => averages,
        IntervalOutcome::NoData => {
            println!("No data available.\n");
            return Ok(());
        }
    };

    let mut title = format!("Average {} Rating Over Time", field);
    if let BridgeSelection::Bridge(id) = selection {
        title.push_str(&format!(" for Bridge {}", id));
    }
    println!("{}\n", title);
    let bars: Vec<(String, f64)> = averages.iter().map(|a| (a.label(), a.mean)).collect();
    println!("{}", render_bar_chart(&bars, AVERAGE_AXIS));

    let rows = interval_rows(&averages);
    preview_table(&rows, config.preview_rows);
    if let Some(path) = export_to {
        export(path, &rows)?;
    }
    Ok(())
}

pub fn show_outliers(
    table: &[InspectionRecord],
    field: RatingField,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    threshold: f64,
    config: &ReportConfig,
    export_to: Option<&Path>,
) -> Result<()> {
    let covering = DateWindow::covering(table);
    let window = match (from.or(covering.map(|w| w.start)), to.or(covering.map(|w| w.end))) {
        (Some(start), Some(end)) => DateWindow { start, end },
        _ => {
            println!("No data available for the selected date range.\n");
            return Ok(());
        }
    };

    match views::outliers(table, field, window, threshold) {
        OutlierOutcome::NoData => {
            println!("No data available for the selected date range.\n");
        }
        OutlierOutcome::NoOutliers { stats } => {
            log::debug!("{} ratings, mean {}, sd {:?}", stats.count, stats.mean, stats.std_dev);
            println!("No outlier bridges found for the selected criteria.\n");
        }
        OutlierOutcome::Found { stats, rows } => {
            println!(
                "Bridges with {} ratings outside {} standard deviations from the mean:",
                field,
                format_number(threshold, 1)
            );
            println!(
                "(mean {}, std. dev. {}, {} .. {})\n",
                format_number(stats.mean, 2),
                format_opt(stats.std_dev, 2),
                window.start,
                window.end
            );
            let rows = outlier_rows(&rows, field, config.score_policy);
            preview_table(&rows, config.preview_rows);
            if let Some(path) = export_to {
                export(path, &rows)?;
            }
        }
    }
    Ok(())
}

//! Derived views over the inspection table.
//!
//! Every function here is a pure function of the (already region-filtered)
//! table and the caller's selections. Nothing is cached between calls.

use crate::rating::RatingField;
use crate::types::{InspectionRecord, ScorePolicy, SummaryStats};
use crate::util::{average, sample_std_dev};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Y-axis range of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

/// Rating line charts use the full 0-5 grade scale.
pub const RATING_AXIS: AxisRange = AxisRange { min: 0.0, max: 5.0 };
/// Bar charts of interval averages.
pub const AVERAGE_AXIS: AxisRange = AxisRange { min: 0.0, max: 4.0 };

/// Keep rows whose region is in `regions`. An empty selection keeps all.
pub fn filter_regions(table: &[InspectionRecord], regions: &[String]) -> Vec<InspectionRecord> {
    if regions.is_empty() {
        return table.to_vec();
    }
    let wanted: HashSet<&str> = regions.iter().map(String::as_str).collect();
    table
        .iter()
        .filter(|r| wanted.contains(r.region.as_str()))
        .cloned()
        .collect()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Distinct regions in first-appearance order.
pub fn regions(table: &[InspectionRecord]) -> Vec<String> {
    distinct(table.iter().map(|r| r.region.as_str()))
}

/// Distinct bridge identifiers in first-appearance order.
pub fn bridges(table: &[InspectionRecord]) -> Vec<String> {
    distinct(table.iter().map(|r| r.registration_number.as_str()))
}

pub fn summarize(table: &[InspectionRecord], policy: ScorePolicy) -> SummaryStats {
    let scores: Vec<f64> = table
        .iter()
        .filter_map(|r| r.condition_score(policy))
        .collect();
    let dates = table.iter().filter_map(|r| r.inspection_date);
    SummaryStats {
        total_records: table.len(),
        total_bridges: bridges(table).len(),
        total_regions: regions(table).len(),
        scored_records: scores.len(),
        first_inspection: dates.clone().min(),
        last_inspection: dates.max(),
        avg_condition_score: average(&scores),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedBridge<'a> {
    pub record: &'a InspectionRecord,
    pub score: f64,
}

/// The `n` records with the highest (worst) condition score.
///
/// Unscored records are not eligible. Ties keep input order.
pub fn worst_bridges(
    table: &[InspectionRecord],
    n: usize,
    policy: ScorePolicy,
) -> Vec<RankedBridge<'_>> {
    let mut scored: Vec<RankedBridge<'_>> = table
        .iter()
        .filter_map(|record| {
            record
                .condition_score(policy)
                .map(|score| RankedBridge { record, score })
        })
        .collect();
    // `sort_by` is stable, which is what keeps ties in input order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(n);
    scored
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendOutcome<'a> {
    Series(TrendSeries<'a>),
    /// Fewer than two dated inspections for the bridge.
    InsufficientHistory { rows: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries<'a> {
    pub bridge: String,
    pub field: RatingField,
    pub policy: ScorePolicy,
    rows: Vec<&'a InspectionRecord>,
}

impl<'a> TrendSeries<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> &[&'a InspectionRecord] {
        &self.rows
    }

    /// `(inspection date, rating)` in date order. Missing ratings stay `None`.
    pub fn rating_points<'s>(&'s self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + 's {
        let field = self.field;
        let rows: &'s [&'s InspectionRecord] = &self.rows;
        rows.iter()
            .filter_map(move |r| r.inspection_date.map(|d| (d, r.rating(field))))
    }

    /// `(inspection date, condition score)` in date order; unscored rows are skipped.
    pub fn score_points<'s>(&'s self) -> impl Iterator<Item = (NaiveDate, f64)> + 's {
        let policy = self.policy;
        let rows: &'s [&'s InspectionRecord] = &self.rows;
        rows.iter().filter_map(move |r| {
            let date = r.inspection_date?;
            r.condition_score(policy).map(|s| (date, s))
        })
    }

    pub fn axis(&self) -> AxisRange {
        RATING_AXIS
    }
}

/// Inspections of one bridge in inspection-date order.
pub fn bridge_trend<'a>(
    table: &'a [InspectionRecord],
    bridge: &str,
    field: RatingField,
    policy: ScorePolicy,
) -> TrendOutcome<'a> {
    let mut rows: Vec<&InspectionRecord> = table
        .iter()
        .filter(|r| r.registration_number == bridge && r.inspection_date.is_some())
        .collect();
    if rows.len() < 2 {
        return TrendOutcome::InsufficientHistory { rows: rows.len() };
    }
    rows.sort_by_key(|r| r.inspection_date);
    TrendOutcome::Series(TrendSeries {
        bridge: bridge.to_string(),
        field,
        policy,
        rows,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeSelection {
    All,
    Bridge(String),
}

impl BridgeSelection {
    pub fn from_option(bridge: Option<String>) -> Self {
        bridge.map_or(BridgeSelection::All, BridgeSelection::Bridge)
    }

    fn matches(&self, record: &InspectionRecord) -> bool {
        match self {
            BridgeSelection::All => true,
            BridgeSelection::Bridge(id) => record.registration_number == *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalSpec {
    pub base_year: i32,
    pub width: i32,
}

impl Default for IntervalSpec {
    fn default() -> Self {
        IntervalSpec {
            base_year: 1960,
            width: 10,
        }
    }
}

/// Consecutive `[start, end]` year ranges from the base year up to
/// `max_year`; the last one is cut short at `max_year`.
pub fn year_buckets(spec: IntervalSpec, max_year: i32) -> Vec<(i32, i32)> {
    let width = spec.width.max(1);
    let mut buckets = Vec::new();
    let mut start = spec.base_year;
    while start <= max_year {
        let end = start
            .checked_add(width - 1)
            .map_or(max_year, |end| end.min(max_year));
        buckets.push((start, end));
        match start.checked_add(width) {
            Some(next) => start = next,
            None => break,
        }
    }
    buckets
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalAverage {
    pub start_year: i32,
    pub end_year: i32,
    pub mean: f64,
    /// Ratings that went into the mean.
    pub count: usize,
}

impl IntervalAverage {
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntervalOutcome {
    Averages(Vec<IntervalAverage>),
    NoData,
}

/// Mean of `field` per year bucket, oldest first. Buckets without any
/// contributing rating are left out.
pub fn interval_averages(
    table: &[InspectionRecord],
    field: RatingField,
    selection: &BridgeSelection,
    spec: IntervalSpec,
) -> IntervalOutcome {
    let Some(max_year) = table.iter().filter_map(|r| r.inspection_year()).max() else {
        return IntervalOutcome::NoData;
    };

    let averages: Vec<IntervalAverage> = year_buckets(spec, max_year)
        .into_iter()
        .filter_map(|(start, end)| {
            let values: Vec<f64> = table
                .iter()
                .filter(|r| {
                    r.inspection_year()
                        .is_some_and(|y| (start..=end).contains(&y))
                })
                .filter(|r| selection.matches(r))
                .filter_map(|r| r.rating(field))
                .collect();
            average(&values).map(|mean| IntervalAverage {
                start_year: start,
                end_year: end,
                mean,
                count: values.len(),
            })
        })
        .collect();

    log::debug!(
        "Interval averages for {}: {} non-empty buckets up to {}",
        field.code(),
        averages.len(),
        max_year
    );
    if averages.is_empty() {
        IntervalOutcome::NoData
    } else {
        IntervalOutcome::Averages(averages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Earliest to latest inspection date in the table.
    pub fn covering(table: &[InspectionRecord]) -> Option<DateWindow> {
        let dates = table.iter().filter_map(|r| r.inspection_date);
        Some(DateWindow {
            start: dates.clone().min()?,
            end: dates.max()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierStats {
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two ratings.
    pub std_dev: Option<f64>,
    pub threshold: f64,
    /// Ratings inside the window.
    pub count: usize,
}

impl OutlierStats {
    /// `(lower, upper)` limits; values strictly outside are outliers.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let sd = self.std_dev?;
        Some((
            self.mean - self.threshold * sd,
            self.mean + self.threshold * sd,
        ))
    }

    pub fn z_score(&self, value: f64) -> Option<f64> {
        self.std_dev
            .filter(|sd| *sd > 0.0)
            .map(|sd| (value - self.mean) / sd)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outlier<'a> {
    pub record: &'a InspectionRecord,
    pub value: f64,
    pub z_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutlierOutcome<'a> {
    /// No inspection falls in the window; nothing was computed.
    NoData,
    NoOutliers {
        stats: OutlierStats,
    },
    Found {
        stats: OutlierStats,
        rows: Vec<Outlier<'a>>,
    },
}

/// Inspections in `window` whose `field` rating lies more than `threshold`
/// sample standard deviations from the window mean.
pub fn outliers(
    table: &[InspectionRecord],
    field: RatingField,
    window: DateWindow,
    threshold: f64,
) -> OutlierOutcome<'_> {
    let in_window: Vec<&InspectionRecord> = table
        .iter()
        .filter(|r| r.inspection_date.is_some_and(|d| window.contains(d)))
        .collect();
    if in_window.is_empty() {
        return OutlierOutcome::NoData;
    }

    let values: Vec<f64> = in_window.iter().filter_map(|r| r.rating(field)).collect();
    let stats = OutlierStats {
        // Every rating in the window may be blank.
        mean: average(&values).unwrap_or(f64::NAN),
        std_dev: sample_std_dev(&values),
        threshold,
        count: values.len(),
    };
    let Some((lower, upper)) = stats.bounds() else {
        return OutlierOutcome::NoOutliers { stats };
    };

    let rows: Vec<Outlier<'_>> = in_window
        .into_iter()
        .filter_map(|record| {
            let value = record.rating(field)?;
            (value > upper || value < lower).then(|| Outlier {
                record,
                value,
                z_score: stats.z_score(value),
            })
        })
        .collect();

    log::debug!(
        "Outliers for {} in {}..={}: {} of {}",
        field.code(),
        window.start,
        window.end,
        rows.len(),
        stats.count
    );
    if rows.is_empty() {
        OutlierOutcome::NoOutliers { stats }
    } else {
        OutlierOutcome::Found { stats, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RATING_COUNT;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(id: &str, region: &str, inspected: Option<NaiveDate>, base: f64) -> InspectionRecord {
        InspectionRecord {
            registration_number: id.to_string(),
            region: region.to_string(),
            report_date: None,
            construction_date: None,
            inspection_date: inspected,
            ratings: [Some(base); RATING_COUNT],
        }
    }

    fn with_rating(mut r: InspectionRecord, field: RatingField, v: Option<f64>) -> InspectionRecord {
        r.ratings[field.index()] = v;
        r
    }

    #[test]
    fn filter_keeps_selected_regions_only() {
        let table = vec![
            rec("A", "Oslo", None, 1.0),
            rec("B", "Bergen", None, 1.0),
            rec("C", "Tromsø", None, 1.0),
        ];
        let kept = filter_regions(&table, &["Oslo".into(), "Tromsø".into()]);
        assert_eq!(bridges(&kept), vec!["A".to_string(), "C".to_string()]);
        assert_eq!(filter_regions(&table, &[]).len(), 3);
    }

    #[test]
    fn catalogues_keep_first_appearance_order() {
        let table = vec![
            rec("B", "Oslo", None, 1.0),
            rec("A", "Bergen", None, 1.0),
            rec("B", "Oslo", None, 1.0),
        ];
        assert_eq!(bridges(&table), vec!["B".to_string(), "A".to_string()]);
        assert_eq!(regions(&table), vec!["Oslo".to_string(), "Bergen".to_string()]);
    }

    #[test]
    fn ranking_returns_top_scores_with_stable_ties() {
        let table: Vec<_> = (0..12)
            .map(|i| rec(&format!("B{i}"), "Oslo", None, (i % 4) as f64))
            .collect();
        let top = worst_bridges(&table, 10, ScorePolicy::Strict);
        assert_eq!(top.len(), 10);
        let ids: Vec<&str> = top.iter().map(|r| r.record.registration_number.as_str()).collect();
        assert_eq!(&ids[..6], &["B3", "B7", "B11", "B2", "B6", "B10"]);
        let lowest_kept = top.last().unwrap().score;
        let returned: HashSet<&str> = ids.iter().copied().collect();
        for r in &table {
            if !returned.contains(r.registration_number.as_str()) {
                assert!(r.condition_score(ScorePolicy::Strict).unwrap() <= lowest_kept);
            }
        }
    }

    #[test]
    fn ranking_with_fewer_rows_than_n() {
        let table = vec![rec("A", "Oslo", None, 1.0), rec("B", "Oslo", None, 2.0)];
        let top = worst_bridges(&table, 10, ScorePolicy::Strict);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].score, 28.0);
    }

    #[test]
    fn ranking_skips_unscored_records_under_strict_policy() {
        let table = vec![
            with_rating(rec("A", "Oslo", None, 5.0), RatingField::Fl, None),
            rec("B", "Oslo", None, 1.0),
        ];
        let strict = worst_bridges(&table, 10, ScorePolicy::Strict);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].record.registration_number, "B");
        let partial = worst_bridges(&table, 10, ScorePolicy::Partial);
        assert_eq!(partial[0].record.registration_number, "A");
        assert_eq!(partial[0].score, 65.0);
    }

    #[test]
    fn trend_needs_two_dated_inspections() {
        let table = vec![
            rec("A", "Oslo", Some(date(2010, 1, 1)), 1.0),
            rec("A", "Oslo", None, 1.0),
            rec("B", "Oslo", Some(date(2010, 1, 1)), 1.0),
        ];
        assert_eq!(
            bridge_trend(&table, "A", RatingField::Fl, ScorePolicy::Strict),
            TrendOutcome::InsufficientHistory { rows: 1 }
        );
        assert_eq!(
            bridge_trend(&table, "missing", RatingField::Fl, ScorePolicy::Strict),
            TrendOutcome::InsufficientHistory { rows: 0 }
        );
    }

    #[test]
    fn trend_series_are_date_ordered_and_restartable() {
        let table = vec![
            with_rating(rec("A", "Oslo", Some(date(2015, 1, 1)), 2.0), RatingField::Le, Some(3.0)),
            rec("A", "Oslo", Some(date(2005, 1, 1)), 1.0),
            with_rating(rec("A", "Oslo", Some(date(2010, 1, 1)), 1.0), RatingField::Le, None),
        ];
        let TrendOutcome::Series(series) =
            bridge_trend(&table, "A", RatingField::Le, ScorePolicy::Strict)
        else {
            panic!("expected a series");
        };
        let ratings: Vec<_> = series.rating_points().collect();
        assert_eq!(
            ratings,
            vec![
                (date(2005, 1, 1), Some(1.0)),
                (date(2010, 1, 1), None),
                (date(2015, 1, 1), Some(3.0)),
            ]
        );
        assert_eq!(series.rating_points().count(), 3);
        let scores: Vec<_> = series.score_points().collect();
        assert_eq!(scores, vec![(date(2005, 1, 1), 14.0), (date(2015, 1, 1), 29.0)]);
        assert_eq!(series.axis(), RATING_AXIS);
    }

    #[test]
    fn buckets_stop_at_max_year() {
        let buckets = year_buckets(IntervalSpec::default(), 2023);
        assert_eq!(buckets.first(), Some(&(1960, 1969)));
        assert_eq!(buckets.last(), Some(&(2020, 2023)));
        assert_eq!(buckets.len(), 7);
        assert!(year_buckets(IntervalSpec::default(), 1959).is_empty());
        assert_eq!(year_buckets(IntervalSpec::default(), 1960), vec![(1960, 1960)]);
    }

    #[test]
    fn huge_bucket_width_yields_one_bucket() {
        let spec = IntervalSpec {
            base_year: 1960,
            width: i32::MAX,
        };
        assert_eq!(year_buckets(spec, 2023), vec![(1960, 2023)]);
    }

    #[test]
    fn buckets_near_the_end_of_the_year_range_terminate() {
        let spec = IntervalSpec {
            base_year: i32::MAX - 15,
            width: 10,
        };
        assert_eq!(
            year_buckets(spec, i32::MAX),
            vec![(i32::MAX - 15, i32::MAX - 6), (i32::MAX - 5, i32::MAX)]
        );
    }

    #[test]
    fn interval_averages_omit_empty_buckets() {
        let table = vec![
            with_rating(rec("A", "Oslo", Some(date(1975, 3, 1)), 0.0), RatingField::Mu, Some(1.0)),
            with_rating(rec("B", "Oslo", Some(date(1979, 3, 1)), 0.0), RatingField::Mu, Some(2.0)),
            with_rating(rec("A", "Oslo", Some(date(1995, 3, 1)), 0.0), RatingField::Mu, None),
            with_rating(rec("A", "Oslo", Some(date(2023, 3, 1)), 0.0), RatingField::Mu, Some(4.0)),
            rec("C", "Oslo", None, 5.0),
        ];
        let IntervalOutcome::Averages(avgs) =
            interval_averages(&table, RatingField::Mu, &BridgeSelection::All, IntervalSpec::default())
        else {
            panic!("expected averages");
        };
        let labels: Vec<String> = avgs.iter().map(IntervalAverage::label).collect();
        assert_eq!(labels, vec!["1970-1979".to_string(), "2020-2023".to_string()]);
        assert_eq!(avgs[0].mean, 1.5);
        assert_eq!(avgs[0].count, 2);
        assert!(avgs.iter().all(|a| a.count > 0));
    }

    #[test]
    fn interval_averages_for_one_bridge() {
        let table = vec![
            with_rating(rec("A", "Oslo", Some(date(1975, 3, 1)), 0.0), RatingField::Mu, Some(1.0)),
            with_rating(rec("B", "Oslo", Some(date(1979, 3, 1)), 0.0), RatingField::Mu, Some(2.0)),
            with_rating(rec("B", "Oslo", Some(date(1985, 3, 1)), 0.0), RatingField::Mu, Some(3.0)),
        ];
        let outcome = interval_averages(
            &table,
            RatingField::Mu,
            &BridgeSelection::Bridge("A".into()),
            IntervalSpec::default(),
        );
        assert_eq!(
            outcome,
            IntervalOutcome::Averages(vec![IntervalAverage {
                start_year: 1970,
                end_year: 1979,
                mean: 1.0,
                count: 1,
            }])
        );
        assert_eq!(
            interval_averages(
                &table,
                RatingField::Mu,
                &BridgeSelection::Bridge("Z".into()),
                IntervalSpec::default()
            ),
            IntervalOutcome::NoData
        );
    }

    #[test]
    fn interval_averages_without_dates_is_no_data() {
        let table = vec![rec("A", "Oslo", None, 1.0)];
        assert_eq!(
            interval_averages(&table, RatingField::Fl, &BridgeSelection::All, IntervalSpec::default()),
            IntervalOutcome::NoData
        );
    }

    fn outlier_fixture() -> Vec<InspectionRecord> {
        [1.0, 1.0, 1.0, 1.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, v)| {
                with_rating(
                    rec(&format!("B{i}"), "Oslo", Some(date(2020, 1, 1 + i as u32)), 0.0),
                    RatingField::Au,
                    Some(*v),
                )
            })
            .collect()
    }

    #[test]
    fn outlier_boundary_uses_sample_standard_deviation() {
        let table = outlier_fixture();
        let window = DateWindow::covering(&table).unwrap();

        let OutlierOutcome::NoOutliers { stats } = outliers(&table, RatingField::Au, window, 2.0)
        else {
            panic!("10 is inside 2.8 + 2 * 4.02");
        };
        assert!((stats.mean - 2.8).abs() < 1e-12);
        let sd = stats.std_dev.unwrap();
        assert!((sd - 16.2f64.sqrt()).abs() < 1e-12);
        let (_, upper) = stats.bounds().unwrap();
        assert!((upper - 10.849_844_7).abs() < 1e-6);

        let OutlierOutcome::Found { rows, .. } = outliers(&table, RatingField::Au, window, 1.5)
        else {
            panic!("10 is outside 2.8 + 1.5 * 4.02");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.registration_number, "B4");
        assert_eq!(rows[0].value, 10.0);
        assert!((rows[0].z_score.unwrap() - 7.2 / sd).abs() < 1e-12);
    }

    #[test]
    fn outlier_window_is_inclusive() {
        let table = outlier_fixture();
        let window = DateWindow {
            start: date(2020, 1, 2),
            end: date(2020, 1, 5),
        };
        let OutlierOutcome::NoOutliers { stats } = outliers(&table, RatingField::Au, window, 2.0)
        else {
            panic!("expected statistics without outliers");
        };
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn empty_window_is_no_data() {
        let table = outlier_fixture();
        let window = DateWindow {
            start: date(1990, 1, 1),
            end: date(1990, 12, 31),
        };
        assert_eq!(outliers(&table, RatingField::Au, window, 2.0), OutlierOutcome::NoData);
    }

    #[test]
    fn single_rating_flags_nothing() {
        let table = vec![rec("A", "Oslo", Some(date(2020, 1, 1)), 4.0)];
        let window = DateWindow::covering(&table).unwrap();
        let OutlierOutcome::NoOutliers { stats } = outliers(&table, RatingField::Fl, window, 2.0)
        else {
            panic!("expected no outliers");
        };
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn all_bridges_aggregates_only_the_filtered_regions() {
        let table = vec![
            with_rating(rec("A", "Oslo", Some(date(2001, 1, 1)), 0.0), RatingField::Fl, Some(1.0)),
            with_rating(rec("B", "Bergen", Some(date(2002, 1, 1)), 0.0), RatingField::Fl, Some(5.0)),
        ];
        let oslo = filter_regions(&table, &["Oslo".into()]);
        let outcome =
            interval_averages(&oslo, RatingField::Fl, &BridgeSelection::All, IntervalSpec::default());
        let IntervalOutcome::Averages(avgs) = outcome else {
            panic!("expected averages");
        };
        assert_eq!(avgs.len(), 1);
        assert_eq!(avgs[0].mean, 1.0);
    }

    #[test]
    fn summary_counts_distinct_values() {
        let table = vec![
            rec("A", "Oslo", Some(date(2001, 1, 1)), 1.0),
            rec("A", "Oslo", Some(date(2011, 1, 1)), 2.0),
            with_rating(rec("B", "Bergen", None, 1.0), RatingField::Up, None),
        ];
        let s = summarize(&table, ScorePolicy::Strict);
        assert_eq!(s.total_records, 3);
        assert_eq!(s.total_bridges, 2);
        assert_eq!(s.total_regions, 2);
        assert_eq!(s.scored_records, 2);
        assert_eq!(s.first_inspection, Some(date(2001, 1, 1)));
        assert_eq!(s.last_inspection, Some(date(2011, 1, 1)));
        assert_eq!(s.avg_condition_score, Some(21.0));
    }
}

use crate::rating::{RatingField, RATING_COUNT};
use crate::util::{format_date, format_opt};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV row exactly as read. Everything is optional text; the loader
/// decides what counts as missing.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "registration_number")]
    pub registration_number: Option<String>,
    #[serde(rename = "kommune")]
    pub kommune: Option<String>,
    #[serde(rename = "report_date")]
    pub report_date: Option<String>,
    #[serde(rename = "construction_date")]
    pub construction_date: Option<String>,
    #[serde(rename = "general_inspection_date")]
    pub general_inspection_date: Option<String>,
    #[serde(rename = "Fl")]
    pub fl: Option<String>,
    #[serde(rename = "Sk")]
    pub sk: Option<String>,
    #[serde(rename = "Eu")]
    pub eu: Option<String>,
    #[serde(rename = "Mu")]
    pub mu: Option<String>,
    #[serde(rename = "Le")]
    pub le: Option<String>,
    #[serde(rename = "Bæ", alias = "BÃ¦", alias = "Bae")]
    pub bae: Option<String>,
    #[serde(rename = "Is")]
    pub is: Option<String>,
    #[serde(rename = "Kb")]
    pub kb: Option<String>,
    #[serde(rename = "Au")]
    pub au: Option<String>,
    #[serde(rename = "Be")]
    pub be: Option<String>,
    #[serde(rename = "Fu")]
    pub fu: Option<String>,
    #[serde(rename = "Af")]
    pub af: Option<String>,
    #[serde(rename = "Up")]
    pub up: Option<String>,
    #[serde(rename = "An")]
    pub an: Option<String>,
}

impl RawRow {
    /// Rating cells in `RatingField::ALL` order.
    pub fn rating_cells(&self) -> [Option<&str>; RATING_COUNT] {
        [
            self.fl.as_deref(),
            self.sk.as_deref(),
            self.eu.as_deref(),
            self.mu.as_deref(),
            self.le.as_deref(),
            self.bae.as_deref(),
            self.is.as_deref(),
            self.kb.as_deref(),
            self.au.as_deref(),
            self.be.as_deref(),
            self.fu.as_deref(),
            self.af.as_deref(),
            self.up.as_deref(),
            self.an.as_deref(),
        ]
    }
}

/// How a record with missing rating cells is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicy {
    /// Any missing rating leaves the record unscored.
    #[default]
    Strict,
    /// Missing ratings are skipped; an all-missing record scores zero.
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRecord {
    pub registration_number: String,
    pub region: String,
    pub report_date: Option<NaiveDate>,
    pub construction_date: Option<NaiveDate>,
    pub inspection_date: Option<NaiveDate>,
    pub ratings: [Option<f64>; RATING_COUNT],
}

impl InspectionRecord {
    pub fn rating(&self, field: RatingField) -> Option<f64> {
        self.ratings[field.index()]
    }

    /// Sum of all rating fields. Lower is better.
    pub fn condition_score(&self, policy: ScorePolicy) -> Option<f64> {
        match policy {
            ScorePolicy::Strict => self.ratings.iter().copied().sum::<Option<f64>>(),
            ScorePolicy::Partial => Some(self.ratings.iter().flatten().sum()),
        }
    }

    pub fn missing_ratings(&self) -> usize {
        self.ratings.iter().filter(|r| r.is_none()).count()
    }

    pub fn inspection_year(&self) -> Option<i32> {
        self.inspection_date.map(|d| d.year())
    }
}

/// Full record, as shown by the raw-data view.
///
/// Headers are the source column names, so an exported table loads again.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RecordRow {
    #[serde(rename = "registration_number")]
    #[tabled(rename = "registration_number")]
    pub registration_number: String,
    #[serde(rename = "kommune")]
    #[tabled(rename = "kommune")]
    pub region: String,
    #[serde(rename = "report_date")]
    #[tabled(rename = "report_date")]
    pub report_date: String,
    #[serde(rename = "construction_date")]
    #[tabled(rename = "construction_date")]
    pub construction_date: String,
    #[serde(rename = "general_inspection_date")]
    #[tabled(rename = "general_inspection_date")]
    pub inspection_date: String,
    #[serde(rename = "Fl")]
    #[tabled(rename = "Fl")]
    pub fl: String,
    #[serde(rename = "Sk")]
    #[tabled(rename = "Sk")]
    pub sk: String,
    #[serde(rename = "Eu")]
    #[tabled(rename = "Eu")]
    pub eu: String,
    #[serde(rename = "Mu")]
    #[tabled(rename = "Mu")]
    pub mu: String,
    #[serde(rename = "Le")]
    #[tabled(rename = "Le")]
    pub le: String,
    #[serde(rename = "Bæ")]
    #[tabled(rename = "Bæ")]
    pub bae: String,
    #[serde(rename = "Is")]
    #[tabled(rename = "Is")]
    pub is: String,
    #[serde(rename = "Kb")]
    #[tabled(rename = "Kb")]
    pub kb: String,
    #[serde(rename = "Au")]
    #[tabled(rename = "Au")]
    pub au: String,
    #[serde(rename = "Be")]
    #[tabled(rename = "Be")]
    pub be: String,
    #[serde(rename = "Fu")]
    #[tabled(rename = "Fu")]
    pub fu: String,
    #[serde(rename = "Af")]
    #[tabled(rename = "Af")]
    pub af: String,
    #[serde(rename = "Up")]
    #[tabled(rename = "Up")]
    pub up: String,
    #[serde(rename = "An")]
    #[tabled(rename = "An")]
    pub an: String,
    #[serde(rename = "condition_score")]
    #[tabled(rename = "condition_score")]
    pub condition_score: String,
}

impl RecordRow {
    pub fn new(r: &InspectionRecord, policy: ScorePolicy) -> Self {
        let cell = |f: RatingField| format_opt(r.rating(f), 1);
        RecordRow {
            registration_number: r.registration_number.clone(),
            region: r.region.clone(),
            report_date: format_date(r.report_date),
            construction_date: format_date(r.construction_date),
            inspection_date: format_date(r.inspection_date),
            fl: cell(RatingField::Fl),
            sk: cell(RatingField::Sk),
            eu: cell(RatingField::Eu),
            mu: cell(RatingField::Mu),
            le: cell(RatingField::Le),
            bae: cell(RatingField::Bae),
            is: cell(RatingField::Is),
            kb: cell(RatingField::Kb),
            au: cell(RatingField::Au),
            be: cell(RatingField::Be),
            fu: cell(RatingField::Fu),
            af: cell(RatingField::Af),
            up: cell(RatingField::Up),
            an: cell(RatingField::An),
            condition_score: format_opt(r.condition_score(policy), 1),
        }
    }
}

/// Ranked record with every rating, so exports keep the per-element detail.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RankedRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(flatten)]
    #[tabled(inline)]
    pub record: RecordRow,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendRow {
    #[serde(rename = "Inspected")]
    #[tabled(rename = "Inspected")]
    pub inspection_date: String,
    #[serde(rename = "Rating")]
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "ConditionScore")]
    #[tabled(rename = "ConditionScore")]
    pub condition_score: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct IntervalRow {
    #[serde(rename = "Interval")]
    #[tabled(rename = "Interval")]
    pub interval: String,
    #[serde(rename = "AverageRating")]
    #[tabled(rename = "AverageRating")]
    pub average_rating: String,
    #[serde(rename = "Inspections")]
    #[tabled(rename = "Inspections")]
    pub inspections: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct OutlierRow {
    #[serde(flatten)]
    #[tabled(inline)]
    pub record: RecordRow,
    #[serde(rename = "Element")]
    #[tabled(rename = "Element")]
    pub element: String,
    #[serde(rename = "Rating")]
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "ZScore")]
    #[tabled(rename = "ZScore")]
    pub z_score: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_records: usize,
    pub total_bridges: usize,
    pub total_regions: usize,
    pub scored_records: usize,
    pub first_inspection: Option<NaiveDate>,
    pub last_inspection: Option<NaiveDate>,
    pub avg_condition_score: Option<f64>,
}

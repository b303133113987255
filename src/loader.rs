use crate::error::{ReportError, Result};
use crate::rating::{RatingField, RATING_COUNT};
use crate::types::{InspectionRecord, RawRow};
use crate::util::{parse_date_safe, parse_f64_safe};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 5] = [
    "registration_number",
    "kommune",
    "report_date",
    "construction_date",
    "general_inspection_date",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    /// Rows the CSV reader could not decode; they are skipped.
    pub skipped_rows: usize,
    /// Non-empty date cells that matched no known layout.
    pub unparsed_dates: usize,
    /// Records with at least one missing rating cell.
    pub incomplete_ratings: usize,
}

pub fn load_inspections(
    path: &Path,
    date_formats: &[String],
) -> Result<(Vec<InspectionRecord>, LoadReport)> {
    let rdr = reader_builder().from_path(path)?;
    let (records, report) = read_inspections(rdr, date_formats)?;
    log::info!(
        "Loaded {} inspections from {} ({} rows skipped, {} unparsed dates)",
        records.len(),
        path.display(),
        report.skipped_rows,
        report.unparsed_dates
    );
    Ok((records, report))
}

/// Load from any reader; used for files and in-memory fixtures alike.
pub fn load_from_reader<R: Read>(
    reader: R,
    date_formats: &[String],
) -> Result<(Vec<InspectionRecord>, LoadReport)> {
    let rdr = reader_builder().from_reader(reader);
    read_inspections(rdr, date_formats)
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.flexible(true).trim(Trim::Headers);
    builder
}

fn read_inspections<R: Read>(
    mut rdr: csv::Reader<R>,
    date_formats: &[String],
) -> Result<(Vec<InspectionRecord>, LoadReport)> {
    check_headers(rdr.headers()?)?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping row {}: {}", report.total_rows, e);
                report.skipped_rows += 1;
                continue;
            }
        };

        let mut date = |cell: Option<&str>| {
            let parsed = parse_date_safe(cell, date_formats);
            if parsed.is_none() && cell.is_some_and(|c| !c.trim().is_empty()) {
                report.unparsed_dates += 1;
            }
            parsed
        };
        let report_date = date(row.report_date.as_deref());
        let construction_date = date(row.construction_date.as_deref());
        let inspection_date = date(row.general_inspection_date.as_deref());

        let mut ratings = [None; RATING_COUNT];
        for (slot, cell) in ratings.iter_mut().zip(row.rating_cells()) {
            *slot = parse_f64_safe(cell);
        }

        let record = InspectionRecord {
            registration_number: text_or_unknown(row.registration_number),
            region: text_or_unknown(row.kommune),
            report_date,
            construction_date,
            inspection_date,
            ratings,
        };
        if record.missing_ratings() > 0 {
            report.incomplete_ratings += 1;
        }
        records.push(record);
    }

    Ok((records, report))
}

fn text_or_unknown(value: Option<String>) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn check_headers(headers: &StringRecord) -> Result<()> {
    let present: Vec<&str> = headers.iter().map(str::trim).collect();
    for column in REQUIRED_COLUMNS {
        if !present.contains(&column) {
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    for field in RatingField::ALL {
        if !field.header_aliases().iter().any(|a| present.contains(a)) {
            return Err(ReportError::MissingColumn {
                column: field.label().to_string(),
            });
        }
    }
    Ok(())
}

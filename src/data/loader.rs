use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;

use super::model::{ClaimRecord, Dataset, YesNo};
use crate::config::ColumnMapping;
use crate::error::{DashboardError, Result};

/// Date-only layouts accepted for the loss-date column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
/// Timestamp layouts; the time part is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a claims dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row containing every mapped column (extra columns ignored)
/// * `.json` – `[{ "<column>": value, ... }, ...]`
pub fn load_file(path: &Path, columns: &ColumnMapping) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (records, undated) = match ext.as_str() {
        "csv" => load_csv(path, columns)?,
        "json" => load_json(path, columns)?,
        other => return Err(DashboardError::UnsupportedFormat(other.to_string())),
    };

    if undated > 0 {
        log::warn!(
            "{undated} of {} claims in {} have an unparseable '{}' and will be hidden by date filters",
            records.len(),
            path.display(),
            columns.loss_date
        );
    }

    let dataset = Dataset::from_records(records);
    log::info!(
        "Loaded {} claims from {} ({} insurers, {} states, {} incident types)",
        dataset.len(),
        path.display(),
        dataset.insurers.len(),
        dataset.states.len(),
        dataset.incident_types.len()
    );
    Ok(dataset)
}

/// Parse a loss date. Returns `None` instead of failing on anything unrecognised.
pub fn parse_loss_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse an amount cell. A blank cell is `None`, not zero, so it stays out of
/// the average claim.
fn parse_amount(s: &str, row: usize, column: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(DashboardError::InvalidAmount {
            row,
            column: column.to_string(),
            value: s.to_string(),
        }),
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DashboardError + '_ {
    move |source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header positions of the mapped columns.
struct CsvLayout {
    loss_date: usize,
    insurer_name: usize,
    insured_state: usize,
    incident_type: usize,
    injury_involved: usize,
    lawsuit_filed: usize,
    total_claimed_losses: usize,
    total_insurance_payment: usize,
}

impl CsvLayout {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnMapping) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };
        Ok(CsvLayout {
            loss_date: find(&columns.loss_date)?,
            insurer_name: find(&columns.insurer_name)?,
            insured_state: find(&columns.insured_state)?,
            incident_type: find(&columns.incident_type)?,
            injury_involved: find(&columns.injury_involved)?,
            lawsuit_filed: find(&columns.lawsuit_filed)?,
            total_claimed_losses: find(&columns.total_claimed_losses)?,
            total_insurance_payment: find(&columns.total_insurance_payment)?,
        })
    }
}

fn load_csv(path: &Path, columns: &ColumnMapping) -> Result<(Vec<ClaimRecord>, usize)> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let mut reader = csv::Reader::from_reader(file);
    let layout = CsvLayout::resolve(reader.headers()?, columns)?;

    let mut records = Vec::new();
    let mut undated = 0;

    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let loss_date = parse_loss_date(cell(layout.loss_date));
        if loss_date.is_none() {
            undated += 1;
        }

        records.push(ClaimRecord {
            loss_date,
            insurer_name: cell(layout.insurer_name).trim().to_string(),
            insured_state: cell(layout.insured_state).trim().to_string(),
            incident_type: cell(layout.incident_type).trim().to_string(),
            injury_involved: YesNo::parse(cell(layout.injury_involved)),
            lawsuit_filed: YesNo::parse(cell(layout.lawsuit_filed)),
            total_claimed_losses: parse_amount(
                cell(layout.total_claimed_losses),
                row,
                &columns.total_claimed_losses,
            )?,
            total_insurance_payment: parse_amount(
                cell(layout.total_insurance_payment),
                row,
                &columns.total_insurance_payment,
            )?,
        });
    }

    Ok((records, undated))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, keys follow the column mapping):
///
/// ```json
/// [
///   { "dateOfloss": "2023-01-15", "insurer_name": "Geico", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path, columns: &ColumnMapping) -> Result<(Vec<ClaimRecord>, usize)> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| DashboardError::Malformed("expected a top-level JSON array".into()))?;

    let mut records = Vec::with_capacity(rows.len());
    let mut undated = 0;

    for (row_no, value) in rows.iter().enumerate() {
        let row = row_no + 1;
        let obj = value.as_object().ok_or_else(|| {
            DashboardError::Malformed(format!("row {row} is not a JSON object"))
        })?;
        let text_of = |name: &str| -> Result<String> {
            match obj.get(name) {
                None => Err(DashboardError::MissingColumn(name.to_string())),
                Some(JsonValue::Null) => Ok(String::new()),
                Some(JsonValue::String(s)) => Ok(s.trim().to_string()),
                Some(other) => Ok(other.to_string()),
            }
        };

        let loss_date = parse_loss_date(&text_of(&columns.loss_date)?);
        if loss_date.is_none() {
            undated += 1;
        }

        records.push(ClaimRecord {
            loss_date,
            insurer_name: text_of(&columns.insurer_name)?,
            insured_state: text_of(&columns.insured_state)?,
            incident_type: text_of(&columns.incident_type)?,
            injury_involved: YesNo::parse(&text_of(&columns.injury_involved)?),
            lawsuit_filed: YesNo::parse(&text_of(&columns.lawsuit_filed)?),
            total_claimed_losses: parse_amount(
                &text_of(&columns.total_claimed_losses)?,
                row,
                &columns.total_claimed_losses,
            )?,
            total_insurance_payment: parse_amount(
                &text_of(&columns.total_insurance_payment)?,
                row,
                &columns.total_insurance_payment,
            )?,
        });
    }

    Ok((records, undated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15);
        for s in [
            "2023-01-15",
            "01/15/2023",
            "2023/01/15",
            "15-01-2023",
            "2023-01-15 08:30:00",
            "2023-01-15T08:30:00",
        ] {
            assert_eq!(parse_loss_date(s), expected, "{s}");
        }
    }

    #[test]
    fn bad_dates_become_none() {
        for s in ["", "  ", "not a date", "2023-13-45", "32/01/2023"] {
            assert_eq!(parse_loss_date(s), None, "{s}");
        }
    }

    #[test]
    fn amounts_reject_negative_and_garbage() {
        assert_eq!(parse_amount("", 1, "c").unwrap(), None);
        assert_eq!(parse_amount(" 12.5 ", 1, "c").unwrap(), Some(12.5));
        assert!(parse_amount("-1", 1, "c").is_err());
        assert!(parse_amount("abc", 1, "c").is_err());
        assert!(parse_amount("NaN", 1, "c").is_err());
    }
}

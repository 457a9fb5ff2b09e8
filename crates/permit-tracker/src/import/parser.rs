use super::normalizer::normalize_text;
use super::ImportError;
use crate::deadlines::DeadlineInputs;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ImportedProject {
    pub(crate) name: String,
    pub(crate) address: Option<String>,
    pub(crate) inputs: DeadlineInputs,
}

/// Parse project rows; `row` numbers in errors are 1-based and exclude the header.
pub(crate) fn parse_projects<R: Read>(reader: R) -> Result<Vec<ImportedProject>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut projects = Vec::new();

    for (index, record) in csv_reader.deserialize::<ProjectRow>().enumerate() {
        let row = record?;
        let row_number = index + 1;

        let inputs = DeadlineInputs {
            submitted_at: parse_cell(row_number, "Submitted At", row.submitted_at.as_deref())?,
            permit_issued_at: parse_cell(
                row_number,
                "Permit Issued At",
                row.permit_issued_at.as_deref(),
            )?,
            last_action_at: parse_cell(
                row_number,
                "Last Action At",
                row.last_action_at.as_deref(),
            )?,
        };

        projects.push(ImportedProject {
            name: normalize_text(&row.project),
            address: row
                .address
                .as_deref()
                .map(normalize_text)
                .filter(|address| !address.is_empty()),
            inputs,
        });
    }

    Ok(projects)
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    #[serde(rename = "Project")]
    project: String,
    #[serde(rename = "Address", default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(
        rename = "Submitted At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    submitted_at: Option<String>,
    #[serde(
        rename = "Permit Issued At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    permit_issued_at: Option<String>,
    #[serde(
        rename = "Last Action At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_action_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_cell(
    row: usize,
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ImportError> {
    match value {
        None => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| ImportError::InvalidDate {
                row,
                column,
                value: raw.to_string(),
            }),
    }
}

/// Accept RFC 3339 timestamps (projected to their UTC date) or plain `YYYY-MM-DD`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}

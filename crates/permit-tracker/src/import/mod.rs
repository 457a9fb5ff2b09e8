//! Bulk deadline reports from a CSV export of permit projects.
//!
//! Expected headers: `Project`, `Address`, `Submitted At`, `Permit Issued At`,
//! `Last Action At`. Only `Project` is mandatory; blank date cells are treated as
//! missing milestones.

mod normalizer;
mod parser;

use crate::deadlines::{urgent_deadlines, Deadline, DeadlineInputs, DeadlinePolicy, DeadlineView};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read project export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid project CSV data: {}", err),
            ImportError::InvalidDate { row, column, value } => write!(
                f,
                "row {}: '{}' is not a valid date for column '{}'",
                row, value, column
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeadlineReportRow {
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub inputs: DeadlineInputs,
    pub deadlines: Vec<DeadlineView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeadlineReport {
    pub today: NaiveDate,
    pub rows: Vec<DeadlineReportRow>,
    /// Urgent or overdue deadlines across all rows.
    pub urgent_count: usize,
}

impl DeadlineReport {
    /// Deadlines needing attention, in row order.
    pub fn attention(&self) -> impl Iterator<Item = (&DeadlineReportRow, &DeadlineView)> {
        self.rows.iter().flat_map(|row| {
            row.deadlines
                .iter()
                .filter(|view| view.status.needs_attention())
                .map(move |view| (row, view))
        })
    }
}

pub struct ProjectCsvImporter;

impl ProjectCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        policy: &DeadlinePolicy,
        today: NaiveDate,
    ) -> Result<DeadlineReport, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, policy, today)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        policy: &DeadlinePolicy,
        today: NaiveDate,
    ) -> Result<DeadlineReport, ImportError> {
        let mut rows = Vec::new();
        let mut urgent_count = 0;

        for (index, project) in parser::parse_projects(reader)?.into_iter().enumerate() {
            if project.name.is_empty() {
                warn!(row = index + 1, "skipping project row without a name");
                continue;
            }

            let deadlines = policy.calculate(&project.inputs, today);
            urgent_count += urgent_deadlines(&deadlines).len();

            rows.push(DeadlineReportRow {
                project: project.name,
                address: project.address,
                inputs: project.inputs,
                deadlines: deadlines.iter().map(Deadline::to_view).collect(),
            });
        }

        Ok(DeadlineReport {
            today,
            rows,
            urgent_count,
        })
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::deadlines::{DeadlineInputs, DeadlineView};

/// Identifier wrapper for tracked properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Identifier wrapper for permit projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parcel whose permits are being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    /// Catalog id of the permitting jurisdiction.
    pub jurisdiction: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub parcel_id: Option<String>,
    pub zoning: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Submitted,
    UnderReview,
    Issued,
    Expired,
    Abandoned,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::Issued => "Issued",
            Self::Expired => "Expired",
            Self::Abandoned => "Abandoned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Required,
    Submitted,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub name: String,
    pub status: DocumentStatus,
}

/// A permit application tracked against a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub property_id: PropertyId,
    pub name: String,
    /// Catalog id of the permit type.
    pub permit_type: String,
    pub project_type: Option<String>,
    pub status: ProjectStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub permit_issued_at: Option<DateTime<Utc>>,
    pub last_action_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub documents: Vec<ProjectDocument>,
}

impl Project {
    /// Milestones projected onto UTC calendar dates.
    pub fn deadline_inputs(&self) -> DeadlineInputs {
        DeadlineInputs {
            submitted_at: self.submitted_at.map(calendar_date),
            permit_issued_at: self.permit_issued_at.map(calendar_date),
            last_action_at: self.last_action_at.map(calendar_date),
        }
    }

    pub fn documents_with_status(&self, status: DocumentStatus) -> usize {
        self.documents
            .iter()
            .filter(|document| document.status == status)
            .count()
    }
}

fn calendar_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Lookup parameters accepted by the property search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyLookup {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "parcelId")]
    pub parcel_id: Option<String>,
}

impl PropertyLookup {
    pub fn address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }

    pub fn parcel_id(&self) -> Option<&str> {
        non_blank(self.parcel_id.as_deref())
    }

    /// The term echoed back when nothing matched.
    pub fn search_term(&self) -> Option<&str> {
        self.address().or_else(|| self.parcel_id())
    }
}

/// Payload for registering a new property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProperty {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub jurisdiction: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "parcelId")]
    pub parcel_id: Option<String>,
    #[serde(default)]
    pub zoning: Option<String>,
}

/// Payload for opening a permit project on an existing property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "permitType")]
    pub permit_type: String,
    #[serde(default, alias = "projectType")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default, alias = "submittedAt")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "permitIssuedAt")]
    pub permit_issued_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "lastActionAt")]
    pub last_action_at: Option<DateTime<Utc>>,
    /// Overrides the permit type's document checklist when present.
    #[serde(default)]
    pub documents: Option<Vec<ProjectDocument>>,
}

/// Project with the deadlines computed for the reference date.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub status_label: &'static str,
    pub deadlines: Vec<DeadlineView>,
}

/// Property with its projects, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    #[serde(flatten)]
    pub property: Property,
    pub projects: Vec<ProjectView>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

//! Portfolio-wide aggregation of projects and their computed deadlines.

use chrono::NaiveDate;
use serde::Serialize;

use crate::deadlines::{DeadlineStatus, DeadlineView};
use crate::properties::domain::{
    DocumentStatus, ProjectId, ProjectStatus, PropertyId, PropertyView,
};

/// Maximum number of properties loaded for the dashboard.
pub const DASHBOARD_PROPERTY_LIMIT: usize = 20;
/// Maximum number of attention items surfaced at the top of the dashboard.
pub const ATTENTION_ITEM_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub property_count: usize,
    pub project_count: usize,
    pub active_deadlines: usize,
    /// Deadlines classified urgent or warning across every listed project.
    pub urgent_items: usize,
    pub status_counts: StatusCounts,
    pub attention: Vec<AttentionItem>,
    pub properties: Vec<PropertyCard>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub urgent: usize,
    pub warning: usize,
    pub normal: usize,
}

impl StatusCounts {
    fn record(&mut self, status: DeadlineStatus) {
        match status {
            DeadlineStatus::Urgent => self.urgent += 1,
            DeadlineStatus::Warning => self.warning += 1,
            DeadlineStatus::Normal => self.normal += 1,
        }
    }
}

/// A deadline needing attention, tagged with where it lives.
#[derive(Debug, Clone, Serialize)]
pub struct AttentionItem {
    pub property_id: PropertyId,
    pub property_address: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub deadline: DeadlineView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyCard {
    pub property_id: PropertyId,
    pub address: String,
    pub jurisdiction: String,
    pub zoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel_id: Option<String>,
    pub projects: Vec<ProjectCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub project_id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub permit_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    pub deadlines: Vec<DeadlineView>,
    pub documents: DocumentTally,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentTally {
    pub submitted: usize,
    pub required: usize,
}

pub fn summarize(today: NaiveDate, properties: &[PropertyView]) -> DashboardSummary {
    let mut project_count = 0;
    let mut active_deadlines = 0;
    let mut status_counts = StatusCounts::default();
    let mut attention = Vec::new();
    let mut cards = Vec::with_capacity(properties.len());

    for view in properties {
        let property = &view.property;
        let mut project_cards = Vec::with_capacity(view.projects.len());

        for project_view in &view.projects {
            let project = &project_view.project;
            project_count += 1;
            active_deadlines += project_view.deadlines.len();

            for deadline in &project_view.deadlines {
                status_counts.record(deadline.status);
                if deadline.status.needs_attention() {
                    attention.push(AttentionItem {
                        property_id: property.id.clone(),
                        property_address: property.address.clone(),
                        project_id: project.id.clone(),
                        project_name: project.name.clone(),
                        deadline: deadline.clone(),
                    });
                }
            }

            project_cards.push(ProjectCard {
                project_id: project.id.clone(),
                name: project.name.clone(),
                status: project.status,
                status_label: project.status.label(),
                permit_type: project.permit_type.clone(),
                project_type: project.project_type.clone(),
                deadlines: project_view.deadlines.clone(),
                documents: DocumentTally {
                    submitted: project.documents_with_status(DocumentStatus::Submitted),
                    required: project.documents_with_status(DocumentStatus::Required),
                },
            });
        }

        cards.push(PropertyCard {
            property_id: property.id.clone(),
            address: property.address.clone(),
            jurisdiction: property.jurisdiction.clone(),
            zoning: property
                .zoning
                .clone()
                .unwrap_or_else(|| "Zoning TBD".to_string()),
            parcel_id: property.parcel_id.clone(),
            projects: project_cards,
        });
    }

    let urgent_items = attention.len();
    attention.truncate(ATTENTION_ITEM_LIMIT);

    DashboardSummary {
        today,
        property_count: properties.len(),
        project_count,
        active_deadlines,
        urgent_items,
        status_counts,
        attention,
        properties: cards,
    }
}

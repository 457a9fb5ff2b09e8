use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::domain::{
    non_blank, DocumentStatus, NewProject, NewProperty, Project, ProjectDocument, ProjectId,
    ProjectStatus, ProjectView, Property, PropertyId, PropertyLookup, PropertyView,
};
use super::repository::{PropertyRepository, RepositoryError};
use crate::catalog::{permit_type_by_id, resolve_jurisdiction};
use crate::dashboard::{self, DashboardSummary, DASHBOARD_PROPERTY_LIMIT};
use crate::deadlines::{Clock, Deadline, DeadlinePolicy, SystemClock};

/// Service composing the repository, the deadline policy, and the clock.
pub struct PropertyService<R, C = SystemClock> {
    repository: Arc<R>,
    clock: C,
    policy: DeadlinePolicy,
}

static PROPERTY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PROJECT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_property_id() -> PropertyId {
    let id = PROPERTY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("prop-{id:06}"))
}

fn next_project_id() -> ProjectId {
    let id = PROJECT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProjectId(format!("proj-{id:06}"))
}

impl<R, C> PropertyService<R, C>
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(repository: Arc<R>, clock: C, policy: DeadlinePolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn policy(&self) -> &DeadlinePolicy {
        &self.policy
    }

    /// Find a property by parcel id, falling back to an address fragment.
    pub fn lookup(
        &self,
        query: &PropertyLookup,
    ) -> Result<Option<PropertyView>, PropertyServiceError> {
        let parcel_id = query.parcel_id();
        let address = query.address();
        if parcel_id.is_none() && address.is_none() {
            return Err(PropertyServiceError::MissingLookupKey);
        }

        let mut found = match parcel_id {
            Some(parcel_id) => self.repository.find_by_parcel_id(parcel_id)?,
            None => None,
        };
        if found.is_none() {
            if let Some(address) = address {
                found = self.repository.search_by_address(address)?;
            }
        }

        let today = self.today();
        found
            .map(|property| self.property_view(property, today))
            .transpose()
    }

    /// Register a property, rejecting duplicates by address or parcel id.
    pub fn create_property(&self, payload: NewProperty) -> Result<Property, PropertyServiceError> {
        let (Some(address), Some(jurisdiction)) = (
            non_blank(Some(payload.address.as_str())),
            non_blank(Some(payload.jurisdiction.as_str())),
        ) else {
            return Err(PropertyServiceError::Validation(
                "Address and jurisdiction are required".to_string(),
            ));
        };

        let jurisdiction = resolve_jurisdiction(jurisdiction).ok_or_else(|| {
            PropertyServiceError::UnknownJurisdiction(jurisdiction.to_string())
        })?;
        let parcel_id = non_blank(payload.parcel_id.as_deref()).map(str::to_string);

        let property = Property {
            id: next_property_id(),
            address: address.to_string(),
            jurisdiction: jurisdiction.id.to_string(),
            latitude: payload.latitude,
            longitude: payload.longitude,
            parcel_id,
            zoning: non_blank(payload.zoning.as_deref()).map(str::to_string),
            created_at: Utc::now(),
        };

        let stored = match self.repository.insert_property(property) {
            Ok(stored) => stored,
            Err(RepositoryError::Duplicate(existing)) => {
                debug!(property_id = %existing.id, "duplicate property rejected");
                return Err(PropertyServiceError::Duplicate(existing));
            }
            Err(err) => return Err(err.into()),
        };
        info!(property_id = %stored.id, jurisdiction = %stored.jurisdiction, "property registered");
        Ok(stored)
    }

    /// Open a permit project on an existing property.
    pub fn create_project(
        &self,
        property_id: &PropertyId,
        payload: NewProject,
    ) -> Result<ProjectView, PropertyServiceError> {
        let property = self
            .repository
            .fetch_property(property_id)?
            .ok_or_else(|| PropertyServiceError::PropertyNotFound(property_id.clone()))?;

        let name = non_blank(Some(payload.name.as_str()))
            .ok_or_else(|| PropertyServiceError::Validation("Project name is required".to_string()))?;
        let permit_type = permit_type_by_id(payload.permit_type.trim()).ok_or_else(|| {
            PropertyServiceError::UnknownPermitType(payload.permit_type.clone())
        })?;

        let status = payload.status.unwrap_or(if payload.permit_issued_at.is_some() {
            ProjectStatus::Issued
        } else if payload.submitted_at.is_some() {
            ProjectStatus::Submitted
        } else {
            ProjectStatus::Planning
        });

        let documents = payload.documents.unwrap_or_else(|| {
            permit_type
                .required_documents
                .iter()
                .map(|name| ProjectDocument {
                    name: (*name).to_string(),
                    status: DocumentStatus::Required,
                })
                .collect()
        });

        let project = Project {
            id: next_project_id(),
            property_id: property.id,
            name: name.to_string(),
            permit_type: permit_type.id.to_string(),
            project_type: non_blank(payload.project_type.as_deref()).map(str::to_string),
            status,
            submitted_at: payload.submitted_at,
            permit_issued_at: payload.permit_issued_at,
            last_action_at: payload.last_action_at,
            created_at: Utc::now(),
            documents,
        };

        let stored = self.repository.insert_project(project)?;
        info!(
            project_id = %stored.id,
            property_id = %stored.property_id,
            permit_type = %stored.permit_type,
            "project opened"
        );
        Ok(self.project_view(stored, self.today()))
    }

    pub fn project(&self, project_id: &ProjectId) -> Result<ProjectView, PropertyServiceError> {
        let project = self
            .repository
            .fetch_project(project_id)?
            .ok_or_else(|| PropertyServiceError::ProjectNotFound(project_id.clone()))?;
        Ok(self.project_view(project, self.today()))
    }

    /// Portfolio summary over the first page of tracked properties.
    pub fn dashboard(&self) -> Result<DashboardSummary, PropertyServiceError> {
        let today = self.today();
        let views = self
            .repository
            .list_properties(DASHBOARD_PROPERTY_LIMIT)?
            .into_iter()
            .map(|property| self.property_view(property, today))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(dashboard::summarize(today, &views))
    }

    fn property_view(
        &self,
        property: Property,
        today: NaiveDate,
    ) -> Result<PropertyView, PropertyServiceError> {
        let projects = self
            .repository
            .projects_for(&property.id)?
            .into_iter()
            .map(|project| self.project_view(project, today))
            .collect();
        Ok(PropertyView { property, projects })
    }

    fn project_view(&self, project: Project, today: NaiveDate) -> ProjectView {
        let deadlines = self
            .policy
            .calculate(&project.deadline_inputs(), today)
            .iter()
            .map(Deadline::to_view)
            .collect();
        ProjectView {
            status_label: project.status.label(),
            project,
            deadlines,
        }
    }
}

/// Error raised by the property service.
#[derive(Debug, thiserror::Error)]
pub enum PropertyServiceError {
    #[error("Address or parcelId parameter required")]
    MissingLookupKey,
    #[error("{0}")]
    Validation(String),
    #[error("unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),
    #[error("unknown permit type '{0}'")]
    UnknownPermitType(String),
    #[error("property {0} not found")]
    PropertyNotFound(PropertyId),
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
    #[error("Property already exists")]
    Duplicate(Box<Property>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

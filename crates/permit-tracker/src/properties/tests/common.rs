use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::deadlines::{DeadlinePolicy, FixedClock};
use crate::properties::domain::{
    NewProject, NewProperty, Project, ProjectId, Property, PropertyId,
};
use crate::properties::repository::{
    InMemoryPropertyRepository, PropertyRepository, RepositoryError,
};
use crate::properties::{property_router, PropertyService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date")
}

pub(super) fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (
    PropertyService<InMemoryPropertyRepository, FixedClock>,
    Arc<InMemoryPropertyRepository>,
) {
    let repository = Arc::new(InMemoryPropertyRepository::default());
    let service = PropertyService::new(
        repository.clone(),
        FixedClock(today()),
        DeadlinePolicy::default(),
    );
    (service, repository)
}

pub(super) fn new_property(address: &str, parcel_id: Option<&str>) -> NewProperty {
    NewProperty {
        address: address.to_string(),
        jurisdiction: "thurston-county".to_string(),
        latitude: Some(46.9),
        longitude: Some(-122.8),
        parcel_id: parcel_id.map(str::to_string),
        zoning: Some("RR 1/5".to_string()),
    }
}

/// A pending application submitted early in 2024, overdue by the fixture date.
pub(super) fn pending_project() -> NewProject {
    NewProject {
        name: "Garage addition".to_string(),
        permit_type: "residential-building".to_string(),
        project_type: Some("Addition".to_string()),
        submitted_at: Some(timestamp(2024, 1, 1)),
        ..NewProject::default()
    }
}

/// A permit issued close to a year before the fixture date.
pub(super) fn issued_project() -> NewProject {
    NewProject {
        name: "Backyard ADU".to_string(),
        permit_type: "adu".to_string(),
        submitted_at: Some(timestamp(2023, 10, 1)),
        permit_issued_at: Some(timestamp(2024, 1, 20)),
        ..NewProject::default()
    }
}

pub(super) fn router_with_service(
    service: PropertyService<InMemoryPropertyRepository, FixedClock>,
) -> axum::Router {
    property_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

impl PropertyRepository for UnavailableRepository {
    fn insert_property(&self, _property: Property) -> Result<Property, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_property(&self, _id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_parcel_id(&self, _parcel_id: &str) -> Result<Option<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn search_by_address(&self, _fragment: &str) -> Result<Option<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_properties(&self, _limit: usize) -> Result<Vec<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_project(&self, _project: Project) -> Result<Project, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_project(&self, _id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn projects_for(&self, _property_id: &PropertyId) -> Result<Vec<Project>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn unavailable_service() -> PropertyService<UnavailableRepository, FixedClock> {
    PropertyService::new(
        Arc::new(UnavailableRepository),
        FixedClock(today()),
        DeadlinePolicy::default(),
    )
}

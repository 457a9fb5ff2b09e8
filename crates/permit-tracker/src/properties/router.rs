use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{NewProject, NewProperty, ProjectId, PropertyId, PropertyLookup};
use super::repository::{PropertyRepository, RepositoryError};
use super::service::{PropertyService, PropertyServiceError};
use crate::catalog::{
    jurisdiction_by_id, jurisdictions, permit_types, permit_types_by_category, PermitCategory,
};
use crate::deadlines::Clock;

const COUNTY_STATUS_URL: &str =
    "https://www.thurstoncountywa.gov/departments/community-planning-and-economic-development/permitting/project-status";

/// Router builder exposing property, project, dashboard, and catalog endpoints.
pub fn property_router<R, C>(service: Arc<PropertyService<R, C>>) -> Router
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/property",
            get(lookup_handler::<R, C>).post(create_property_handler::<R, C>),
        )
        .route(
            "/api/property/:property_id/projects",
            post(create_project_handler::<R, C>),
        )
        .route("/api/projects/:project_id", get(project_handler::<R, C>))
        .route("/api/dashboard", get(dashboard_handler::<R, C>))
        .route("/api/jurisdictions", get(jurisdictions_handler))
        .route("/api/jurisdictions/:jurisdiction_id", get(jurisdiction_handler))
        .route("/api/permit-types", get(permit_types_handler))
        .with_state(service)
}

pub(crate) async fn lookup_handler<R, C>(
    State(service): State<Arc<PropertyService<R, C>>>,
    Query(query): Query<PropertyLookup>,
) -> Response
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    match service.lookup(&query) {
        Ok(Some(view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok(None) => {
            let payload = json!({
                "found": false,
                "message": "Property not found in database.",
                "suggestion": "You can add this property to start tracking permits.",
                "search_term": query.search_term(),
                "actions": {
                    "add_property": "/api/property",
                    "check_thurston_county": COUNTY_STATUS_URL,
                },
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_property_handler<R, C>(
    State(service): State<Arc<PropertyService<R, C>>>,
    Json(payload): Json<NewProperty>,
) -> Response
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    match service.create_property(payload) {
        Ok(property) => (StatusCode::CREATED, Json(property)).into_response(),
        Err(PropertyServiceError::Duplicate(existing)) => {
            let payload = json!({
                "error": "Property already exists",
                "property": existing,
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_project_handler<R, C>(
    State(service): State<Arc<PropertyService<R, C>>>,
    Path(property_id): Path<String>,
    Json(payload): Json<NewProject>,
) -> Response
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    match service.create_project(&PropertyId(property_id), payload) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn project_handler<R, C>(
    State(service): State<Arc<PropertyService<R, C>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    match service.project(&ProjectId(project_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<R, C>(
    State(service): State<Arc<PropertyService<R, C>>>,
) -> Response
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    match service.dashboard() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn jurisdictions_handler() -> Response {
    (StatusCode::OK, Json(jurisdictions())).into_response()
}

pub(crate) async fn jurisdiction_handler(Path(jurisdiction_id): Path<String>) -> Response {
    match jurisdiction_by_id(&jurisdiction_id) {
        Some(jurisdiction) => (StatusCode::OK, Json(jurisdiction)).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown jurisdiction '{jurisdiction_id}'"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PermitTypeQuery {
    #[serde(default)]
    category: Option<PermitCategory>,
}

pub(crate) async fn permit_types_handler(Query(query): Query<PermitTypeQuery>) -> Response {
    let body = match query.category {
        Some(category) => permit_types_by_category(category),
        None => permit_types().iter().collect(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(err: PropertyServiceError) -> Response {
    let status = match &err {
        PropertyServiceError::MissingLookupKey
        | PropertyServiceError::Validation(_)
        | PropertyServiceError::UnknownJurisdiction(_)
        | PropertyServiceError::UnknownPermitType(_) => StatusCode::BAD_REQUEST,
        PropertyServiceError::PropertyNotFound(_) | PropertyServiceError::ProjectNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        PropertyServiceError::Duplicate(_)
        | PropertyServiceError::Repository(RepositoryError::Conflict)
        | PropertyServiceError::Repository(RepositoryError::Duplicate(_)) => StatusCode::CONFLICT,
        PropertyServiceError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %err, "property request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}

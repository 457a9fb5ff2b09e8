use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use permit_tracker::deadlines::{
    urgent_deadlines, Clock, Deadline, DeadlineInputs, DeadlinePolicy, DeadlineView, SystemClock,
};
use permit_tracker::error::AppError;
use permit_tracker::import::{DeadlineReport, ProjectCsvImporter};
use permit_tracker::properties::{property_router, PropertyRepository, PropertyService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeadlineRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) submitted_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) permit_issued_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) last_action_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) urgent_only: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeadlineResponse {
    pub(crate) today: NaiveDate,
    pub(crate) inputs: DeadlineInputs,
    pub(crate) deadlines: Vec<DeadlineView>,
    pub(crate) urgent_count: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn with_service_routes<R, C>(service: Arc<PropertyService<R, C>>) -> axum::Router
where
    R: PropertyRepository + 'static,
    C: Clock + 'static,
{
    property_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/deadlines",
            axum::routing::post(deadlines_endpoint),
        )
        .route(
            "/api/v1/deadlines/import",
            axum::routing::post(import_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn deadlines_endpoint(
    Extension(policy): Extension<DeadlinePolicy>,
    Json(payload): Json<DeadlineRequest>,
) -> Json<DeadlineResponse> {
    let DeadlineRequest {
        submitted_at,
        permit_issued_at,
        last_action_at,
        today,
        urgent_only,
    } = payload;

    let today = today.unwrap_or_else(|| SystemClock.today());
    let inputs = DeadlineInputs {
        submitted_at,
        permit_issued_at,
        last_action_at,
    };

    let deadlines = policy.calculate(&inputs, today);
    let urgent = urgent_deadlines(&deadlines);
    let urgent_count = urgent.len();
    let listed = if urgent_only { urgent } else { deadlines };

    Json(DeadlineResponse {
        today,
        inputs,
        deadlines: listed.iter().map(Deadline::to_view).collect(),
        urgent_count,
    })
}

pub(crate) async fn import_endpoint(
    Extension(policy): Extension<DeadlinePolicy>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<DeadlineReport>, AppError> {
    let today = payload.today.unwrap_or_else(|| SystemClock.today());
    let reader = Cursor::new(payload.csv.into_bytes());
    let report = ProjectCsvImporter::from_reader(reader, &policy, today)?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use permit_tracker::deadlines::{DeadlineKind, DeadlineStatus, FixedClock};
    use permit_tracker::properties::InMemoryPropertyRepository;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn test_app(ready: bool) -> axum::Router {
        let service = Arc::new(PropertyService::new(
            Arc::new(InMemoryPropertyRepository::default()),
            FixedClock(date(2024, 12, 1)),
            DeadlinePolicy::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        with_service_routes(service)
            .layer(Extension(DeadlinePolicy::default()))
            .layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn deadlines_endpoint_computes_engine_output() {
        let request = DeadlineRequest {
            permit_issued_at: Some(date(2024, 1, 1)),
            today: Some(date(2024, 12, 20)),
            ..DeadlineRequest::default()
        };

        let Json(body) =
            deadlines_endpoint(Extension(DeadlinePolicy::default()), Json(request)).await;

        assert_eq!(body.today, date(2024, 12, 20));
        assert_eq!(body.urgent_count, 1);
        let view = &body.deadlines[0];
        assert_eq!(view.deadline.kind(), DeadlineKind::PermitExpiry);
        assert_eq!(view.deadline.days_remaining(), 11);
        assert_eq!(view.status, DeadlineStatus::Warning);
    }

    #[tokio::test]
    async fn deadlines_endpoint_can_filter_to_urgent() {
        let request = DeadlineRequest {
            submitted_at: Some(date(2025, 1, 1)),
            today: Some(date(2025, 1, 1)),
            urgent_only: true,
            ..DeadlineRequest::default()
        };

        let Json(body) =
            deadlines_endpoint(Extension(DeadlinePolicy::default()), Json(request)).await;

        assert!(body.deadlines.is_empty());
        assert_eq!(body.urgent_count, 0);
    }

    #[tokio::test]
    async fn deadlines_route_accepts_plain_dates() {
        let response = test_app(true)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/deadlines")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"submitted_at":"2024-01-01","today":"2024-12-01"}"#,
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["deadlines"][0]["type"], "abandonment");
        assert_eq!(payload["deadlines"][0]["is_overdue"], true);
        assert_eq!(payload["urgent_count"], 1);
    }

    #[tokio::test]
    async fn import_endpoint_rejects_invalid_dates() {
        let request = ImportRequest {
            csv: "Project,Submitted At\nShed,someday\n".to_string(),
            today: Some(date(2025, 1, 1)),
        };

        let error = import_endpoint(Extension(DeadlinePolicy::default()), Json(request))
            .await
            .expect_err("invalid date");

        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn import_endpoint_returns_report() {
        let request = ImportRequest {
            csv: "Project,Address,Submitted At\nGarage,14 Cedar Ln,2024-01-01\n".to_string(),
            today: Some(date(2024, 12, 1)),
        };

        let Json(report) = import_endpoint(Extension(DeadlinePolicy::default()), Json(request))
            .await
            .expect("report builds");

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.urgent_count, 1);
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = test_app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = test_app(true)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn property_routes_are_mounted() {
        let response = test_app(true)
            .oneshot(
                Request::builder()
                    .uri("/api/jurisdictions/tumwater")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], "tumwater");
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;

use scheduler::{ScheduledProcess, SchedulingError};

use crate::{format_processes, FormError, ProcessStore, StoreError, Submission};

/// Errors a route reports to the client as `{"error": ...}`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Not found")]
    NotFound,
}

impl ServiceError {
    fn status(&self) -> StatusCode {
        match self {
            ServiceError::Scheduling(_) | ServiceError::Form(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(_) => StatusCode::INSUFFICIENT_STORAGE,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleParams {
    time_quantum: Option<String>,
}

/// The request/response boundary around the process store and the
/// scheduling engine.
///
/// | Route                       | Action                                   |
/// |-----------------------------|------------------------------------------|
/// | `GET /`                     | list the stored processes                |
/// | `POST /`                    | store a process submitted through a form |
/// | `POST /clear`               | delete every stored process              |
/// | `GET /schedule/<algorithm>` | schedule the stored processes            |
#[derive(Debug, Clone, Default)]
pub struct Service {
    store: Arc<Mutex<ProcessStore>>,
}

impl Service {
    pub fn new(store: ProcessStore) -> Self {
        Service {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// The routes, with this service as their state.
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(index).post(submit))
            .route("/clear", post(clear))
            .route("/schedule/:algorithm", get(schedule))
            .fallback(not_found)
            .with_state(self)
    }
}

async fn index(State(service): State<Service>) -> String {
    let store = service.store.lock().await;
    format_processes(store.processes())
}

async fn submit(
    State(service): State<Service>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, ServiceError> {
    let submission = Submission::from_form(&fields)?;
    service.store.lock().await.submit(submission)?;
    Ok(Redirect::to("/"))
}

async fn clear(State(service): State<Service>) -> Redirect {
    service.store.lock().await.clear();
    Redirect::to("/")
}

async fn schedule(
    State(service): State<Service>,
    Path(algorithm): Path<String>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<Vec<ScheduledProcess>>, ServiceError> {
    let store = service.store.lock().await;
    let schedule = scheduler::schedule(
        store.processes(),
        &algorithm,
        params.time_quantum.as_deref(),
    )?;
    Ok(Json(schedule.into_completed()))
}

async fn not_found() -> ServiceError {
    ServiceError::NotFound
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::header::{CONTENT_TYPE, LOCATION};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, form: &str) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    async fn router_with(forms: &[&str]) -> Router {
        let router = Service::default().router();
        for form in forms {
            let response = router
                .clone()
                .oneshot(form_request("/", form))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], "/");
        }
        router
    }

    async fn completed(router: &Router, uri: &str) -> Vec<ScheduledProcess> {
        let (status, body) = send(router, get_request(uri)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn schedule_fcfs() {
        let router = router_with(&[
            "pid=P1&arrival_time=0&burst_time=5&priority=",
            "pid=P2&arrival_time=1&burst_time=3&priority=",
        ])
        .await;

        let completed = completed(&router, "/schedule/fcfs").await;
        let timings: Vec<(u64, u64, u64)> = completed
            .iter()
            .map(|p| (p.completion_time, p.turnaround_time, p.waiting_time))
            .collect();
        assert_eq!(timings, vec![(5, 5, 0), (8, 7, 4)]);
        assert_eq!(completed[0].process.priority, None);
    }

    #[tokio::test]
    async fn schedule_round_robin_with_quantum() {
        let router = router_with(&[
            "pid=P1&arrival_time=0&burst_time=5",
            "pid=P2&arrival_time=0&burst_time=3",
        ])
        .await;

        let completed = completed(&router, "/schedule/round_robin?time_quantum=2").await;
        assert_eq!(completed[0].process.pid, "P2");
        assert_eq!(completed[0].completion_time, 7);
        assert_eq!(completed[1].waiting_time, 3);
    }

    #[tokio::test]
    async fn percent_encoded_quantum() {
        let router = router_with(&[
            "pid=P1&arrival_time=0&burst_time=5",
            "pid=P2&arrival_time=0&burst_time=3",
        ])
        .await;

        let encoded = completed(&router, "/schedule/round_robin?time_quantum=%32").await;
        let plain = completed(&router, "/schedule/round_robin?time_quantum=2").await;
        assert_eq!(encoded, plain);
        assert_eq!(encoded[0].completion_time, 7);
    }

    #[tokio::test]
    async fn percent_encoded_form_fields() {
        let router = router_with(&["pid=init%20task&arrival_time=0&burst_time=%35"]).await;

        let completed = completed(&router, "/schedule/sjf").await;
        assert_eq!(completed[0].process.pid, "init task");
        assert_eq!(completed[0].process.burst_time, 5);
    }

    #[tokio::test]
    async fn scheduling_errors_are_client_errors() {
        let router = router_with(&["pid=P1&arrival_time=0&burst_time=5"]).await;
        for uri in [
            "/schedule/bogus",
            "/schedule/round_robin?time_quantum=0",
            "/schedule/round_robin?time_quantum=-1",
            "/schedule/priority",
        ] {
            let (status, body) = send(&router, get_request(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let value: Value = serde_json::from_str(&body).unwrap();
            assert!(value["error"].is_string());
        }
    }

    #[tokio::test]
    async fn late_arrival_is_a_client_error() {
        let router =
            router_with(&["pid=P1&arrival_time=18446744073709551615&burst_time=1"]).await;
        let (status, _) = send(&router, get_request("/schedule/fcfs")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_algorithm_message() {
        let router = Service::default().router();
        let (_, body) = send(&router, get_request("/schedule/bogus")).await;
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, json!({ "error": "Invalid algorithm: \"bogus\"" }));
    }

    #[tokio::test]
    async fn empty_store_schedules_nothing() {
        let router = Service::default().router();
        for algorithm in ["fcfs", "sjf", "priority", "round_robin"] {
            let completed = completed(&router, &format!("/schedule/{algorithm}")).await;
            assert!(completed.is_empty());
        }
    }

    #[tokio::test]
    async fn invalid_form_is_rejected() {
        let service = Service::default();
        let router = service.clone().router();
        let (status, _) = send(
            &router,
            form_request("/", "pid=P1&arrival_time=x&burst_time=1"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(service.store.lock().await.is_empty());
    }

    #[tokio::test]
    async fn index_and_clear() {
        let router = router_with(&["pid=P1&arrival_time=0&burst_time=5&priority=2"]).await;
        let (status, body) = send(&router, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            "===== Processes =====\nID\tPID\tARRIVAL\tBURST\tPRI\n1\tP1\t0\t5\t2\n"
        );

        let (status, _) = send(&router, form_request("/clear", "")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let (_, body) = send(&router, get_request("/")).await;
        assert_eq!(body, "===== Processes =====\nID\tPID\tARRIVAL\tBURST\tPRI\n");
    }

    #[tokio::test]
    async fn unknown_routes() {
        let router = Service::default().router();
        let (status, body) = send(&router, get_request("/processes")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Not found"}"#);

        let (status, _) = send(&router, get_request("/clear")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = send(&router, form_request("/schedule/fcfs", "")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

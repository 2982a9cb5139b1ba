//! Routes of the mock listing API
//!
//! `GET /api/{collection}` returns a bare array, `POST` and `PUT` return the
//! stored record, reorder and delete answer with an [`ApiResponse`] envelope.

use crate::state::{MockState, Table};
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use shared::{ApiResponse, Collection, ReorderRequest};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Invalid(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Injected(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match self {
            MockError::Unauthorized => StatusCode::UNAUTHORIZED,
            MockError::Invalid(_) => StatusCode::BAD_REQUEST,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::Injected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

type MockResult<T> = Result<T, MockError>;

/// Build the full router: `/health` plus both collections under `/api`
pub fn build_router(state: Arc<MockState>) -> Router {
    let api = Router::new()
        .merge(collection_routes(state.cars.clone()))
        .merge(collection_routes(state.properties.clone()))
        .layer(middleware::from_fn_with_state(state, require_token));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
}

fn collection_routes<T: Collection>(table: Arc<Table<T>>) -> Router {
    Router::new()
        .route(&format!("/api/{}", T::PATH), get(list::<T>).post(create::<T>))
        .route(&format!("/api/{}/reorder", T::PATH), post(reorder::<T>))
        .route(
            &format!("/api/{}/{{id}}", T::PATH),
            put(update::<T>).delete(remove::<T>),
        )
        .with_state(table)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn require_token(
    State(state): State<Arc<MockState>>,
    req: Request,
    next: Next,
) -> MockResult<Response> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if presented != Some(expected) {
        tracing::warn!(path = %req.uri().path(), "Rejected request without a valid token");
        return Err(MockError::Unauthorized);
    }

    Ok(next.run(req).await)
}

async fn list<T: Collection>(State(table): State<Arc<Table<T>>>) -> MockResult<Json<Vec<T>>> {
    table.count_load();
    if table.loads_fail() {
        return Err(MockError::Injected(format!("Failed to load {}", T::PATH)));
    }
    Ok(Json(table.list().await))
}

async fn reorder<T: Collection>(
    State(table): State<Arc<Table<T>>>,
    Json(req): Json<ReorderRequest>,
) -> MockResult<Json<ApiResponse<()>>> {
    table.log_reorder(&req).await;

    if let Some(delay) = table.reorder_delay().await {
        tokio::time::sleep(delay).await;
    }

    if table.reorder_fails(&req.item_id).await {
        return Err(MockError::Injected("Failed to update order".to_string()));
    }

    if !table.set_rank(&req).await {
        return Err(MockError::NotFound(T::DISPLAY_NAME));
    }

    tracing::info!(collection = T::PATH, id = %req.item_id, rank = req.new_order, "Rank updated");
    Ok(Json(ApiResponse::done()))
}

async fn create<T: Collection>(
    State(table): State<Arc<Table<T>>>,
    Json(draft): Json<T::Draft>,
) -> MockResult<(StatusCode, Json<T>)> {
    T::validate_draft(&draft).map_err(|e| MockError::Invalid(e.to_string()))?;
    let record = table.insert(draft).await;
    tracing::info!(collection = T::PATH, id = %record.id(), "Listing created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update<T: Collection>(
    State(table): State<Arc<Table<T>>>,
    Path(id): Path<String>,
    Json(patch): Json<T::Patch>,
) -> MockResult<Json<T>> {
    table
        .update(&id, patch)
        .await
        .map(Json)
        .ok_or(MockError::NotFound(T::DISPLAY_NAME))
}

async fn remove<T: Collection>(
    State(table): State<Arc<Table<T>>>,
    Path(id): Path<String>,
) -> MockResult<Json<ApiResponse<()>>> {
    if !table.remove(&id).await {
        return Err(MockError::NotFound(T::DISPLAY_NAME));
    }
    Ok(Json(ApiResponse::done()))
}

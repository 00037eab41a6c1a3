//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::db;
use crate::events::EventRecord;
use crate::summary::{self, OwnerGrant};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub project_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct OwnersResponse {
    pub count: usize,
    pub owners: Vec<OwnerGrant>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /projects/:id/events`
///
/// Returns all indexed events for the given project identifier.
pub async fn get_project_events(
    State(state): State<Arc<ApiState>>,
    Path(project_id): Path<String>,
) -> Response {
    match db::get_events_for_project(&state.pool, &project_id).await {
        Ok(events) => Json(EventsResponse {
            project_id,
            count: events.len(),
            events,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// `GET /projects/:id/summary`
///
/// Escrow position of a project reconstructed from its indexed events.
pub async fn get_project_summary(
    State(state): State<Arc<ApiState>>,
    Path(project_id): Path<String>,
) -> Response {
    let events = match db::get_events_for_project(&state.pool, &project_id).await {
        Ok(events) => events,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    };
    if events.is_empty() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("no events indexed for project {project_id}"),
        );
    }

    match summary::summarize(&project_id, &events) {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            warn!("Summary for project {project_id} failed: {e}");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e)
        }
    }
}

/// `GET /owners`
///
/// Every owner grant seen so far, including the constructor's seed owner.
pub async fn get_owners(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_owner_events(&state.pool).await {
        Ok(events) => {
            let owners = summary::owner_grants(&events);
            Json(OwnersResponse {
                count: owners.len(),
                owners,
            })
            .into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// `GET /events`
///
/// Returns all indexed events across all projects.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_all_events(&state.pool).await {
        Ok(events) => Json(AllEventsResponse {
            count: events.len(),
            events,
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

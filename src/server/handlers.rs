//! HTTP route handlers for the coil API
//!
//! Implements create, soft-delete, range listing, and window statistics
//! over the coils table, plus a health probe.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::coil::filter::{build_filter, RangeQuery};
use crate::coil::stats::{compute_gap_stats, CoilStats, StatsWindow};
use crate::coil::{Coil, NewCoil};
use crate::error::AppError;
use crate::storage::{Database, StorageError};

/// Shared handler state
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

/// Response body for a successful creation
#[derive(Debug, Clone, Serialize)]
pub struct CoilCreated {
    pub id: i64,
}

/// Query parameters for the statistics endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// POST /api/coil
///
/// Creates a coil from `{length, weight}`; both must be positive.
pub async fn create_coil(
    State(state): State<Arc<AppState>>,
    Json(new_coil): Json<NewCoil>,
) -> Result<(StatusCode, Json<CoilCreated>), AppError> {
    if new_coil.length <= 0 {
        return Err(AppError::validation("length must be a positive integer"));
    }
    if new_coil.weight <= 0 {
        return Err(AppError::validation("weight must be a positive integer"));
    }

    let db = lock_db(&state)?;
    let id = db.insert_coil(&new_coil)?;

    Ok((StatusCode::CREATED, Json(CoilCreated { id })))
}

/// DELETE /api/coil/{id}
///
/// Soft-deletes a coil. An unknown id and an already-deleted coil both
/// map to 404, with distinguishing messages.
pub async fn delete_coil(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = lock_db(&state)?;

    if !db.coil_exists(id)? {
        return Err(AppError::not_found(format!("Coil with id={} not found", id)));
    }
    if db.is_coil_deleted(id)? {
        return Err(AppError::not_found(format!(
            "Coil with id={} was already deleted",
            id
        )));
    }

    // The update re-checks deletion state, so a concurrent delete of the
    // same row stamps it exactly once.
    let changed = db.soft_delete_coil(id, Utc::now().naive_utc())?;
    if changed == 0 {
        return Err(AppError::not_found(format!(
            "Coil with id={} was already deleted",
            id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/coil
///
/// Lists coils matching the conjunction of the validated range pairs.
pub async fn list_coils(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Coil>>, AppError> {
    let bounds = build_filter(&query)?;

    let db = lock_db(&state)?;
    let coils = db.list_coils(&bounds)?;

    Ok(Json(coils))
}

/// GET /api/coil/stats
///
/// Computes the window statistics from two reads over the same window:
/// the SQL aggregate, then the ordered rows for gap pairing.
pub async fn coil_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<CoilStats>, AppError> {
    let window = StatsWindow::parse(query.from_date.as_deref(), query.to_date.as_deref())?;

    let db = lock_db(&state)?;
    let aggregate = db.window_aggregate(&window)?.ok_or_else(|| {
        AppError::not_found("No coils were created within the requested window")
    })?;
    let gaps = compute_gap_stats(&db.window_rows(&window)?);

    Ok(Json(CoilStats::from_parts(aggregate, gaps)))
}

/// GET /api/health
///
/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "coil-warehouse"
        })),
    )
}

fn lock_db(state: &AppState) -> Result<MutexGuard<'_, Database>, AppError> {
    state
        .db
        .lock()
        .map_err(|_| AppError::Storage(StorageError::LockError))
}

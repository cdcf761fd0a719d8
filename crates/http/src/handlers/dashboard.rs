use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use freshboard_core::analytics::MapView;
use freshboard_service::{DashboardOverview, HistoryView, ScansView, SelectionView, TrendsView};

use crate::api_error::ApiError;
use crate::query_types::{DateQuery, ScansQuery, SelectionRequest};
use crate::session_auth::CurrentSession;
use crate::AppState;

pub async fn overview(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Query(query): Query<DateQuery>,
) -> Result<Json<DashboardOverview>, ApiError> {
    let mut session = current.session.lock().await;
    Ok(Json(state.dashboard.overview(&mut session, query.into()).await?))
}

pub async fn scans(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Query(query): Query<ScansQuery>,
) -> Result<Json<ScansView>, ApiError> {
    let grid = query.grid_query()?;
    let mut session = current.session.lock().await;
    Ok(Json(state.dashboard.scans(&mut session, query.date_filter(), grid).await?))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> Result<Json<HistoryView>, ApiError> {
    let mut session = current.session.lock().await;
    Ok(Json(state.dashboard.history(&mut session).await?))
}

pub async fn map(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Query(query): Query<DateQuery>,
) -> Result<Json<MapView>, ApiError> {
    let mut session = current.session.lock().await;
    Ok(Json(state.dashboard.map(&mut session, query.into()).await?))
}

pub async fn trends(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Query(query): Query<DateQuery>,
) -> Result<Json<TrendsView>, ApiError> {
    let mut session = current.session.lock().await;
    Ok(Json(state.dashboard.trends(&mut session, query.into()).await?))
}

pub async fn select_qr(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<SelectionView>, ApiError> {
    let mut session = current.session.lock().await;
    Ok(Json(state.dashboard.select_qr(&mut session, &req.qr_code)?))
}

pub async fn reset_selection(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> Json<SelectionView> {
    let mut session = current.session.lock().await;
    Json(state.dashboard.reset_selection(&mut session))
}

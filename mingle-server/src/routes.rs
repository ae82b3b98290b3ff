//! Request handlers for the matching endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use mingle_core::{DEFAULT_EVENT_TOP_N, DEFAULT_USER_TOP_N, Matcher};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;
use crate::views::{
    EventMatchView, EventMatchesResponse, UserMatchView, UserMatchesResponse, UserView,
};

/// Optional `top_n` query parameter shared by the matching endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct MatchQuery {
    top_n: Option<usize>,
}

pub(crate) async fn root() -> Json<Value> {
    Json(json!({ "message": "Mingle matching engine is running" }))
}

pub(crate) async fn user_matches(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<UserMatchesResponse>, ApiError> {
    let top_n = query.top_n.unwrap_or(DEFAULT_USER_TOP_N);
    let matcher = Matcher::new(&state.store, state.scorer.as_ref());
    let matches = matcher.user_matches(user_id, top_n).map_err(|error| {
        tracing::debug!("user match lookup failed: {error}");
        ApiError::from(error)
    })?;
    Ok(Json(UserMatchesResponse {
        user_id,
        matches: matches.iter().map(UserMatchView::from).collect(),
    }))
}

pub(crate) async fn event_matches(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<EventMatchesResponse>, ApiError> {
    let top_n = query.top_n.unwrap_or(DEFAULT_EVENT_TOP_N);
    let matcher = Matcher::new(&state.store, state.scorer.as_ref());
    let events = matcher.event_matches(user_id, top_n).map_err(|error| {
        tracing::debug!("event match lookup failed: {error}");
        ApiError::from(error)
    })?;
    Ok(Json(EventMatchesResponse {
        user_id,
        events: events.iter().map(EventMatchView::from).collect(),
    }))
}

pub(crate) async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<UserView>> {
    Json(state.store.users().iter().map(UserView::from).collect())
}

//! HTTP route handlers for the term graph viewer.
//!
//! The page and its JSON APIs: graph payload, dataset reads, autocomplete,
//! the editor mode machine, term mutations, and the export endpoints.

use crate::changes::PatchOutcome;
use crate::dataset::{self, TermUpdate};
use crate::graph::graph_payload;
use crate::mode::{transition, Effect, EditorState, Event};
use crate::models::FilterState;
use crate::templates::render_viewer;
use crate::AppState;
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Viewer Page
// ============================================================================

pub async fn index(RawQuery(query): RawQuery, State(state): State<Arc<AppState>>) -> Html<String> {
    let filter = FilterState::parse(query.as_deref().unwrap_or(""));
    let tracker = state.tracker.lock().unwrap();
    let payload = graph_payload(tracker.records());
    Html(render_viewer(&payload, &filter))
}

// ============================================================================
// Dataset APIs
// ============================================================================

pub async fn dataset_api(State(state): State<Arc<AppState>>) -> Response {
    let tracker = state.tracker.lock().unwrap();
    (
        [("content-type", "application/json")],
        tracker.export_json(),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct TermsQuery {
    pub q: Option<String>,
}

pub async fn terms_api(
    Query(query): Query<TermsQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let tracker = state.tracker.lock().unwrap();
    let matches = dataset::search_terms(tracker.records(), query.q.as_deref().unwrap_or(""));
    Json(matches).into_response()
}

#[derive(Serialize)]
pub struct ChangesSummary {
    pub has_changes: bool,
    pub modified_terms: Vec<String>,
}

pub async fn changes_api(State(state): State<Arc<AppState>>) -> Json<ChangesSummary> {
    let tracker = state.tracker.lock().unwrap();
    Json(ChangesSummary {
        has_changes: tracker.has_changes(),
        modified_terms: tracker.modified_terms(),
    })
}

// ============================================================================
// Editor Mode
// ============================================================================

#[derive(Deserialize)]
pub struct ModeRequest {
    pub event: String,
    pub key: Option<String>,
}

#[derive(Serialize)]
pub struct ModeResponse {
    pub state: EditorState,
    pub effects: Vec<Effect>,
}

pub async fn mode_api(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ModeRequest>,
) -> Response {
    let event = match (body.event.as_str(), body.key) {
        ("select", Some(key)) => Event::Select { key },
        ("edit", Some(key)) => Event::Edit { key },
        ("cancel", _) => Event::Cancel,
        _ => return (StatusCode::BAD_REQUEST, "unknown mode event").into_response(),
    };

    let mut mode = state.mode.lock().unwrap();
    let (next, effects) = transition(&mode, event);
    *mode = next.clone();

    Json(ModeResponse {
        state: next,
        effects,
    })
    .into_response()
}

// ============================================================================
// Term Mutations
// ============================================================================

/// Response to every mutation: the resulting editor state, the side effects
/// the page should perform, and the current change summary for the
/// unsaved-changes indicator.
#[derive(Serialize)]
pub struct MutationResponse {
    pub key: String,
    pub term: String,
    pub state: EditorState,
    pub effects: Vec<Effect>,
    pub has_changes: bool,
    pub modified_terms: Vec<String>,
}

pub async fn save_term(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<TermUpdate>,
) -> Response {
    let mut tracker = state.tracker.lock().unwrap();

    let applied = match dataset::apply_edit(tracker.records_mut(), &key, update) {
        Ok(applied) => applied,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };
    tracker.mark_modified(&applied.term);

    let mut mode = state.mode.lock().unwrap();
    let (next, mut effects) = transition(&mode, Event::Save);
    *mode = next.clone();
    if applied.edges_changed {
        effects.push(Effect::Relayout);
    }

    Json(MutationResponse {
        key,
        term: applied.term,
        state: next,
        effects,
        has_changes: tracker.has_changes(),
        modified_terms: tracker.modified_terms(),
    })
    .into_response()
}

pub async fn create_term(
    State(state): State<Arc<AppState>>,
    Json(update): Json<TermUpdate>,
) -> Response {
    let mut tracker = state.tracker.lock().unwrap();

    let key = match dataset::create_term(tracker.records_mut(), update) {
        Ok(key) => key,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };
    let term = dataset::find_record(tracker.records(), &key)
        .map(|r| r.term.clone())
        .unwrap_or_default();
    tracker.mark_modified(&term);

    // Bind the form to the created record; new nodes always need a layout
    // pass.
    let mut mode = state.mode.lock().unwrap();
    let (next, mut effects) = transition(&mode, Event::Edit { key: key.clone() });
    *mode = next.clone();
    effects.push(Effect::Relayout);

    Json(MutationResponse {
        key,
        term,
        state: next,
        effects,
        has_changes: tracker.has_changes(),
        modified_terms: tracker.modified_terms(),
    })
    .into_response()
}

pub async fn delete_term(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let mut tracker = state.tracker.lock().unwrap();

    let term = match dataset::delete_term(tracker.records_mut(), &key) {
        Ok(term) => term,
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    };
    tracker.mark_modified(&term);

    let mut mode = state.mode.lock().unwrap();
    let (next, effects) = transition(&mode, Event::Delete);
    *mode = next.clone();

    Json(MutationResponse {
        key,
        term,
        state: next,
        effects,
        has_changes: tracker.has_changes(),
        modified_terms: tracker.modified_terms(),
    })
    .into_response()
}

// ============================================================================
// Exports
// ============================================================================

pub async fn export_patch(State(state): State<Arc<AppState>>) -> Response {
    let tracker = state.tracker.lock().unwrap();

    match tracker.patch(Utc::now().date_naive()) {
        PatchOutcome::NoChanges => {
            (StatusCode::CONFLICT, "No changes to export").into_response()
        }
        PatchOutcome::Patch { filename, body } => (
            [
                ("content-type", "text/plain; charset=utf-8".to_string()),
                (
                    "content-disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            body,
        )
            .into_response(),
    }
}

pub async fn export_json(State(state): State<Arc<AppState>>) -> Response {
    let tracker = state.tracker.lock().unwrap();
    (
        [
            ("content-type", "application/json".to_string()),
            (
                "content-disposition",
                "attachment; filename=\"knowledge-graph.json\"".to_string(),
            ),
        ],
        tracker.export_json(),
    )
        .into_response()
}

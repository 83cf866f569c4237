//! Term graph library - re-exports for testing and external use.
//!
//! A browser-based viewer/editor for a small knowledge-graph dataset. The
//! application is organized into the following modules:
//!
//! - `models`: Term records, filter state, renderer element types
//! - `dataset`: Loading, lookup, search, and the three mutations
//! - `changes`: Original/current snapshot tracking and export artifacts
//! - `patch`: The simplified line-based patch generator
//! - `graph`: Renderer element construction and the graph API
//! - `mode`: The editor state machine
//! - `templates`: HTML/CSS/JS generation for the viewer page
//! - `handlers`: HTTP route handlers

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{error, info};

pub mod changes;
pub mod dataset;
pub mod graph;
pub mod handlers;
pub mod mode;
pub mod models;
pub mod patch;
pub mod templates;

// ============================================================================
// Configuration
// ============================================================================

pub const DATA_PATH: &str = "data/knowledge-graph.json";
pub const BIND_ADDR: &str = "127.0.0.1:3000";

// ============================================================================
// Application State
// ============================================================================

/// Process-wide state, owned by the router and passed to every handler:
/// the change tracker holding both dataset snapshots, and the editor state
/// machine. Lock order where both are needed: tracker first.
pub struct AppState {
    pub data_path: PathBuf,
    pub tracker: Mutex<changes::ChangeTracker>,
    pub mode: Mutex<mode::EditorState>,
}

impl AppState {
    /// Load the dataset and freeze the original snapshot. A load failure
    /// leaves the application serving an empty dataset rather than
    /// crashing; it is reported to the log and not retried.
    pub fn new() -> Self {
        let data_path = PathBuf::from(DATA_PATH);

        let tracker = match dataset::load_dataset(&data_path) {
            Ok(records) => {
                info!(terms = records.len(), path = %data_path.display(), "dataset loaded");
                changes::ChangeTracker::new(records)
            }
            Err(e) => {
                error!(error = %e, "dataset unavailable, serving empty graph");
                changes::ChangeTracker::empty()
            }
        };

        Self {
            data_path,
            tracker: Mutex::new(tracker),
            mode: Mutex::new(mode::EditorState::Viewing),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// Re-export commonly used types
pub use changes::{canonical_serialization, ChangeTracker, PatchOutcome};
pub use dataset::{
    apply_edit, categories, create_term, delete_term, find_record, html_escape, load_dataset,
    record_key, resolve_label, search_terms, slugify, DatasetError, EditApplied, TermMatch,
    TermUpdate,
};
pub use graph::{
    build_elements, category_colors, darken_color, dataset_stats, graph_payload, node_dimensions,
    CategoryColor, GraphPayload,
};
pub use mode::{transition, Effect, EditorState, Event};
pub use models::{
    ElementEdge, ElementList, ElementNode, FilterState, GraphStats, LayoutConfig, TermEdge,
    TermRecord,
};
pub use patch::generate_patch;
pub use templates::{base_html, render_graph_js, render_viewer, GraphDataSource, RendererConfig};

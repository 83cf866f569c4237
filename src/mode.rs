//! Editor state machine.
//!
//! UI control flow is modeled as explicit state transitions instead of
//! callback cascades: the server holds one logical editor state (this is a
//! single-user tool with a single writer), mutation and mode endpoints feed
//! events through [`transition`], and the returned side-effect requests are
//! serialized back to the page, which performs them.

use serde::Serialize;

// ============================================================================
// States and Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditorState {
    /// Read-only browsing; node taps open the detail sidebar.
    Viewing,
    /// Edit mode with the form bound to the record under `key`.
    Editing { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A node was tapped.
    Select { key: String },
    /// Edit mode was entered (or the form re-bound to another record).
    Edit { key: String },
    Save,
    Delete,
    Cancel,
}

/// Side effects the page should perform after a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Open the read-only sidebar for this record.
    ShowDetails { key: String },
    /// Open the edit form bound to this record.
    ShowForm { key: String },
    /// Re-fetch elements and refresh styles in place.
    Refresh,
    /// Re-fetch elements and re-run the layout engine.
    Relayout,
    CloseSidebar,
}

// ============================================================================
// Transition Function
// ============================================================================

/// Pure transition: next state plus the side effects to perform. Events
/// that make no sense in the current state (a save with no record bound)
/// leave the state alone and request nothing.
pub fn transition(state: &EditorState, event: Event) -> (EditorState, Vec<Effect>) {
    match (state, event) {
        (EditorState::Viewing, Event::Select { key }) => (
            EditorState::Viewing,
            vec![Effect::ShowDetails { key }],
        ),
        // Selecting while editing re-binds the form, matching the original
        // viewer's edit-mode tap behavior.
        (EditorState::Editing { .. }, Event::Select { key }) => (
            EditorState::Editing { key: key.clone() },
            vec![Effect::ShowForm { key }],
        ),
        (_, Event::Edit { key }) => (
            EditorState::Editing { key: key.clone() },
            vec![Effect::ShowForm { key }],
        ),
        (EditorState::Editing { key }, Event::Save) => (
            EditorState::Editing { key: key.clone() },
            vec![Effect::Refresh],
        ),
        (EditorState::Editing { .. }, Event::Delete) => (
            EditorState::Viewing,
            vec![Effect::CloseSidebar, Effect::Relayout],
        ),
        (EditorState::Editing { .. }, Event::Cancel) => {
            (EditorState::Viewing, vec![Effect::CloseSidebar])
        }
        (state, _) => (state.clone(), Vec::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================

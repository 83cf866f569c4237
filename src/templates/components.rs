//! Shared HTML components for the term graph viewer.
//!
//! Contains the base HTML template, toolbar, filter panel, and the sidebar
//! with its read-only detail view and edit form.

use crate::dataset::html_escape;
use crate::models::{FilterState, GraphStats};

use super::styles::STYLE;

// ============================================================================
// Base Template
// ============================================================================

/// Full HTML page. The cytoscape bundle and the fCoSE extension come from
/// CDN; everything else is generated.
pub fn base_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
    <script src="https://cdn.jsdelivr.net/npm/cytoscape@3/dist/cytoscape.min.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/layout-base@2/layout-base.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/cose-base@2/cose-base.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/cytoscape-fcose@2/cytoscape-fcose.js"></script>
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
        body = body,
    )
}

// ============================================================================
// Toolbar
// ============================================================================

pub fn toolbar(stats: &GraphStats) -> String {
    format!(
        r#"<div class="toolbar">
            <h1>Knowledge Graph</h1>
            <div class="graph-stats">
                <span><strong>{terms}</strong> terms</span>
                <span><strong>{edges}</strong> relations</span>
                <span><strong>{categories}</strong> categories</span>
                <span><strong>{review}</strong> flagged for review</span>
            </div>
            <span class="spacer"></span>
            <span id="export-notice" class="hidden"></span>
            <span id="copy-feedback" class="hidden">Copied!</span>
            <span id="changes-indicator" class="hidden">&#9679; Unsaved changes</span>
            <div class="mode-controls">
                <span id="mode-indicator">View Mode</span>
                <button id="edit-toggle">Switch to Edit Mode</button>
                <button id="add-new-term" class="hidden">+ New Term</button>
                <button id="copy-json">Copy JSON</button>
                <button id="download-json">Download JSON</button>
                <button id="download-patch">Download Patch</button>
            </div>
        </div>"#,
        terms = stats.total_terms,
        edges = stats.total_edges,
        categories = stats.category_count,
        review = stats.review_count,
    )
}

// ============================================================================
// Filter Panel
// ============================================================================

/// Edge-type and category checkboxes, pre-checked from the URL's filter
/// state so shared links open with the same view.
pub fn filters_panel(categories: &[String], filter: &FilterState) -> String {
    let checked = |on: bool| if on { " checked" } else { "" };

    let all_edges = filter.synonym && filter.related && filter.other;
    let mut category_boxes = String::new();
    let mut all_categories = true;

    for category in categories {
        let enabled = filter.category_enabled(category);
        all_categories = all_categories && enabled;
        category_boxes.push_str(&format!(
            r#"<label><input type="checkbox" data-category="{value}"{checked}>{name}</label>"#,
            value = html_escape(category),
            checked = checked(enabled),
            name = html_escape(category),
        ));
    }

    format!(
        r#"<div class="filters">
            <div class="filter-group">
                <span class="filter-title">Relations</span>
                <label><input type="checkbox" id="filter-all-edges"{all_edges}>All</label>
                <label><input type="checkbox" id="filter-synonym"{synonym}><span class="edge-swatch synonym"></span>Synonym</label>
                <label><input type="checkbox" id="filter-related"{related}><span class="edge-swatch related"></span>Related</label>
                <label><input type="checkbox" id="filter-other"{other}><span class="edge-swatch other"></span>Other</label>
            </div>
            <div class="filter-group">
                <span class="filter-title">Categories</span>
                <label><input type="checkbox" id="filter-all-categories"{all_categories}>All</label>
                <span id="category-filters">{category_boxes}</span>
            </div>
        </div>"#,
        all_edges = checked(all_edges),
        synonym = checked(filter.synonym),
        related = checked(filter.related),
        other = checked(filter.other),
        all_categories = checked(all_categories),
        category_boxes = category_boxes,
    )
}

// ============================================================================
// Sidebar
// ============================================================================

/// The detail sidebar: a read-only content pane filled by the page script
/// and the edit form shown in edit mode. Edge rows are cloned from the
/// template row by the script.
pub fn sidebar_html() -> &'static str {
    r#"<div id="sidebar">
        <div class="sidebar-header">
            <span id="sidebar-term"></span>
            <button id="close-sidebar" title="Close">&times;</button>
        </div>
        <div id="sidebar-content"></div>
        <form id="sidebar-edit-form" class="hidden" onsubmit="return false;">
            <div class="form-group">
                <label for="edit-term">Term
                    <span class="review-toggle"><input type="checkbox" class="review-checkbox" data-field="term">review</span>
                </label>
                <input type="text" id="edit-term" autocomplete="off">
            </div>
            <div class="form-group">
                <label for="edit-definition">Short Definition
                    <span class="review-toggle"><input type="checkbox" class="review-checkbox" data-field="definition">review</span>
                </label>
                <textarea id="edit-definition"></textarea>
            </div>
            <div class="form-group">
                <label for="edit-explanation">Why It Matters
                    <span class="review-toggle"><input type="checkbox" class="review-checkbox" data-field="explanation">review</span>
                </label>
                <textarea id="edit-explanation"></textarea>
            </div>
            <div class="form-group">
                <label for="edit-synonyms">Synonyms
                    <span class="review-toggle"><input type="checkbox" class="review-checkbox" data-field="synonyms">review</span>
                </label>
                <input type="text" id="edit-synonyms">
            </div>
            <div class="form-group">
                <label for="edit-acronyms">Acronyms
                    <span class="review-toggle"><input type="checkbox" class="review-checkbox" data-field="acronyms">review</span>
                </label>
                <input type="text" id="edit-acronyms">
            </div>
            <div class="form-group">
                <label for="edit-technical-summary">Technical Summary
                    <span class="review-toggle"><input type="checkbox" class="review-checkbox" data-field="technical_summary">review</span>
                </label>
                <textarea id="edit-technical-summary"></textarea>
            </div>
            <div class="form-group">
                <label for="edit-category">Category</label>
                <select id="edit-category"></select>
                <input type="text" id="edit-category-custom" class="hidden" placeholder="New category name">
            </div>
            <div class="form-group">
                <label>Connections</label>
                <div id="edges-list"></div>
                <button type="button" id="add-edge">+ Add connection</button>
            </div>
            <div class="form-error hidden" id="form-error"></div>
            <div class="form-actions">
                <button type="button" class="primary" id="save-term">Save</button>
                <button type="button" id="cancel-edit">Cancel</button>
                <button type="button" class="danger" id="delete-term">Delete</button>
            </div>
        </form>
    </div>
    <div id="tooltip"></div>"#
}

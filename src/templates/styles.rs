//! CSS styles for the term graph viewer.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
:root {
    --bg: #ffffff;
    --fg: #333333;
    --muted: #6c757d;
    --border: #dee2e6;
    --accent: #f8f9fa;
    --link: #2980b9;
    --danger: #e74c3c;
    --warn: #f39c12;
    --ok: #27ae60;
    --node-fill: #f8f9fa;
    --edit-bg: #fff8e6;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.5;
    color: var(--fg);
    background: var(--bg);
    overflow: hidden;
}

a { color: var(--link); text-decoration: none; }
a:hover { text-decoration: underline; }

button {
    font-family: inherit;
    font-size: 0.85rem;
    padding: 0.4rem 0.8rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--accent);
    color: var(--fg);
    cursor: pointer;
}
button:hover { background: var(--border); }
button.primary { background: var(--link); border-color: var(--link); color: #fff; }
button.danger { background: var(--danger); border-color: var(--danger); color: #fff; }
.hidden { display: none !important; }

/* ---- Toolbar ---- */

.toolbar {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    flex-wrap: wrap;
    padding: 0.6rem 1rem;
    border-bottom: 1px solid var(--border);
    background: var(--accent);
}
.toolbar h1 { font-size: 1.05rem; font-weight: 600; margin-right: 0.5rem; }
.toolbar .spacer { flex: 1; }

.mode-controls { display: flex; align-items: center; gap: 0.5rem; }
#mode-indicator {
    font-size: 0.8rem;
    color: var(--muted);
    padding: 0.2rem 0.5rem;
    border: 1px solid var(--border);
    border-radius: 10px;
}
#edit-toggle.active { background: var(--warn); border-color: var(--warn); color: #fff; }

#changes-indicator {
    font-size: 0.8rem;
    color: var(--warn);
    font-weight: 600;
}

.graph-stats {
    display: flex;
    gap: 1rem;
    font-size: 0.8rem;
    color: var(--muted);
}

#copy-feedback { font-size: 0.8rem; color: var(--ok); }
#export-notice { font-size: 0.8rem; color: var(--muted); font-style: italic; }

/* ---- Filter panel ---- */

.filters {
    display: flex;
    gap: 1.5rem;
    align-items: flex-start;
    flex-wrap: wrap;
    padding: 0.5rem 1rem;
    border-bottom: 1px solid var(--border);
    font-size: 0.82rem;
}
.filter-group { display: flex; gap: 0.75rem; align-items: center; flex-wrap: wrap; }
.filter-group .filter-title { font-weight: 600; color: var(--muted); }
.filter-group label { display: flex; align-items: center; gap: 0.25rem; cursor: pointer; }

.edge-swatch { width: 14px; height: 3px; display: inline-block; border-radius: 1px; }
.edge-swatch.synonym { background: #27ae60; }
.edge-swatch.related { background: #f39c12; }
.edge-swatch.other { background: #bdc3c7; }

/* ---- Graph container ---- */

#cy {
    width: 100%;
    height: calc(100vh - 110px);
    background: var(--bg);
}

#tooltip {
    display: none;
    position: absolute;
    max-width: 320px;
    background: rgba(40, 44, 52, 0.95);
    color: #fff;
    border-radius: 5px;
    padding: 0.5rem 0.7rem;
    font-size: 0.8rem;
    pointer-events: none;
    z-index: 1000;
}

/* ---- Sidebar ---- */

#sidebar {
    position: fixed;
    top: 0;
    right: -420px;
    width: 400px;
    height: 100vh;
    background: var(--bg);
    border-left: 1px solid var(--border);
    box-shadow: -4px 0 16px rgba(0,0,0,0.08);
    transition: right 0.2s ease;
    z-index: 1500;
    display: flex;
    flex-direction: column;
}
#sidebar.active { right: 0; }

.sidebar-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.8rem 1rem;
    border-bottom: 1px solid var(--border);
}
#sidebar-term { font-size: 1.05rem; font-weight: 600; }
#close-sidebar {
    border: none;
    background: none;
    font-size: 1.3rem;
    color: var(--muted);
    cursor: pointer;
    padding: 0 0.3rem;
}

#sidebar-content, #sidebar-edit-form {
    padding: 1rem;
    overflow-y: auto;
    flex: 1;
}

.sidebar-section { margin-bottom: 1rem; }
.sidebar-section h4 {
    font-size: 0.78rem;
    text-transform: uppercase;
    letter-spacing: 0.04em;
    color: var(--muted);
    margin-bottom: 0.25rem;
}
.sidebar-section p { font-size: 0.88rem; }

.review-flag { color: var(--danger); font-size: 0.75rem; }

.connections-list { list-style: none; }
.connections-list li { margin-bottom: 0.3rem; font-size: 0.85rem; }
.edge-type {
    display: inline-block;
    font-size: 0.7rem;
    padding: 0.1rem 0.4rem;
    border-radius: 3px;
    background: #bdc3c7;
    color: #fff;
    margin-right: 0.3rem;
}
.edge-type.synonym { background: #27ae60; }
.edge-type.related { background: #f39c12; }

/* ---- Edit form ---- */

#sidebar-edit-form .form-group { margin-bottom: 0.75rem; }
#sidebar-edit-form label {
    display: block;
    font-size: 0.78rem;
    font-weight: 600;
    margin-bottom: 0.2rem;
}
#sidebar-edit-form input[type="text"],
#sidebar-edit-form textarea,
#sidebar-edit-form select {
    width: 100%;
    padding: 0.4rem 0.55rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    font-size: 0.85rem;
    font-family: inherit;
    background: var(--bg);
    color: var(--fg);
}
#sidebar-edit-form textarea { min-height: 64px; resize: vertical; }

.field-marked-for-review { border-color: var(--danger) !important; background: #fdf0ef; }
.review-toggle {
    display: inline-flex;
    align-items: center;
    gap: 0.25rem;
    font-size: 0.72rem;
    font-weight: 400;
    color: var(--muted);
    margin-left: 0.5rem;
}

.edge-item {
    display: flex;
    gap: 0.35rem;
    align-items: center;
    margin-bottom: 0.4rem;
}
.edge-item select { width: 110px; flex: none; }
.edge-item .custom-type { width: 90px; flex: none; }
.edge-item .remove-edge {
    flex: none;
    border: none;
    background: none;
    color: var(--danger);
    font-size: 1rem;
    cursor: pointer;
    padding: 0 0.2rem;
}

.autocomplete-container { position: relative; flex: 1; }
.autocomplete-dropdown {
    position: absolute;
    top: 100%;
    left: 0;
    right: 0;
    background: var(--bg);
    border: 1px solid var(--border);
    border-radius: 0 0 4px 4px;
    max-height: 220px;
    overflow-y: auto;
    z-index: 2000;
    box-shadow: 0 4px 12px rgba(0,0,0,0.12);
}
.autocomplete-item {
    display: flex;
    justify-content: space-between;
    gap: 0.5rem;
    padding: 0.35rem 0.55rem;
    font-size: 0.82rem;
    cursor: pointer;
}
.autocomplete-item:hover, .autocomplete-item.active { background: var(--accent); }
.autocomplete-item .term-category { color: var(--muted); font-size: 0.72rem; }

.form-actions {
    display: flex;
    gap: 0.5rem;
    margin-top: 1rem;
    padding-top: 0.75rem;
    border-top: 1px solid var(--border);
}

.form-error { color: var(--danger); font-size: 0.8rem; margin-top: 0.5rem; }
"#;

//! HTML templates and styling for the term graph viewer.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Toolbar, filter panel, sidebar, base template
//! - `graph_js` - Parameterized cytoscape engine script
//! - `viewer` - Page assembly

mod components;
mod graph_js;
mod styles;
mod viewer;

pub use components::{base_html, filters_panel, sidebar_html, toolbar};
pub use graph_js::{render_graph_js, GraphDataSource, RendererConfig};
pub use styles::STYLE;
pub use viewer::render_viewer;

//! Viewer page assembly.

use crate::models::{FilterState, LayoutConfig};

use super::components::{base_html, filters_panel, sidebar_html, toolbar};
use super::graph_js::{render_graph_js, GraphDataSource, RendererConfig};
use crate::graph::GraphPayload;

/// Render the full viewer page: toolbar, filter panel, graph container,
/// sidebar, and the engine script with the payload embedded inline.
pub fn render_viewer(payload: &GraphPayload, filter: &FilterState) -> String {
    let graph_json = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());

    let config = RendererConfig {
        container_id: "cy".to_string(),
        layout: LayoutConfig::default(),
        filter: filter.clone(),
        data_source: GraphDataSource::Inline { graph_json },
    };

    let body = format!(
        "{toolbar}\n{filters}\n<div id=\"cy\"></div>\n{sidebar}\n{script}",
        toolbar = toolbar(&payload.stats),
        filters = filters_panel(&payload.categories, filter),
        sidebar = sidebar_html(),
        script = render_graph_js(&config),
    );

    base_html("Knowledge Graph", &body)
}

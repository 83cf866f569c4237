//! Renderer element construction and the graph API.
//!
//! Turns the term list into the node/edge element list consumed by the
//! layout engine, assigns category colors, and computes the toolbar
//! statistics. The layout itself (force simulation, overlap removal) is
//! entirely the rendering library's job.

use crate::dataset::{categories, record_key};
use crate::models::{
    EdgeElement, ElementEdge, ElementList, ElementNode, GraphStats, NodeElement, TermRecord,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::AppState;

// ============================================================================
// Category Colors
// ============================================================================

/// Fixed palette cycled by category index.
const CATEGORY_PALETTE: &[&str] = &[
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#34495e", "#e67e22",
    "#95a5a6", "#f1c40f", "#8e44ad", "#16a085", "#27ae60", "#2980b9", "#c0392b",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryColor {
    pub background: String,
    pub border: String,
}

/// Assign a fill/border pair to each category, in the given order. The
/// border is the fill darkened by 20%.
pub fn category_colors(categories: &[String]) -> HashMap<String, CategoryColor> {
    categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let background = CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()];
            (
                category.clone(),
                CategoryColor {
                    background: background.to_string(),
                    border: darken_color(background, 0.2),
                },
            )
        })
        .collect()
}

/// Darken a `#rrggbb` color by `factor` (0.2 = 20%), clamping channels.
pub fn darken_color(hex: &str, factor: f64) -> String {
    let num = u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0);
    let amt = (2.55 * factor * 100.0).round() as i32;

    let channel = |value: i32| -> u32 { value.clamp(0, 255) as u32 };
    let r = channel(((num >> 16) & 0xff) as i32 - amt);
    let g = channel(((num >> 8) & 0xff) as i32 - amt);
    let b = channel((num & 0xff) as i32 - amt);

    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

// ============================================================================
// Element Construction
// ============================================================================

/// Build the element list in two passes: one node per record, then edges -
/// synthesizing a placeholder stub node for any edge target that does not
/// resolve to a known record, so dangling references render instead of
/// breaking the graph.
pub fn build_elements(records: &[TermRecord]) -> ElementList {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut known: HashSet<String> = HashSet::new();

    for record in records {
        let key = record_key(record);
        if !known.insert(key.clone()) {
            continue;
        }
        nodes.push(node_element(key, record));
    }

    for record in records {
        let source = record_key(record);
        for edge in &record.edges {
            if known.insert(edge.target.clone()) {
                debug!(edge_target = %edge.target, source = %source, "synthesizing stub for dangling edge target");
                let mut stub = TermRecord::stub(&edge.target);
                stub.id = Some(edge.target.clone());
                nodes.push(node_element(edge.target.clone(), &stub));
            }

            edges.push(EdgeElement {
                data: ElementEdge {
                    id: format!("{}-{}-{}", source, edge.target, edge.edge_type),
                    source: source.clone(),
                    target: edge.target.clone(),
                    edge_type: edge.edge_type.clone(),
                },
            });
        }
    }

    ElementList { nodes, edges }
}

fn node_element(key: String, record: &TermRecord) -> NodeElement {
    let label_length = record.term.chars().count();
    let (width, height) = node_dimensions(label_length);
    NodeElement {
        data: ElementNode {
            id: key,
            label: record.term.clone(),
            definition: record.definition.clone(),
            explanation: record.explanation.clone(),
            category: record.display_category().to_string(),
            has_definition: !record.definition.is_empty(),
            label_length,
            width,
            height,
            full_data: record.clone(),
        },
    }
}

/// Node box size from label length: a linear ramp over lengths 10..50,
/// clamped outside it (width 80..160, height 40..80).
pub fn node_dimensions(label_length: usize) -> (u32, u32) {
    (
        map_dimension(label_length, 80.0, 160.0),
        map_dimension(label_length, 40.0, 80.0),
    )
}

fn map_dimension(label_length: usize, out_min: f64, out_max: f64) -> u32 {
    const IN_MIN: f64 = 10.0;
    const IN_MAX: f64 = 50.0;
    let t = ((label_length as f64 - IN_MIN) / (IN_MAX - IN_MIN)).clamp(0.0, 1.0);
    (out_min + t * (out_max - out_min)).round() as u32
}

// ============================================================================
// Statistics
// ============================================================================

pub fn dataset_stats(records: &[TermRecord], elements: &ElementList) -> GraphStats {
    GraphStats {
        total_terms: records.len(),
        total_nodes: elements.nodes.len(),
        total_edges: elements.edges.len(),
        category_count: categories(records).len(),
        review_count: records
            .iter()
            .filter(|r| !r.fields_to_review.is_empty())
            .count(),
        stub_count: elements.nodes.len().saturating_sub(records.len()),
    }
}

// ============================================================================
// Graph API
// ============================================================================

#[derive(Serialize)]
pub struct GraphPayload {
    pub elements: ElementList,
    pub categories: Vec<String>,
    pub category_colors: HashMap<String, CategoryColor>,
    pub stats: GraphStats,
}

/// Everything the page needs to (re)draw: elements, categories with their
/// colors, and the toolbar stats.
pub fn graph_payload(records: &[TermRecord]) -> GraphPayload {
    let elements = build_elements(records);
    let stats = dataset_stats(records, &elements);
    let categories = categories(records);
    let category_colors = category_colors(&categories);

    GraphPayload {
        elements,
        categories,
        category_colors,
        stats,
    }
}

pub async fn graph_api(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tracker = state.tracker.lock().unwrap();
    Json(graph_payload(tracker.records()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TermEdge;

    fn record_with_edges(id: &str, term: &str, edges: &[(&str, &str)]) -> TermRecord {
        TermRecord {
            id: Some(id.to_string()),
            edges: edges
                .iter()
                .map(|(edge_type, target)| TermEdge {
                    edge_type: edge_type.to_string(),
                    target: target.to_string(),
                })
                .collect(),
            ..TermRecord::stub(term)
        }
    }

    #[test]
    fn build_elements_synthesizes_stubs_for_dangling_targets() {
        let records = vec![
            record_with_edges("a", "Alpha", &[("related", "b"), ("mentions", "ghost")]),
            record_with_edges("b", "Beta", &[]),
        ];
        let elements = build_elements(&records);

        assert_eq!(elements.nodes.len(), 3, "two records plus one stub");
        assert_eq!(elements.edges.len(), 2);

        let stub = elements
            .nodes
            .iter()
            .find(|n| n.data.id == "ghost")
            .expect("stub node");
        assert_eq!(stub.data.label, "ghost");
        assert_eq!(stub.data.category, "General");
        assert!(!stub.data.has_definition);
    }

    #[test]
    fn edge_ids_encode_source_target_and_type() {
        let records = vec![
            record_with_edges("a", "Alpha", &[("synonym", "b")]),
            record_with_edges("b", "Beta", &[]),
        ];
        let elements = build_elements(&records);
        assert_eq!(elements.edges[0].data.id, "a-b-synonym");
    }

    #[test]
    fn stats_count_stubs_and_review_flags() {
        let mut records = vec![
            record_with_edges("a", "Alpha", &[("related", "ghost")]),
            record_with_edges("b", "Beta", &[]),
        ];
        records[1].fields_to_review = vec!["definition".to_string()];

        let elements = build_elements(&records);
        let stats = dataset_stats(&records, &elements);

        assert_eq!(stats.total_terms, 2);
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.total_edges, 1);
        assert_eq!(stats.stub_count, 1);
        assert_eq!(stats.review_count, 1);
    }

    #[test]
    fn node_dimensions_are_monotone_and_clamped() {
        assert_eq!(node_dimensions(0), (80, 40));
        assert_eq!(node_dimensions(10), (80, 40));
        assert_eq!(node_dimensions(30), (120, 60));
        assert_eq!(node_dimensions(50), (160, 80));
        assert_eq!(node_dimensions(200), (160, 80));

        let mut previous = 0;
        for length in 0..60 {
            let (width, _) = node_dimensions(length);
            assert!(width >= previous, "width must not shrink at length {length}");
            previous = width;
        }
    }

    #[test]
    fn palette_assignment_is_stable_and_cycles() {
        let categories: Vec<String> = (0..17).map(|i| format!("cat{}", i)).collect();
        let colors = category_colors(&categories);
        assert_eq!(colors["cat0"].background, CATEGORY_PALETTE[0]);
        assert_eq!(colors["cat15"].background, CATEGORY_PALETTE[0]);
        assert_eq!(colors["cat16"].background, CATEGORY_PALETTE[1]);
    }

    #[test]
    fn darken_subtracts_and_clamps_at_black() {
        // 20% of full scale is 51 per channel.
        assert_eq!(darken_color("#3498db", 0.2), "#0165a8");
        assert_eq!(darken_color("#000000", 0.5), "#000000");
    }
}

//! Data models for the term graph application.
//!
//! This module contains the core data structures used throughout the
//! application: term records and their typed edges, the element list handed
//! to the cytoscape renderer, filter state, dataset statistics, and the
//! layout tuning parameters for the fCoSE layout engine.

use serde::{Deserialize, Serialize};

// ============================================================================
// Term Records
// ============================================================================

/// One entry of the knowledge-graph dataset: a concept with metadata and
/// outgoing typed relations.
///
/// All fields except `term` are optional in the input file. Older datasets
/// (produced before identifiers were introduced) carry no `id` and key
/// records by display name instead; see [`crate::dataset::record_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub term: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub definition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub synonyms: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub acronyms: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub technical_summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<TermEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields_to_review: Vec<String>,
}

impl TermRecord {
    /// A record with only a display name, as emitted for synonym/related
    /// stubs by the CSV ingest script.
    pub fn stub(term: &str) -> Self {
        TermRecord {
            id: None,
            term: term.to_string(),
            definition: String::new(),
            explanation: String::new(),
            synonyms: String::new(),
            acronyms: String::new(),
            technical_summary: String::new(),
            category: String::new(),
            edges: Vec::new(),
            fields_to_review: Vec::new(),
        }
    }

    /// Category for display purposes; empty maps to "General".
    pub fn display_category(&self) -> &str {
        if self.category.is_empty() {
            "General"
        } else {
            &self.category
        }
    }
}

/// A directed, typed relation owned by its source record. `target` names
/// another record's identity key; dangling targets are tolerated and
/// materialized as placeholder nodes by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEdge {
    #[serde(rename = "type")]
    pub edge_type: String,
    pub target: String,
}

// ============================================================================
// Renderer Element List
// ============================================================================

/// Node payload consumed by the cytoscape renderer. Field names are
/// camelCased to match what the generated page script and the style
/// mappers (`mapData(labelLength, ...)`) expect.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub id: String,
    pub label: String,
    pub definition: String,
    pub explanation: String,
    pub category: String,
    pub has_definition: bool,
    pub label_length: usize,
    /// Box dimensions derived from the label length; the renderer's style
    /// reads these instead of measuring.
    pub width: u32,
    pub height: u32,
    /// Full record for the sidebar; stubs synthesized for dangling targets
    /// carry a minimal record here.
    pub full_data: TermRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeElement {
    pub data: ElementNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeElement {
    pub data: ElementEdge,
}

/// The node/edge element list handed to the layout engine.
#[derive(Debug, Clone, Serialize)]
pub struct ElementList {
    pub nodes: Vec<NodeElement>,
    pub edges: Vec<EdgeElement>,
}

// ============================================================================
// Dataset Statistics
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    /// Records present in the dataset file.
    pub total_terms: usize,
    /// Rendered nodes, including placeholder stubs.
    pub total_nodes: usize,
    pub total_edges: usize,
    pub category_count: usize,
    /// Records with at least one field flagged for review.
    pub review_count: usize,
    /// Placeholder nodes synthesized for unresolved edge targets.
    pub stub_count: usize,
}

// ============================================================================
// Filter State
// ============================================================================
//
// Query-string parameters (all optional; omitted = everything enabled):
//   edges=synonym,related   - enabled edge-type toggles (synonym/related/other)
//   categories=A,B          - enabled category checkboxes
//   node=KEY                - selected node, reapplied after load

/// Checkbox state of the edge-type and category filters plus the selected
/// node, round-tripped through the page URL so views are shareable.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub synonym: bool,
    pub related: bool,
    /// Free-form custom edge types are grouped under one toggle.
    pub other: bool,
    /// None = all categories enabled.
    pub categories: Option<Vec<String>>,
    pub node: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            synonym: true,
            related: true,
            other: true,
            categories: None,
            node: None,
        }
    }
}

impl FilterState {
    /// Parse a raw query string (`edges=synonym&categories=A,B&node=x`).
    /// Unknown parameters are ignored; absent parameters leave the default
    /// (everything enabled) in place.
    pub fn parse(query: &str) -> Self {
        let mut fs = FilterState::default();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());

            match key {
                "edges" => {
                    fs.synonym = false;
                    fs.related = false;
                    fs.other = false;
                    for kind in value.split(',').filter(|k| !k.is_empty()) {
                        match kind {
                            "synonym" => fs.synonym = true,
                            "related" => fs.related = true,
                            "other" => fs.other = true,
                            _ => {}
                        }
                    }
                }
                "categories" => {
                    let cats: Vec<String> = value
                        .split(',')
                        .filter(|c| !c.is_empty())
                        .map(|c| c.to_string())
                        .collect();
                    fs.categories = Some(cats);
                }
                "node" => {
                    if !value.is_empty() {
                        fs.node = Some(value);
                    }
                }
                _ => {}
            }
        }

        fs
    }

    /// Encode back to a query string. Parameters are emitted only for
    /// non-default state, mirroring what the page script writes with
    /// `history.replaceState`.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if !(self.synonym && self.related && self.other) {
            let mut kinds = Vec::new();
            if self.synonym {
                kinds.push("synonym");
            }
            if self.related {
                kinds.push("related");
            }
            if self.other {
                kinds.push("other");
            }
            params.push(format!("edges={}", kinds.join(",")));
        }

        if let Some(ref cats) = self.categories {
            let encoded: Vec<String> = cats
                .iter()
                .map(|c| urlencoding::encode(c).into_owned())
                .collect();
            params.push(format!("categories={}", encoded.join(",")));
        }

        if let Some(ref node) = self.node {
            params.push(format!("node={}", urlencoding::encode(node)));
        }

        params.join("&")
    }

    /// True when the given edge type passes the current toggles.
    pub fn edge_type_enabled(&self, edge_type: &str) -> bool {
        match edge_type {
            "synonym" => self.synonym,
            "related" => self.related,
            _ => self.other,
        }
    }

    /// True when the given category passes the current checkboxes.
    pub fn category_enabled(&self, category: &str) -> bool {
        match self.categories {
            Some(ref cats) => cats.iter().any(|c| c == category),
            None => true,
        }
    }
}

// ============================================================================
// Layout Configuration
// ============================================================================

/// Tuning parameters for the fCoSE layout engine, serialized into the page
/// as the layout options object. The layout algorithm itself is entirely
/// the engine's concern; these values only parameterize it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub name: String,
    pub quality: String,
    pub randomize: bool,
    pub animate: bool,
    pub fit: bool,
    pub padding: u32,
    pub node_dimensions_include_labels: bool,
    pub uniform_node_dimensions: bool,
    pub pack_components: bool,
    pub step: String,
    pub node_separation: u32,
    pub pi_tol: f64,
    pub node_repulsion: u64,
    pub ideal_edge_length: u32,
    pub edge_elasticity: f64,
    pub nesting_factor: f64,
    pub num_iter: u32,
    pub gravity: f64,
    pub gravity_range: f64,
    pub gravity_compound: f64,
    pub gravity_range_compound: f64,
    pub initial_energy_on_incremental: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            name: "fcose".to_string(),
            quality: "default".to_string(),
            randomize: false,
            animate: false,
            fit: true,
            padding: 20,
            node_dimensions_include_labels: false,
            uniform_node_dimensions: false,
            pack_components: false,
            step: "all".to_string(),
            node_separation: 7500,
            pi_tol: 0.0001,
            node_repulsion: 2_000_000,
            ideal_edge_length: 80,
            edge_elasticity: 2.0,
            nesting_factor: 0.1,
            num_iter: 2500,
            gravity: 0.0,
            gravity_range: 3.8,
            gravity_compound: 1.0,
            gravity_range_compound: 1.5,
            initial_energy_on_incremental: 0.3,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_state_defaults_to_everything_enabled() {
        let fs = FilterState::parse("");
        assert_eq!(fs, FilterState::default());
        assert!(fs.edge_type_enabled("synonym"));
        assert!(fs.edge_type_enabled("mentions"));
        assert!(fs.category_enabled("Anything"));
        assert_eq!(fs.to_query_string(), "");
    }

    #[test]
    fn filter_state_round_trips() {
        let fs = FilterState {
            synonym: true,
            related: false,
            other: true,
            categories: Some(vec!["Machine Learning".to_string(), "NLP".to_string()]),
            node: Some("neural_network".to_string()),
        };
        let qs = fs.to_query_string();
        assert_eq!(FilterState::parse(&qs), fs);
    }

    #[test]
    fn filter_state_encodes_spaces_in_categories() {
        let fs = FilterState {
            categories: Some(vec!["Machine Learning".to_string()]),
            ..FilterState::default()
        };
        assert_eq!(fs.to_query_string(), "categories=Machine%20Learning");
    }

    #[test]
    fn edges_param_restricts_to_listed_kinds() {
        let fs = FilterState::parse("edges=synonym");
        assert!(fs.synonym);
        assert!(!fs.related);
        assert!(!fs.other);
        assert!(fs.edge_type_enabled("synonym"));
        assert!(!fs.edge_type_enabled("related"));
        assert!(!fs.edge_type_enabled("mentions"));
    }

    #[test]
    fn empty_categories_param_disables_all() {
        let fs = FilterState::parse("categories=");
        assert_eq!(fs.categories, Some(Vec::new()));
        assert!(!fs.category_enabled("General"));
    }

    #[test]
    fn stub_record_serializes_to_term_only() {
        let json = serde_json::to_string(&TermRecord::stub("AGI")).unwrap();
        assert_eq!(json, r#"{"term":"AGI"}"#);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let rec: TermRecord = serde_json::from_str(r#"{"term": "AGI"}"#).unwrap();
        assert_eq!(rec.id, None);
        assert_eq!(rec.definition, "");
        assert!(rec.edges.is_empty());
        assert!(rec.fields_to_review.is_empty());
    }
}

//! Dataset loading, lookup, search, and mutation.
//!
//! This module handles all operations on the term list itself:
//! - Loading and parsing the JSON dataset file
//! - Identity keys (explicit `id` or a slug derived from the display name)
//! - Autocomplete search for the edge-target picker
//! - The three mutations: field-wise edit, create, delete-with-cascade
//!
//! Mutations operate on the working copy owned by
//! [`crate::changes::ChangeTracker`]; callers mark records modified there.

use crate::models::{TermEdge, TermRecord};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Autocomplete results are capped at this many matches.
const SEARCH_LIMIT: usize = 10;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone)]
pub enum DatasetError {
    /// The dataset file could not be read.
    Read(String),
    /// The file was read but is not a valid term array.
    Parse(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Read(msg) => write!(f, "cannot read dataset: {}", msg),
            DatasetError::Parse(msg) => write!(f, "cannot parse dataset: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}

// ============================================================================
// Loading
// ============================================================================

/// Load the dataset file: a JSON array of term records. Records missing
/// optional fields (including bare `{"term": ...}` stubs from the CSV
/// ingest script) load with empty defaults.
pub fn load_dataset(path: &Path) -> Result<Vec<TermRecord>, DatasetError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| DatasetError::Read(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| DatasetError::Parse(e.to_string()))
}

// ============================================================================
// Identity Keys
// ============================================================================

/// Derive a stable identifier from a display name: lowercase, whitespace
/// and `-`/`/` collapsed to underscores, parentheses, dots, commas, and
/// quotes stripped.
pub fn slugify(term: &str) -> String {
    let spaced = Regex::new(r"\s+").unwrap().replace_all(term.trim(), "_");
    spaced
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            '(' | ')' | '.' | ',' | '\'' | '"' => None,
            '/' | '-' => Some('_'),
            c => Some(c),
        })
        .collect()
}

/// The identity key of a record: its explicit `id` when present, otherwise
/// the slug of its display name.
pub fn record_key(record: &TermRecord) -> String {
    match record.id {
        Some(ref id) => id.clone(),
        None => slugify(&record.term),
    }
}

pub fn find_record<'a>(records: &'a [TermRecord], key: &str) -> Option<&'a TermRecord> {
    records.iter().find(|r| record_key(r) == key)
}

/// Unique categories in first-occurrence order, empty mapped to "General".
pub fn categories(records: &[TermRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        let category = record.display_category();
        if seen.insert(category.to_string()) {
            out.push(category.to_string());
        }
    }
    out
}

/// Display name for an edge target: the record's term when the key
/// resolves, the raw key otherwise.
pub fn resolve_label(records: &[TermRecord], target: &str) -> String {
    find_record(records, target)
        .map(|r| r.term.clone())
        .unwrap_or_else(|| target.to_string())
}

// ============================================================================
// Autocomplete Search
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermMatch {
    pub key: String,
    pub term: String,
    pub category: String,
}

/// Case-insensitive substring search over display names for the
/// edge-target picker. Empty queries match nothing; results are capped at
/// ten, in dataset order.
pub fn search_terms(records: &[TermRecord], query: &str) -> Vec<TermMatch> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| !r.term.is_empty() && r.term.to_lowercase().contains(&query))
        .take(SEARCH_LIMIT)
        .map(|r| TermMatch {
            key: record_key(r),
            term: r.term.clone(),
            category: r.display_category().to_string(),
        })
        .collect()
}

// ============================================================================
// Mutations
// ============================================================================

/// Field values submitted by the edit form. Edges arrive with target keys
/// picked from autocomplete; ones that do not resolve are dropped rather
/// than creating terms implicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermUpdate {
    pub term: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub synonyms: String,
    #[serde(default)]
    pub acronyms: String,
    #[serde(default)]
    pub technical_summary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub edges: Vec<TermEdge>,
    #[serde(default)]
    pub fields_to_review: Vec<String>,
}

/// Result of a successful edit: the (possibly renamed) display name and
/// whether the edge set changed, which tells the page to re-run layout.
pub struct EditApplied {
    pub term: String,
    pub edges_changed: bool,
}

/// Apply the form's field values to the record identified by `key`.
pub fn apply_edit(
    records: &mut Vec<TermRecord>,
    key: &str,
    update: TermUpdate,
) -> Result<EditApplied, String> {
    if update.term.trim().is_empty() {
        return Err("term name cannot be empty".to_string());
    }

    let new_edges = resolvable_edges(records, update.edges);

    let record = records
        .iter_mut()
        .find(|r| record_key(r) == key)
        .ok_or_else(|| format!("no term with key '{}'", key))?;

    let edges_changed = record.edges != new_edges;

    record.term = update.term;
    record.definition = update.definition;
    record.explanation = update.explanation;
    record.synonyms = update.synonyms;
    record.acronyms = update.acronyms;
    record.technical_summary = update.technical_summary;
    // An empty category submission keeps the previous one.
    if !update.category.trim().is_empty() {
        record.category = update.category.trim().to_string();
    }
    record.edges = new_edges;
    record.fields_to_review = update.fields_to_review;

    Ok(EditApplied {
        term: record.term.clone(),
        edges_changed,
    })
}

/// Append a new term. The identity key is the slug of the display name;
/// collisions with existing keys are rejected.
pub fn create_term(records: &mut Vec<TermRecord>, update: TermUpdate) -> Result<String, String> {
    let term = update.term.trim().to_string();
    if term.is_empty() {
        return Err("term name cannot be empty".to_string());
    }

    let key = slugify(&term);
    if find_record(records, &key).is_some() {
        return Err(format!("a term with key '{}' already exists", key));
    }

    let edges = resolvable_edges(records, update.edges);
    let category = if update.category.trim().is_empty() {
        "General".to_string()
    } else {
        update.category.trim().to_string()
    };

    records.push(TermRecord {
        id: Some(key.clone()),
        term,
        definition: update.definition,
        explanation: update.explanation,
        synonyms: update.synonyms,
        acronyms: update.acronyms,
        technical_summary: update.technical_summary,
        category,
        edges,
        fields_to_review: update.fields_to_review,
    });

    Ok(key)
}

/// Remove the record identified by `key` and cascade: every other record's
/// edges pointing at it are dropped as well.
pub fn delete_term(records: &mut Vec<TermRecord>, key: &str) -> Result<String, String> {
    let index = records
        .iter()
        .position(|r| record_key(r) == key)
        .ok_or_else(|| format!("no term with key '{}'", key))?;

    let removed = records.remove(index);
    for record in records.iter_mut() {
        record.edges.retain(|e| e.target != key);
    }

    Ok(removed.term)
}

/// Keep only edges whose target resolves to an existing record.
fn resolvable_edges(records: &[TermRecord], edges: Vec<TermEdge>) -> Vec<TermEdge> {
    edges
        .into_iter()
        .filter(|e| !e.edge_type.is_empty() && find_record(records, &e.target).is_some())
        .collect()
}

// ============================================================================
// HTML Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, term: &str) -> TermRecord {
        TermRecord {
            id: Some(id.to_string()),
            category: "General".to_string(),
            ..TermRecord::stub(term)
        }
    }

    fn with_edge(mut record: TermRecord, edge_type: &str, target: &str) -> TermRecord {
        record.edges.push(TermEdge {
            edge_type: edge_type.to_string(),
            target: target.to_string(),
        });
        record
    }

    fn sample() -> Vec<TermRecord> {
        vec![
            with_edge(
                record("neural_network", "Neural Network"),
                "related",
                "deep_learning",
            ),
            record("deep_learning", "Deep Learning"),
            with_edge(record("ann", "ANN"), "synonym", "neural_network"),
            TermRecord::stub("Perceptron"),
        ]
    }

    #[test]
    fn slugify_matches_identifier_rules() {
        assert_eq!(slugify("Neural Network"), "neural_network");
        assert_eq!(slugify("GPT-4 (OpenAI)"), "gpt_4_openai");
        assert_eq!(slugify("input/output"), "input_output");
        assert_eq!(slugify("  spaced   out  "), "spaced_out");
        assert_eq!(slugify("don't \"quote\" me, please."), "dont_quote_me_please");
    }

    #[test]
    fn record_key_prefers_explicit_id() {
        let explicit = record("custom_id", "Something Else");
        assert_eq!(record_key(&explicit), "custom_id");

        let keyed_by_name = TermRecord::stub("Gradient Descent");
        assert_eq!(record_key(&keyed_by_name), "gradient_descent");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = sample();
        let matches = search_terms(&records, "net");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "neural_network");

        assert!(search_terms(&records, "LEARN").iter().any(|m| m.key == "deep_learning"));
        assert!(search_terms(&records, "").is_empty());
        assert!(search_terms(&records, "   ").is_empty());
    }

    #[test]
    fn search_caps_results_at_ten() {
        let records: Vec<TermRecord> = (0..25)
            .map(|i| TermRecord::stub(&format!("Common Term {}", i)))
            .collect();
        assert_eq!(search_terms(&records, "common").len(), 10);
    }

    #[test]
    fn apply_edit_updates_fields_and_reports_edge_change() {
        let mut records = sample();
        let applied = apply_edit(
            &mut records,
            "deep_learning",
            TermUpdate {
                term: "Deep Learning".to_string(),
                definition: "Layered representation learning".to_string(),
                category: "Machine Learning".to_string(),
                edges: vec![TermEdge {
                    edge_type: "related".to_string(),
                    target: "neural_network".to_string(),
                }],
                ..TermUpdate::default()
            },
        )
        .unwrap();

        assert!(applied.edges_changed);
        let record = find_record(&records, "deep_learning").unwrap();
        assert_eq!(record.definition, "Layered representation learning");
        assert_eq!(record.category, "Machine Learning");
        assert_eq!(record.edges.len(), 1);
    }

    #[test]
    fn apply_edit_keeps_category_when_submitted_empty() {
        let mut records = sample();
        apply_edit(
            &mut records,
            "neural_network",
            TermUpdate {
                term: "Neural Network".to_string(),
                edges: vec![TermEdge {
                    edge_type: "related".to_string(),
                    target: "deep_learning".to_string(),
                }],
                ..TermUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(
            find_record(&records, "neural_network").unwrap().category,
            "General"
        );
    }

    #[test]
    fn apply_edit_drops_unresolvable_edges() {
        let mut records = sample();
        let applied = apply_edit(
            &mut records,
            "neural_network",
            TermUpdate {
                term: "Neural Network".to_string(),
                edges: vec![
                    TermEdge {
                        edge_type: "related".to_string(),
                        target: "deep_learning".to_string(),
                    },
                    TermEdge {
                        edge_type: "related".to_string(),
                        target: "does_not_exist".to_string(),
                    },
                ],
                ..TermUpdate::default()
            },
        )
        .unwrap();

        assert!(!applied.edges_changed, "kept edge set is unchanged");
        assert_eq!(
            find_record(&records, "neural_network").unwrap().edges.len(),
            1
        );
    }

    #[test]
    fn create_term_appends_with_slug_id() {
        let mut records = sample();
        let key = create_term(
            &mut records,
            TermUpdate {
                term: "Attention Mechanism".to_string(),
                ..TermUpdate::default()
            },
        )
        .unwrap();

        assert_eq!(key, "attention_mechanism");
        let created = records.last().unwrap();
        assert_eq!(created.id.as_deref(), Some("attention_mechanism"));
        assert_eq!(created.category, "General");
    }

    #[test]
    fn create_term_rejects_duplicates_and_empty_names() {
        let mut records = sample();
        assert!(create_term(
            &mut records,
            TermUpdate {
                term: "Neural Network".to_string(),
                ..TermUpdate::default()
            }
        )
        .is_err());
        assert!(create_term(
            &mut records,
            TermUpdate {
                term: "   ".to_string(),
                ..TermUpdate::default()
            }
        )
        .is_err());
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn delete_cascades_inbound_edges() {
        let mut records = sample();
        let term = delete_term(&mut records, "neural_network").unwrap();
        assert_eq!(term, "Neural Network");
        assert_eq!(records.len(), 3);

        // The synonym edge from ANN pointed at the deleted record.
        let ann = find_record(&records, "ann").unwrap();
        assert!(ann.edges.is_empty());
    }

    #[test]
    fn delete_unknown_key_is_an_error() {
        let mut records = sample();
        assert!(delete_term(&mut records, "nope").is_err());
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn resolve_label_falls_back_to_raw_key() {
        let records = sample();
        assert_eq!(resolve_label(&records, "deep_learning"), "Deep Learning");
        assert_eq!(resolve_label(&records, "dangling_key"), "dangling_key");
    }

    #[test]
    fn categories_dedupe_in_first_occurrence_order() {
        let mut records = sample();
        records[1].category = "Machine Learning".to_string();
        assert_eq!(
            categories(&records),
            vec!["General".to_string(), "Machine Learning".to_string()]
        );
    }
}

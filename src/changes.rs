//! Change tracking between the as-loaded and the edited dataset.
//!
//! The tracker holds two snapshots of the term list: `original`, frozen at
//! load time, and `current`, mutated in place by the edit endpoints. Both
//! can be rendered to a canonical text form - records sorted by display
//! name, stable field order, 2-space indentation - so that comparison and
//! patch generation are insensitive to the order in which edits happened.

use crate::models::TermRecord;
use crate::patch::generate_patch;
use chrono::NaiveDate;
use std::collections::BTreeSet;

// ============================================================================
// Canonical Serialization
// ============================================================================

/// Render a snapshot to its canonical, comparison-stable text form.
///
/// Records are sorted by Unicode-lowercased display name (raw name as
/// tiebreak) and serialized as pretty JSON. Two snapshots with the same
/// logical content always produce byte-identical output, regardless of
/// record order.
pub fn canonical_serialization(records: &[TermRecord]) -> String {
    let mut sorted: Vec<&TermRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        let ka = a.term.to_lowercase();
        let kb = b.term.to_lowercase();
        ka.cmp(&kb).then_with(|| a.term.cmp(&b.term))
    });

    // Struct field order is fixed, so this is deterministic.
    serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| "[]".to_string())
}

// ============================================================================
// Change Tracker
// ============================================================================

/// Outcome of a patch request.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    /// Current and original snapshots are canonically identical; no file
    /// should be produced.
    NoChanges,
    Patch { filename: String, body: String },
}

pub struct ChangeTracker {
    original: Vec<TermRecord>,
    current: Vec<TermRecord>,
    /// Display names touched by edits, for the changes indicator.
    modified_terms: BTreeSet<String>,
}

impl ChangeTracker {
    /// Freeze `records` as the original snapshot and start the working
    /// copy from it.
    pub fn new(records: Vec<TermRecord>) -> Self {
        ChangeTracker {
            original: records.clone(),
            current: records,
            modified_terms: BTreeSet::new(),
        }
    }

    /// Tracker over an empty dataset, used when loading fails so the
    /// application stays up in a non-functional state.
    pub fn empty() -> Self {
        ChangeTracker::new(Vec::new())
    }

    pub fn records(&self) -> &[TermRecord] {
        &self.current
    }

    /// Working copy for the mutation operations in [`crate::dataset`].
    /// Callers are expected to follow up with [`mark_modified`].
    ///
    /// [`mark_modified`]: ChangeTracker::mark_modified
    pub fn records_mut(&mut self) -> &mut Vec<TermRecord> {
        &mut self.current
    }

    pub fn original(&self) -> &[TermRecord] {
        &self.original
    }

    pub fn mark_modified(&mut self, term: &str) {
        self.modified_terms.insert(term.to_string());
    }

    pub fn modified_terms(&self) -> Vec<String> {
        self.modified_terms.iter().cloned().collect()
    }

    /// True iff the canonical serializations of the two snapshots differ.
    /// Pure read; call before generating a patch.
    pub fn has_changes(&self) -> bool {
        canonical_serialization(&self.current) != canonical_serialization(&self.original)
    }

    /// Build the downloadable patch artifact, or the no-changes signal.
    /// `today` feeds the dated filename.
    pub fn patch(&self, today: NaiveDate) -> PatchOutcome {
        let original = canonical_serialization(&self.original);
        let current = canonical_serialization(&self.current);

        if original == current {
            return PatchOutcome::NoChanges;
        }

        PatchOutcome::Patch {
            filename: format!("knowledge-graph-changes-{}.patch", today.format("%Y-%m-%d")),
            body: generate_patch(&original, &current),
        }
    }

    /// Full export of the current snapshot in its live order, pretty-printed
    /// with 2-space indentation. Not canonicalized; this mirrors the file
    /// the dataset was loaded from.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.current).unwrap_or_else(|_| "[]".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TermEdge;

    fn record(term: &str, definition: &str) -> TermRecord {
        TermRecord {
            id: Some(crate::dataset::slugify(term)),
            term: term.to_string(),
            definition: definition.to_string(),
            category: "General".to_string(),
            ..TermRecord::stub(term)
        }
    }

    fn sample() -> Vec<TermRecord> {
        vec![
            record("Neural Network", "A layered function approximator"),
            record("Transformer", "Attention-based architecture"),
            record("Embedding", "Dense vector representation"),
            record("Attention", "Weighted context mixing"),
            record("Gradient Descent", "Iterative optimization"),
        ]
    }

    #[test]
    fn canonicalization_is_permutation_invariant() {
        let base = sample();
        let expected = canonical_serialization(&base);

        // Rotate through several permutations; all must serialize the same.
        let mut rotated = base.clone();
        for _ in 0..10 {
            rotated.rotate_left(1);
            let last = rotated.len() - 1;
            rotated.swap(0, last);
            assert_eq!(canonical_serialization(&rotated), expected);
        }
    }

    #[test]
    fn canonicalization_sorts_case_insensitively() {
        let records = vec![record("zebra", ""), record("Apple", ""), record("apple", "")];
        let text = canonical_serialization(&records);
        let apple = text.find("\"Apple\"").unwrap();
        let lower_apple = text.find("\"apple\"").unwrap();
        let zebra = text.find("\"zebra\"").unwrap();
        assert!(apple < lower_apple, "raw-string tiebreak orders Apple first");
        assert!(lower_apple < zebra);
    }

    #[test]
    fn no_changes_immediately_after_load() {
        let tracker = ChangeTracker::new(sample());
        assert!(!tracker.has_changes());
        assert_eq!(tracker.patch(date()), PatchOutcome::NoChanges);
    }

    #[test]
    fn any_single_field_mutation_is_detected() {
        for i in 0..sample().len() {
            let mut tracker = ChangeTracker::new(sample());
            tracker.records_mut()[i].definition.push_str(" (edited)");
            assert!(tracker.has_changes(), "edit to record {i} not detected");
        }
    }

    #[test]
    fn reordering_alone_is_not_a_change() {
        let mut tracker = ChangeTracker::new(sample());
        tracker.records_mut().reverse();
        assert!(!tracker.has_changes());
    }

    #[test]
    fn edge_mutation_is_detected() {
        let mut tracker = ChangeTracker::new(sample());
        tracker.records_mut()[0].edges.push(TermEdge {
            edge_type: "related".to_string(),
            target: "transformer".to_string(),
        });
        assert!(tracker.has_changes());
    }

    #[test]
    fn patch_artifact_carries_dated_filename() {
        let mut tracker = ChangeTracker::new(sample());
        tracker.records_mut()[1].definition = "Rewritten".to_string();

        match tracker.patch(date()) {
            PatchOutcome::Patch { filename, body } => {
                assert_eq!(filename, "knowledge-graph-changes-2025-03-14.patch");
                assert!(body.starts_with("diff --git"));
                assert!(body.contains("+    \"definition\": \"Rewritten\","));
            }
            PatchOutcome::NoChanges => panic!("expected a patch"),
        }
    }

    #[test]
    fn export_preserves_live_order() {
        let mut tracker = ChangeTracker::new(sample());
        tracker.records_mut().reverse();
        let json = tracker.export_json();
        let first = json.find("Neural Network").unwrap();
        let last = json.find("Gradient Descent").unwrap();
        assert!(last < first, "export must follow current order, not canonical");
    }

    #[test]
    fn modified_terms_accumulate_sorted_and_deduped() {
        let mut tracker = ChangeTracker::new(sample());
        tracker.mark_modified("Transformer");
        tracker.mark_modified("Attention");
        tracker.mark_modified("Transformer");
        assert_eq!(tracker.modified_terms(), vec!["Attention", "Transformer"]);
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }
}

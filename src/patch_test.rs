//! Tests for the line-based patch generator.
//!
//! These pin the observable output format: positional comparison, proximity
//! hunking, context clipping against the original's bounds, and the
//! equal-count hunk headers.

use super::*;

// ============================================================================
// Helpers
// ============================================================================

/// A text of `n` lines "line 0" .. "line n-1".
fn numbered_lines(n: usize) -> String {
    (0..n)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same as `numbered_lines` but with the given lines replaced.
fn numbered_lines_with(n: usize, replacements: &[(usize, &str)]) -> String {
    (0..n)
        .map(|i| {
            replacements
                .iter()
                .find(|(line, _)| *line == i)
                .map(|(_, text)| text.to_string())
                .unwrap_or_else(|| format!("line {}", i))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Patch lines after the fixed four-line preamble.
fn patch_body(patch: &str) -> Vec<&str> {
    let lines: Vec<&str> = patch.lines().collect();
    assert!(lines.len() >= 4, "patch shorter than its preamble: {patch}");
    assert!(lines[0].starts_with("diff --git a/"), "bad preamble: {}", lines[0]);
    assert!(lines[1].starts_with("index "), "bad preamble: {}", lines[1]);
    assert!(lines[2].starts_with("--- a/"), "bad preamble: {}", lines[2]);
    assert!(lines[3].starts_with("+++ b/"), "bad preamble: {}", lines[3]);
    lines[4..].to_vec()
}

fn hunk_count(patch: &str) -> usize {
    patch.lines().filter(|l| l.starts_with("@@")).count()
}

// ============================================================================
// Equal Inputs
// ============================================================================

#[test]
fn test_equal_inputs_report_no_differences() {
    for text in ["", "A", "A\nB\nC", "one\n\ntwo\n"] {
        let patch = generate_patch(text, text);
        assert_eq!(
            patch_body(&patch),
            vec!["No differences found"],
            "expected no-change patch for {text:?}"
        );
    }
}

#[test]
fn test_trailing_newline_difference_is_invisible() {
    // "A\n" splits to ["A", ""] and "A" to ["A"]; position 1 compares the
    // real empty line against the conceptual padding, which is also empty.
    let patch = generate_patch("A\n", "A");
    assert_eq!(patch_body(&patch), vec!["No differences found"]);
}

// ============================================================================
// End-to-End Examples
// ============================================================================

#[test]
fn test_single_replacement_with_context() {
    let patch = generate_patch("A\nB\nC", "A\nX\nC");
    assert_eq!(
        patch_body(&patch),
        vec!["@@ -1,3 +1,3 @@", " A", "-B", "+X", " C"]
    );
}

#[test]
fn test_deletion_emits_no_plus_line() {
    // Difference at index 1: original "B", modified beyond its length.
    let patch = generate_patch("A\nB", "A");
    assert_eq!(patch_body(&patch), vec!["@@ -1,2 +1,2 @@", " A", "-B"]);
}

#[test]
fn test_empty_original_against_content() {
    // "" splits to one empty line, so the display window is [0, 0]; the
    // second added line falls outside the original's bounds and is not
    // shown. That under-reporting is part of the format.
    let patch = generate_patch("", "X\nY");
    assert_eq!(patch_body(&patch), vec!["@@ -1,1 +1,1 @@", "-", "+X"]);
}

#[test]
fn test_content_against_empty_modified() {
    // Index 0 is within the (one-line) empty modified text, so an empty
    // `+` line is emitted; index 1 is beyond it and gets none.
    let patch = generate_patch("X\nY", "");
    assert_eq!(
        patch_body(&patch),
        vec!["@@ -1,2 +1,2 @@", "-X", "+", "-Y"]
    );
}

#[test]
fn test_insertion_shift_reports_equal_counts() {
    // Positional comparison turns one inserted line into a run of
    // differences; both header counts stay equal by construction.
    let patch = generate_patch("A\nB\nC\nD", "A\nX\nB\nC\nD");
    assert_eq!(hunk_count(&patch), 1);
    assert_eq!(
        patch_body(&patch),
        vec![
            "@@ -1,4 +1,4 @@",
            " A",
            "-B",
            "+X",
            "-C",
            "+B",
            "-D",
            "+C",
        ]
    );
}

// ============================================================================
// Hunk Grouping
// ============================================================================

#[test]
fn test_gap_of_five_lines_stays_in_one_hunk() {
    let original = numbered_lines(30);
    let modified = numbered_lines_with(30, &[(10, "changed 10"), (15, "changed 15")]);
    let patch = generate_patch(&original, &modified);
    assert_eq!(hunk_count(&patch), 1, "gap of 5 must not split: {patch}");
}

#[test]
fn test_gap_of_six_lines_splits_into_two_hunks() {
    let original = numbered_lines(30);
    let modified = numbered_lines_with(30, &[(10, "changed 10"), (16, "changed 16")]);
    let patch = generate_patch(&original, &modified);
    assert_eq!(hunk_count(&patch), 2, "gap of 6 must split: {patch}");
}

#[test]
fn test_hunks_emitted_in_ascending_order() {
    let original = numbered_lines(40);
    let modified = numbered_lines_with(40, &[(5, "x"), (25, "y"), (35, "z")]);
    let patch = generate_patch(&original, &modified);

    let headers: Vec<&str> = patch.lines().filter(|l| l.starts_with("@@")).collect();
    assert_eq!(
        headers,
        vec!["@@ -3,7 +3,7 @@", "@@ -23,7 +23,7 @@", "@@ -33,7 +33,7 @@"]
    );
}

#[test]
fn test_group_into_hunks_boundary() {
    let mk = |line| LineDiff {
        line,
        original: "a".to_string(),
        modified: "b".to_string(),
    };

    let within = vec![mk(10), mk(15)];
    assert_eq!(group_into_hunks(&within).len(), 1);

    let beyond = vec![mk(10), mk(16)];
    assert_eq!(group_into_hunks(&beyond).len(), 2);

    assert!(group_into_hunks(&[]).is_empty());
}

#[test]
fn test_grouping_is_relative_to_last_difference_in_hunk() {
    // 0 -> 5 -> 10 chain: each step is within the gap even though the
    // first and last differences are 10 apart.
    let mk = |line| LineDiff {
        line,
        original: "a".to_string(),
        modified: "b".to_string(),
    };
    let chain = vec![mk(0), mk(5), mk(10)];
    assert_eq!(group_into_hunks(&chain).len(), 1);
}

// ============================================================================
// Context Windows
// ============================================================================

#[test]
fn test_context_clips_at_start_of_file() {
    let original = numbered_lines(10);
    let modified = numbered_lines_with(10, &[(0, "changed 0")]);
    let patch = generate_patch(&original, &modified);

    let body = patch_body(&patch);
    // startLine clamps to 0, so the header is 1-based line 1 and the first
    // body line is the difference itself.
    assert_eq!(body[0], "@@ -1,4 +1,4 @@");
    assert_eq!(body[1], "-line 0");
    assert_eq!(body[2], "+changed 0");
}

#[test]
fn test_context_clips_at_end_of_file() {
    let original = numbered_lines(5);
    let modified = numbered_lines_with(5, &[(4, "changed 4")]);
    let patch = generate_patch(&original, &modified);

    assert_eq!(
        patch_body(&patch),
        vec![
            "@@ -2,4 +2,4 @@",
            " line 1",
            " line 2",
            " line 3",
            "-line 4",
            "+changed 4",
        ]
    );
}

#[test]
fn test_context_window_is_three_lines_each_side() {
    let original = numbered_lines(20);
    let modified = numbered_lines_with(20, &[(10, "changed 10")]);
    let patch = generate_patch(&original, &modified);

    assert_eq!(
        patch_body(&patch),
        vec![
            "@@ -8,7 +8,7 @@",
            " line 7",
            " line 8",
            " line 9",
            "-line 10",
            "+changed 10",
            " line 11",
            " line 12",
            " line 13",
        ]
    );
}

// ============================================================================
// Difference Collection
// ============================================================================

#[test]
fn test_collect_differences_pads_shorter_side() {
    let original = vec!["A", "B"];
    let modified = vec!["A"];
    let diffs = collect_differences(&original, &modified);
    assert_eq!(
        diffs,
        vec![LineDiff {
            line: 1,
            original: "B".to_string(),
            modified: "".to_string(),
        }]
    );
}

#[test]
fn test_collect_differences_compares_by_position_only() {
    // Identical content shifted by one line is all differences; no
    // realignment is attempted.
    let original = vec!["A", "B", "C"];
    let modified = vec!["B", "C", "A"];
    let diffs = collect_differences(&original, &modified);
    assert_eq!(diffs.len(), 3);
}

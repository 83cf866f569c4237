//! Line-based patch generation.
//!
//! Produces a human-readable, unified-diff-style document from two text
//! blobs. This is deliberately a positional comparison, not a content
//! alignment: line `i` of the original is compared with line `i` of the
//! modified text, the shorter side padded with empty lines during the
//! comparison only. Nearby differences are clustered into hunks with a few
//! lines of surrounding context. The output is meant for a human reviewer,
//! not for `git apply`; both sides of a hunk header always report the same
//! line count.

#[cfg(test)]
#[path = "patch_test.rs"]
mod patch_test;

/// Differences further apart than this many lines start a new hunk.
const HUNK_GAP: usize = 5;

/// Unchanged lines shown on each side of a hunk, clipped to the original's
/// bounds.
const CONTEXT_LINES: usize = 3;

/// Logical file pair named in the patch preamble.
const PATCH_FILE_NAME: &str = "knowledge-graph.json";

/// One position where the two texts disagree. Lines beyond either side's
/// end compare as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDiff {
    pub line: usize,
    pub original: String,
    pub modified: String,
}

// ============================================================================
// Patch Generation
// ============================================================================

/// Generate the patch document for `original` -> `modified`.
///
/// Equal inputs yield the preamble plus a "No differences found" line
/// rather than an empty document.
pub fn generate_patch(original: &str, modified: &str) -> String {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let modified_lines: Vec<&str> = modified.split('\n').collect();

    let diffs = collect_differences(&original_lines, &modified_lines);

    let mut patch = patch_header();

    if diffs.is_empty() {
        patch.push_str("No differences found\n");
        return patch;
    }

    for hunk in group_into_hunks(&diffs) {
        patch.push_str(&render_hunk(hunk, &original_lines, &modified_lines));
    }

    patch
}

fn patch_header() -> String {
    format!(
        "diff --git a/{name} b/{name}\n\
         index 0000000..0000000 100644\n\
         --- a/{name}\n\
         +++ b/{name}\n",
        name = PATCH_FILE_NAME
    )
}

/// Walk both line sequences by index, recording every position where they
/// disagree. Positions beyond a side's end read as the empty string.
fn collect_differences(original: &[&str], modified: &[&str]) -> Vec<LineDiff> {
    let max_len = original.len().max(modified.len());
    let mut diffs = Vec::new();

    for i in 0..max_len {
        let orig_line = original.get(i).copied().unwrap_or("");
        let mod_line = modified.get(i).copied().unwrap_or("");
        if orig_line != mod_line {
            diffs.push(LineDiff {
                line: i,
                original: orig_line.to_string(),
                modified: mod_line.to_string(),
            });
        }
    }

    diffs
}

/// Cluster ordered differences by proximity: a difference more than
/// `HUNK_GAP` lines past the last one in the open hunk starts a new hunk.
/// Single forward scan, no backtracking.
fn group_into_hunks(diffs: &[LineDiff]) -> Vec<&[LineDiff]> {
    let mut hunks = Vec::new();
    let mut start = 0;

    for i in 1..diffs.len() {
        if diffs[i].line - diffs[i - 1].line > HUNK_GAP {
            hunks.push(&diffs[start..i]);
            start = i;
        }
    }
    if !diffs.is_empty() {
        hunks.push(&diffs[start..]);
    }

    hunks
}

/// Render one hunk: header, then the display window's lines with `-`/`+`
/// pairs at recorded differences and space-prefixed context elsewhere.
fn render_hunk(hunk: &[LineDiff], original: &[&str], modified: &[&str]) -> String {
    let first_line = hunk[0].line;
    let last_line = hunk[hunk.len() - 1].line;

    // Context window, clipped to the original's bounds. Differences past the
    // original's end fall outside the window; that under-reporting is part
    // of the format (see module docs).
    let start_line = first_line.saturating_sub(CONTEXT_LINES);
    let end_line = (last_line + CONTEXT_LINES).min(original.len().saturating_sub(1));

    let count = end_line.saturating_sub(start_line) + 1;
    let mut out = format!(
        "@@ -{start},{count} +{start},{count} @@\n",
        start = start_line + 1,
        count = count
    );

    for i in start_line..=end_line {
        match hunk.iter().find(|d| d.line == i) {
            Some(diff) => {
                if i < original.len() {
                    out.push('-');
                    out.push_str(&diff.original);
                    out.push('\n');
                }
                if i < modified.len() {
                    out.push('+');
                    out.push_str(&diff.modified);
                    out.push('\n');
                }
            }
            None => {
                out.push(' ');
                out.push_str(original.get(i).copied().unwrap_or(""));
                out.push('\n');
            }
        }
    }

    out
}

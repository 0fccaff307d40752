//! Reconciliation: turn a backend's verbose, echo-prone reply into the
//! minimal text to insert at the cursor.
//!
//! The steps are order-sensitive; swapping them changes results when
//! prefix and suffix overlap textually.

use crate::core::prompt::SCRIPT_MARKER;

/// Split the buffer at the cursor into `(prefix, suffix)`.
///
/// Out-of-range cursors clamp to the buffer length; a cursor inside a
/// UTF-8 sequence backs up to the previous char boundary.
pub fn split_buffer(buffer: &str, cursor: usize) -> (&str, &str) {
    let mut pos = cursor.min(buffer.len());
    while pos > 0 && !buffer.is_char_boundary(pos) {
        pos -= 1;
    }
    buffer.split_at(pos)
}

/// Reconcile a raw backend reply against the original buffer.
///
/// In order: strip a leading [`SCRIPT_MARKER`]; strip one leading
/// occurrence of the full prefix, or failing that of the line prefix
/// (portion of the prefix after its last line break); strip one
/// trailing occurrence of a non-empty suffix; trim surrounding line
/// breaks. Nothing else is touched — the reply is trusted after
/// mechanical trimming.
pub fn reconcile(raw: &str, prefix: &str, suffix: &str) -> String {
    let mut completion = raw;

    if let Some(rest) = completion.strip_prefix(SCRIPT_MARKER) {
        completion = rest;
    }

    let line_prefix = match prefix.rfind('\n') {
        Some(idx) => &prefix[idx + 1..],
        None => prefix,
    };

    // First anchor that matches wins; strip exactly one occurrence.
    for anchor in [prefix, line_prefix] {
        if let Some(rest) = completion.strip_prefix(anchor) {
            completion = rest;
            break;
        }
    }

    if !suffix.is_empty() {
        if let Some(rest) = completion.strip_suffix(suffix) {
            completion = rest;
        }
    }

    completion.trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_reply_is_unchanged() {
        assert_eq!(reconcile("ls -la", "", ""), "ls -la");
    }

    #[test]
    fn strips_one_layer_of_prefix_overlap() {
        assert_eq!(reconcile("echo hello world", "echo ", ""), "hello world");
    }

    #[test]
    fn strips_trailing_suffix_overlap() {
        assert_eq!(reconcile("ls -la > out.txt", "", " > out.txt"), "ls -la");
    }

    #[test]
    fn marker_is_removed_before_prefix_trimming() {
        let raw = "#!/bin/zsh\n\nlist files\nls -la";
        assert_eq!(reconcile(raw, "list files\n", ""), "ls -la");
    }

    #[test]
    fn line_prefix_is_fallback_anchor() {
        // Full prefix has an earlier line the reply does not echo.
        let prefix = "# earlier\ngit sta";
        assert_eq!(reconcile("git status", prefix, ""), "tus");
    }

    #[test]
    fn full_prefix_wins_over_line_prefix() {
        let prefix = "a\nb";
        // Reply echoes the whole prefix; only one strip happens.
        assert_eq!(reconcile("a\nb rest", prefix, ""), " rest");
    }

    #[test]
    fn empty_suffix_is_not_stripped() {
        assert_eq!(reconcile("ls", "", ""), "ls");
    }

    #[test]
    fn surrounding_newlines_trimmed_but_not_spaces() {
        assert_eq!(reconcile("\nls -la \n", "", ""), "ls -la ");
    }

    #[test]
    fn reconcile_is_idempotent_on_clean_replies() {
        let once = reconcile("ls -la", "list files\n", "");
        assert_eq!(reconcile(&once, "", ""), once);
    }

    #[test]
    fn split_clamps_out_of_range_cursor() {
        assert_eq!(split_buffer("ls", 10), ("ls", ""));
    }

    #[test]
    fn split_backs_up_to_char_boundary() {
        // é is two bytes; index 1 lands inside it.
        assert_eq!(split_buffer("é", 1), ("", "é"));
    }

    #[test]
    fn split_preserves_buffer() {
        let buffer = "list files\n";
        let (prefix, suffix) = split_buffer(buffer, 5);
        assert_eq!(format!("{prefix}{suffix}"), buffer);
    }
}

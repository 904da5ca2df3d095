//! Page-selection parsing
//!
//! The split form sends its page selection as free text, e.g. `"1,3,5"`.
//! Tokens that do not parse as a page number are dropped without error, and
//! the order and multiplicity of the surviving tokens is kept exactly as
//! given. Range syntax is not recognized here: `"1-5"` is a single
//! non-numeric token and is dropped.

/// Parse a comma-separated page selection into 1-based page numbers.
///
/// Unparseable tokens (including negatives and empty tokens) are discarded
/// silently. Out-of-range checking is left to the document transform, so a
/// `0` survives parsing and is skipped there.
pub fn parse_selection(input: &str) -> Vec<u32> {
    input
        .split(',')
        .filter_map(|token| token.trim().parse::<u32>().ok())
        .collect()
}

// String helpers shared by the evaluator and the SQL lowering.

/// Case-insensitive substring test. Blank needles match.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Build an `ILIKE` pattern matching `term` anywhere, escaping the
/// wildcard characters it contains.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Split a dotted field path into its segments.
pub(crate) fn path_segments(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

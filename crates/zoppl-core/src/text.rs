//! Small string helpers used for facet keys and display labels.

/// Lower-cases and trims a value so it can be compared as a filter key.
#[must_use]
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Upper-cases the first character and leaves the rest untouched.
///
/// `"zara"` becomes `"Zara"`, `"h&m"` becomes `"H&m"`.
#[must_use]
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

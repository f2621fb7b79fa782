/// Converts a page name into the identifier used for its URL and graph node.
///
/// The steps run in a fixed order:
/// 1. every character outside ASCII letters, digits, `-`, `_` and whitespace becomes `-`
/// 2. each run of whitespace becomes a single `-`
/// 3. each run of `-` collapses to one
/// 4. a leading and trailing `-` is stripped
/// 5. the result is lowercased
///
/// Distinct names may share a slug. Empty or punctuation-only input yields an
/// empty string.
///
/// ```
/// use markdown_garden_engine::normalize;
///
/// assert_eq!(normalize("Hello World!"), "hello-world");
/// ```
pub fn normalize(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    // Steps 1-3 in one pass: whitespace and punctuation both turn into a
    // hyphen, and a hyphen is never pushed twice in a row.
    for c in name.chars() {
        let mapped = if c.is_ascii_alphanumeric() || c == '_' {
            c.to_ascii_lowercase()
        } else {
            '-'
        };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }

    let trimmed = slug.strip_prefix('-').unwrap_or(&slug);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.to_string()
}

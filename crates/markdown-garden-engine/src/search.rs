use std::collections::HashSet;

/// Node name of the page served at the site root.
pub const DEFAULT_HOME: &str = "readme";

const FRAGMENT: char = '#';

/// Tuning for [`filter_and_collapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Queries shorter than this (in characters) return nothing.
    pub min_query_length: usize,
    /// Upper bound on returned identifiers.
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_length: 3,
            max_results: 10,
        }
    }
}

/// Strips a `#fragment` suffix, leaving the identifier of the containing page.
pub fn base_identifier(id: &str) -> &str {
    id.split_once(FRAGMENT).map_or(id, |(base, _)| base)
}

/// Filters graph node identifiers by a free-text query and collapses
/// section matches onto their page.
///
/// Matching is a case-insensitive substring test against the full
/// identifier, fragment included. Returned identifiers keep their original
/// casing, appear once each in order of first match, and number at most
/// `options.max_results`.
pub fn filter_and_collapse<S: AsRef<str>>(
    ids: &[S],
    query: &str,
    options: &SearchOptions,
) -> Vec<String> {
    if query.chars().count() < options.min_query_length {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for id in ids {
        let id: &str = id.as_ref();
        if results.len() >= options.max_results {
            break;
        }
        if !id.to_lowercase().contains(&needle) {
            continue;
        }
        let base = base_identifier(id);
        if seen.insert(base) {
            results.push(base.to_string());
        }
    }

    results
}

/// Site path for a search result; the home page lives at `/`.
pub fn navigation_path(id: &str, home: &str) -> String {
    if id.to_lowercase() == home.to_lowercase() {
        "/".to_string()
    } else {
        format!("/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ids() -> Vec<&'static str> {
        vec![
            "foo",
            "foo#section1",
            "foo#section2",
            "bar",
            "bar#intro",
            "baz",
        ]
    }

    #[rstest]
    fn collapses_fragments_of_matching_page(ids: Vec<&'static str>) {
        let results = filter_and_collapse(&ids, "foo", &SearchOptions::default());
        assert_eq!(results, vec!["foo"]);
    }

    #[rstest]
    fn collapses_fragments_for_second_page(ids: Vec<&'static str>) {
        let results = filter_and_collapse(&ids, "bar", &SearchOptions::default());
        assert_eq!(results, vec!["bar"]);
    }

    #[rstest]
    #[case("")]
    #[case("f")]
    #[case("fo")]
    #[case("ba")]
    fn short_queries_return_nothing(ids: Vec<&'static str>, #[case] query: &str) {
        assert!(filter_and_collapse(&ids, query, &SearchOptions::default()).is_empty());
    }

    #[rstest]
    fn query_length_counts_characters_not_bytes() {
        let ids = ["éé", "ééé-page"];
        let results = filter_and_collapse(&ids, "éé", &SearchOptions::default());
        assert!(results.is_empty());
        let results = filter_and_collapse(&ids, "ééé", &SearchOptions::default());
        assert_eq!(results, vec!["ééé-page"]);
    }

    #[rstest]
    fn no_match_is_empty(ids: Vec<&'static str>) {
        assert!(filter_and_collapse(&ids, "qux", &SearchOptions::default()).is_empty());
    }

    #[rstest]
    fn fragment_only_match_yields_base_page(ids: Vec<&'static str>) {
        let results = filter_and_collapse(&ids, "intro", &SearchOptions::default());
        assert_eq!(results, vec!["bar"]);
    }

    #[test]
    fn fragment_only_match_without_page_node_still_yields_base() {
        let ids = ["notes#section-one", "notes#section-two"];
        let results = filter_and_collapse(&ids, "section", &SearchOptions::default());
        assert_eq!(results, vec!["notes"]);
    }

    #[test]
    fn matching_is_case_insensitive_but_preserves_casing() {
        let ids = ["Getting-Started", "getting-started#Install", "Other"];
        let results = filter_and_collapse(&ids, "START", &SearchOptions::default());
        assert_eq!(results, vec!["Getting-Started", "getting-started"]);
    }

    #[test]
    fn preserves_first_occurrence_order() {
        let ids = ["zeta#one", "alpha", "zeta", "alpha#two", "beta"];
        let results = filter_and_collapse(&ids, "a", &SearchOptions {
            min_query_length: 1,
            max_results: 10,
        });
        assert_eq!(results, vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn never_exceeds_max_results() {
        let ids: Vec<String> = (0..50).map(|i| format!("page-{i}")).collect();
        let results = filter_and_collapse(&ids, "page", &SearchOptions::default());
        assert_eq!(results.len(), 10);
        assert_eq!(results.first().map(String::as_str), Some("page-0"));
        assert_eq!(results.last().map(String::as_str), Some("page-9"));

        let results = filter_and_collapse(&ids, "page", &SearchOptions {
            min_query_length: 3,
            max_results: 3,
        });
        assert_eq!(results, vec!["page-0", "page-1", "page-2"]);
    }

    #[test]
    fn cap_applies_after_deduplication() {
        let ids = ["a#1", "a#2", "a#3", "b", "c"];
        let results = filter_and_collapse(&ids, "", &SearchOptions {
            min_query_length: 0,
            max_results: 2,
        });
        assert_eq!(results, vec!["a", "b"]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let ids: [&str; 0] = [];
        assert!(filter_and_collapse(&ids, "anything", &SearchOptions::default()).is_empty());
    }

    #[rstest]
    #[case("page", "page")]
    #[case("page#section", "page")]
    #[case("page#a#b", "page")]
    #[case("#orphan", "")]
    fn base_identifier_strips_fragment(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(base_identifier(id), expected);
    }

    #[rstest]
    #[case("readme", "/")]
    #[case("README", "/")]
    #[case("guide", "/guide")]
    #[case("Mixed-Case", "/Mixed-Case")]
    fn navigation_maps_home_to_root(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(navigation_path(id, DEFAULT_HOME), expected);
    }
}

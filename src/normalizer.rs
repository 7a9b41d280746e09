//! Path normalization.
//!
//! Rewrites framework-native path syntax into the canonical `{name}`
//! placeholder form used for endpoint equality, and merges hierarchical path
//! segments contributed by nested routing declarations.
//!
//! The normalizer is total: malformed input from an adapter is an adapter bug,
//! not a normalizer failure, so nothing here returns an error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Matches a single `{name}` or `{name?}` placeholder segment.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{(?P<name>[^{}?/]+)(?P<optional>\?)?\}$").expect("Failed to compile placeholder regex")
});

/// Merge one path segment into an accumulator during a leaf-to-root walk.
///
/// Prepends: `merge_segments("list", "/todo")` is `"/todo/list"`. Walking from
/// a leaf toward the root therefore builds the correct left-to-right path. A
/// blank accumulator contributes nothing. Separator cleanup happens in
/// [`normalize_path`]; this function is order-preserving, not order-correcting.
pub fn merge_segments(acc: &str, segment: &str) -> String {
    if acc.trim().is_empty() {
        segment.to_string()
    } else {
        format!("{segment}/{acc}")
    }
}

/// A canonicalized path plus what was learned about its placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPath {
    /// Canonical path: leading `/`, no trailing slash except root, every
    /// placeholder written `{name}` with the optionality marker removed.
    pub path: String,
    /// Names of all placeholder segments.
    pub parameters: BTreeSet<String>,
    /// Subset of `parameters` that carried an optionality marker in the raw
    /// syntax. Recorded separately so [`NormalizedPath::expand`] can perform
    /// the dual-endpoint expansion.
    pub optional: BTreeSet<String>,
}

/// One concrete path produced by expanding a [`NormalizedPath`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathVariant {
    pub path: String,
    /// Placeholder names present in this variant.
    pub parameters: BTreeSet<String>,
}

/// Canonicalize a raw path built up from framework segments.
///
/// Empty segments (doubled or trailing separators) contribute nothing, so
/// segment concatenation can never produce a malformed path. The root path is
/// a single `/`.
pub fn normalize_path(raw: &str) -> NormalizedPath {
    let mut parameters = BTreeSet::new();
    let mut optional = BTreeSet::new();
    let mut segments = Vec::new();

    for segment in raw.split('/').filter(|s| !s.trim().is_empty()) {
        match PLACEHOLDER.captures(segment) {
            Some(caps) => {
                let name = caps["name"].to_string();
                if caps.name("optional").is_some() {
                    optional.insert(name.clone());
                }
                segments.push(format!("{{{name}}}"));
                parameters.insert(name);
            }
            None => segments.push(segment.to_string()),
        }
    }

    NormalizedPath {
        path: join_segments(&segments),
        parameters,
        optional,
    }
}

fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.push_str(segment.as_ref());
        }
        path
    }
}

impl NormalizedPath {
    /// Expand optional placeholders into concrete path variants.
    ///
    /// An optional path segment is observably two distinct routes: one with
    /// the segment elided and one with it present as a mandatory placeholder.
    /// Each optional segment doubles the variants; a path without optional
    /// segments yields exactly one variant.
    pub fn expand(&self) -> Vec<PathVariant> {
        let mut variants: Vec<(Vec<String>, BTreeSet<String>)> =
            vec![(Vec::new(), BTreeSet::new())];

        for segment in self.path.split('/').filter(|s| !s.is_empty()) {
            let placeholder = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'));

            match placeholder {
                Some(name) if self.optional.contains(name) => {
                    let mut branched = Vec::with_capacity(variants.len() * 2);
                    for (segments, parameters) in variants {
                        branched.push((segments.clone(), parameters.clone()));
                        let mut with_segments = segments;
                        with_segments.push(segment.to_string());
                        let mut with_parameters = parameters;
                        with_parameters.insert(name.to_string());
                        branched.push((with_segments, with_parameters));
                    }
                    variants = branched;
                }
                Some(name) => {
                    for (segments, parameters) in variants.iter_mut() {
                        segments.push(segment.to_string());
                        parameters.insert(name.to_string());
                    }
                }
                None => {
                    for (segments, _) in variants.iter_mut() {
                        segments.push(segment.to_string());
                    }
                }
            }
        }

        variants
            .into_iter()
            .map(|(segments, parameters)| PathVariant {
                path: join_segments(&segments),
                parameters,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prepends_ancestor_segments() {
        let mut acc = String::new();
        for segment in ["list", "/todo", "/api"] {
            acc = merge_segments(&acc, segment);
        }
        assert_eq!(normalize_path(&acc).path, "/api/todo/list");
    }

    #[test]
    fn test_top_down_and_bottom_up_walks_agree() {
        let segments = ["/api", "/v1", "/todos", "{id}"];

        let top_down: String = segments.concat();

        let mut bottom_up = String::new();
        for segment in segments.iter().rev() {
            bottom_up = merge_segments(&bottom_up, segment);
        }

        assert_eq!(normalize_path(&top_down), normalize_path(&bottom_up));
    }

    #[test]
    fn test_empty_segments_contribute_nothing() {
        assert_eq!(normalize_path("//todos///list/").path, "/todos/list");
        assert_eq!(normalize_path("todos").path, "/todos");
    }

    #[test]
    fn test_root_path() {
        assert_eq!(normalize_path("").path, "/");
        assert_eq!(normalize_path("/").path, "/");
    }

    #[test]
    fn test_placeholders_are_collected() {
        let normalized = normalize_path("/todos/{id}/tags/{tag}");
        assert_eq!(normalized.path, "/todos/{id}/tags/{tag}");
        assert_eq!(
            normalized.parameters,
            ["id".to_string(), "tag".to_string()].into()
        );
        assert!(normalized.optional.is_empty());
    }

    #[test]
    fn test_optional_marker_is_removed_and_recorded() {
        let normalized = normalize_path("/todos/{id?}");
        assert_eq!(normalized.path, "/todos/{id}");
        assert_eq!(normalized.optional, ["id".to_string()].into());
    }

    #[test]
    fn test_expand_without_optional_segments_is_identity() {
        let variants = normalize_path("/todos/{id}").expand();
        assert_eq!(
            variants,
            vec![PathVariant {
                path: "/todos/{id}".to_string(),
                parameters: ["id".to_string()].into(),
            }]
        );
    }

    #[test]
    fn test_expand_optional_segment_into_two_variants() {
        let mut variants = normalize_path("/todos/{id?}").expand();
        variants.sort();

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].path, "/todos");
        assert!(variants[0].parameters.is_empty());
        assert_eq!(variants[1].path, "/todos/{id}");
        assert_eq!(variants[1].parameters, ["id".to_string()].into());
    }

    #[test]
    fn test_expand_root() {
        let variants = normalize_path("/").expand();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].path, "/");
    }
}

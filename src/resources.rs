//! Resource listing over resolved dependency trees.
//!
//! Two listing strategies coexist: [`list`] filters the flat import feature
//! set the analyzer produced for the whole transitive graph, while
//! [`tree_to_urls`] walks a [`DependencyTree`] in pre-order when per-resource
//! control over classification is needed. They are deliberately separate
//! operations rather than one code path with a mode flag.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{DependencyTree, ImportFeature, ResourceReference};

/// Pattern matching absolute or protocol-relative HTTP(S) URLs.
pub fn external_resource() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:https?:)?//").expect("invalid external resource regex"))
}

fn scheme_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("invalid scheme regex"))
}

/// Determine whether a reference points at an externally hosted resource.
///
/// External resources cannot be pushed to a client and are excluded from the
/// manifest wherever they are discovered.
pub fn is_external(reference: &str) -> bool {
    external_resource().is_match(reference)
}

/// Filter a flat import feature set down to local resource URLs.
///
/// Returns each surviving reference exactly as written in markup, not its
/// resolved form. Order is preserved as produced by the analyzer;
/// deduplication of the feature set is the analyzer's responsibility, not
/// this layer's.
pub fn list(features: &[ImportFeature]) -> Vec<String> {
    features
        .iter()
        .filter(|feature| !is_external(&feature.original_url))
        .map(|feature| feature.original_url.clone())
        .collect()
}

/// Collect every resource a dependency tree declares, in pre-order.
///
/// Each node contributes its own href, then its child imports depth-first,
/// then its script and style references resolved against the node's href.
/// Nodes without an href are skipped together with their subtree.
pub fn tree_to_urls(tree: &DependencyTree) -> Vec<String> {
    let mut accum = Vec::new();
    collect_tree_urls(tree, &mut accum);
    accum
}

fn collect_tree_urls(tree: &DependencyTree, accum: &mut Vec<String>) {
    let Some(href) = tree.href.as_deref() else {
        return;
    };
    accum.push(href.to_string());

    for import in &tree.imports {
        if import.href.is_some() {
            collect_tree_urls(import, accum);
        }
    }

    for script in &tree.scripts {
        if let Some(url) = script_to_url(href, script) {
            accum.push(url);
        }
    }

    for style in &tree.styles {
        if let Some(url) = style_to_url(href, style) {
            accum.push(url);
        }
    }
}

/// Resolve a script reference, dropping inline and external scripts.
pub fn script_to_url(href: &str, script: &ResourceReference) -> Option<String> {
    let src = script.source.as_deref()?;
    if is_external(src) {
        return None;
    }
    Some(resolve_reference(href, src))
}

/// Resolve a stylesheet reference, dropping inline styles.
///
/// Unlike scripts, style links are not checked against the external pattern
/// here; the manifest assembler filters external URLs before anything reaches
/// the output mapping.
pub fn style_to_url(href: &str, style: &ResourceReference) -> Option<String> {
    let src = style.source.as_deref()?;
    Some(resolve_reference(href, src))
}

/// Resolve a reference against the document path that declared it.
///
/// Scheme-qualified, protocol-relative and root-absolute references pass
/// through unchanged; relative references resolve against the base's
/// directory with dot segments removed.
pub fn resolve_reference(base: &str, reference: &str) -> String {
    if reference.starts_with('/') || scheme_prefix().is_match(reference) {
        return reference.to_string();
    }

    let directory = match base.rfind('/') {
        Some(index) => &base[..index + 1],
        None => "/",
    };
    remove_dot_segments(&format!("{directory}{reference}"))
}

fn remove_dot_segments(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(source: &str) -> ResourceReference {
        ResourceReference::with_source(source)
    }

    #[test]
    fn recognizes_external_resources() {
        assert!(is_external("https://example.com/app.js"));
        assert!(is_external("http://example.com/app.js"));
        assert!(is_external("//cdn.example.com/app.js"));
        assert!(!is_external("/js/app.js"));
        assert!(!is_external("js/app.js"));
    }

    #[test]
    fn resolves_relative_references_against_document_directory() {
        assert_eq!(
            resolve_reference("/pages/basic.html", "app.js"),
            "/pages/app.js"
        );
        assert_eq!(
            resolve_reference("/pages/basic.html", "../css/app.css"),
            "/css/app.css"
        );
        assert_eq!(
            resolve_reference("/pages/basic.html", "./nested/part.html"),
            "/pages/nested/part.html"
        );
    }

    #[test]
    fn keeps_absolute_references_unchanged() {
        assert_eq!(resolve_reference("/basic.html", "/js/app.js"), "/js/app.js");
        assert_eq!(
            resolve_reference("/basic.html", "https://example.com/app.js"),
            "https://example.com/app.js"
        );
        assert_eq!(
            resolve_reference("/basic.html", "//cdn.example.com/app.js"),
            "//cdn.example.com/app.js"
        );
    }

    #[test]
    fn filters_external_imports_from_feature_lists() {
        let features = vec![
            ImportFeature {
                url: "/import.html".into(),
                original_url: "import.html".into(),
            },
            ImportFeature {
                url: "https://example.com/widget.html".into(),
                original_url: "https://example.com/widget.html".into(),
            },
            ImportFeature {
                url: "/subimport.html".into(),
                original_url: "subimport.html".into(),
            },
        ];

        // Survivors keep the reference as written, not the resolved path.
        assert_eq!(list(&features), vec![
            "import.html".to_string(),
            "subimport.html".to_string()
        ]);
    }

    #[test]
    fn walks_trees_in_pre_order() {
        let tree = DependencyTree {
            href: Some("/basic.html".into()),
            imports: vec![DependencyTree {
                href: Some("/import.html".into()),
                imports: vec![DependencyTree {
                    href: Some("/subimport.html".into()),
                    ..Default::default()
                }],
                scripts: vec![reference("widget.js")],
                ..Default::default()
            }],
            scripts: vec![reference("/js/app.js")],
            styles: vec![reference("/css/app.css")],
        };

        assert_eq!(tree_to_urls(&tree), vec![
            "/basic.html".to_string(),
            "/import.html".to_string(),
            "/subimport.html".to_string(),
            "/widget.js".to_string(),
            "/js/app.js".to_string(),
            "/css/app.css".to_string(),
        ]);
    }

    #[test]
    fn skips_unresolved_imports_and_their_subtrees() {
        let tree = DependencyTree {
            href: Some("/basic.html".into()),
            imports: vec![DependencyTree {
                href: None,
                imports: vec![DependencyTree {
                    href: Some("/unreachable.html".into()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(tree_to_urls(&tree), vec!["/basic.html".to_string()]);
    }

    #[test]
    fn skips_inline_and_external_scripts() {
        let tree = DependencyTree {
            href: Some("/basic.html".into()),
            scripts: vec![
                ResourceReference::inline(),
                reference("https://example.com/analytics.js"),
                reference("/js/app.js"),
            ],
            ..Default::default()
        };

        assert_eq!(tree_to_urls(&tree), vec![
            "/basic.html".to_string(),
            "/js/app.js".to_string()
        ]);
    }

    #[test]
    fn keeps_external_style_links_in_tree_listing() {
        // Legacy asymmetry: only script references are external-filtered at
        // this layer. The assembler drops external URLs from the manifest.
        let tree = DependencyTree {
            href: Some("/basic.html".into()),
            styles: vec![
                ResourceReference::inline(),
                reference("https://example.com/theme.css"),
            ],
            ..Default::default()
        };

        assert_eq!(tree_to_urls(&tree), vec![
            "/basic.html".to_string(),
            "https://example.com/theme.css".to_string()
        ]);
    }

    #[test]
    fn listing_is_deterministic() {
        let tree = DependencyTree {
            href: Some("/basic.html".into()),
            imports: vec![
                DependencyTree {
                    href: Some("/a.html".into()),
                    ..Default::default()
                },
                DependencyTree {
                    href: Some("/b.html".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(tree_to_urls(&tree), tree_to_urls(&tree));
    }
}

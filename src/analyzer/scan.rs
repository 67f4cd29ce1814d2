//! Regex extraction of import, script and style references from HTML text.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::ResourceReference;

fn link_tag() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<link\b[^>]*>").expect("invalid link tag regex"))
}

fn script_tag() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<script\b([^>]*)>").expect("invalid script tag regex"))
}

fn style_tag() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<style\b[^>]*>").expect("invalid style tag regex"))
}

fn rel_attribute() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)rel\s*=\s*"([^"]*)""#).expect("invalid rel attribute regex")
    })
}

fn href_attribute() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)href\s*=\s*"([^"]*)""#).expect("invalid href attribute regex")
    })
}

fn src_attribute() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)src\s*=\s*"([^"]*)""#).expect("invalid src attribute regex")
    })
}

/// References extracted from a single HTML document.
#[derive(Debug, Default)]
pub struct ScannedDocument {
    /// Raw `href` values of `<link rel="import">` tags, in markup order.
    pub imports: Vec<String>,
    /// Script references; inline scripts carry no source.
    pub scripts: Vec<ResourceReference>,
    /// Stylesheet references; `<style>` blocks carry no source.
    pub styles: Vec<ResourceReference>,
}

/// Extract every import, script and style reference a document declares.
///
/// Attribute order within a tag does not matter; values are returned exactly
/// as written, without resolution or filtering.
pub fn scan_document(html: &str) -> ScannedDocument {
    let mut scanned = ScannedDocument::default();

    for tag in link_tag().find_iter(html) {
        let tag = tag.as_str();
        let Some(rel) = capture_value(rel_attribute(), tag) else {
            continue;
        };
        let href = capture_value(href_attribute(), tag);
        match rel.to_ascii_lowercase().as_str() {
            "import" => {
                if let Some(href) = href {
                    scanned.imports.push(href);
                }
            }
            "stylesheet" => scanned.styles.push(ResourceReference { source: href }),
            _ => {}
        }
    }

    for captures in script_tag().captures_iter(html) {
        let attributes = captures.get(1).map_or("", |m| m.as_str());
        scanned.scripts.push(ResourceReference {
            source: capture_value(src_attribute(), attributes),
        });
    }

    for _ in style_tag().find_iter(html) {
        scanned.styles.push(ResourceReference::inline());
    }

    scanned
}

fn capture_value(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}

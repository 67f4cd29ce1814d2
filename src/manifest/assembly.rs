//! Classification and merge rules for push manifest entries.

use crate::models::{Manifest, ManifestEntry, PushRecord};
use crate::resources::is_external;

/// Weight recorded for every discovered resource.
///
/// No source exposes a computed priority; weight is a placeholder scalar the
/// contract only guarantees as "present implies 1".
pub const DEFAULT_WEIGHT: u32 = 1;

/// Classify a resource path by its extension suffix.
///
/// Paths without a recognizable extension (API routes, for example) classify
/// as the empty string and are still pushed.
pub fn resource_type(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.').map(|(_, extension)| extension) {
        Some("css") => "style",
        Some("js") | Some("json") => "script",
        Some("html") => "document",
        _ => "",
    }
}

/// Build the manifest entry for one entry document's resource list.
///
/// The entry document's own path is omitted, external URLs are dropped
/// whatever their discovery path, and the first occurrence of a duplicate
/// path wins. Paths are not checked against the filesystem; the manifest
/// records declared dependencies, not verified ones.
pub fn assemble(entry_href: &str, urls: &[String]) -> ManifestEntry {
    let mut entry = ManifestEntry::new();
    for url in urls {
        if url == entry_href || is_external(url) || entry.contains_key(url) {
            continue;
        }
        entry.insert(url.clone(), PushRecord {
            weight: DEFAULT_WEIGHT,
            kind: resource_type(url).to_string(),
        });
    }
    entry
}

/// Merge per-entry manifests into one mapping keyed by entry identifier.
///
/// Entries stay independent; the same resource path may appear under several
/// entry keys with its own record in each.
pub fn merge_all(entries: Vec<(String, ManifestEntry)>) -> Manifest {
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(resource_type("/css/app.css"), "style");
        assert_eq!(resource_type("/js/app.js"), "script");
        assert_eq!(resource_type("/doesntexist.json"), "script");
        assert_eq!(resource_type("/import.html"), "document");
        assert_eq!(resource_type("/api/endpoint"), "");
        assert_eq!(resource_type("/api.v2/endpoint"), "");
    }

    #[test]
    fn skips_entry_document_and_external_urls() {
        let urls = vec![
            "/basic.html".to_string(),
            "/js/app.js".to_string(),
            "https://example.com/theme.css".to_string(),
        ];

        let entry = assemble("/basic.html", &urls);
        assert_eq!(entry.len(), 1);
        assert!(entry.contains_key("/js/app.js"));
    }

    #[test]
    fn first_occurrence_wins_for_duplicates() {
        let urls = vec!["/shared.js".to_string(), "/shared.js".to_string()];

        let entry = assemble("/basic.html", &urls);
        assert_eq!(entry.len(), 1);
        assert_eq!(entry["/shared.js"].weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn includes_paths_that_do_not_exist_on_disk() {
        let urls = vec![
            "/doesntexist.json".to_string(),
            "/api/endpoint".to_string(),
        ];

        let entry = assemble("/basic.html", &urls);
        assert_eq!(entry["/doesntexist.json"].kind, "script");
        assert_eq!(entry["/api/endpoint"].kind, "");
    }

    fn shared_entry() -> ManifestEntry {
        let mut entry = ManifestEntry::new();
        entry.insert("/shared.js".to_string(), PushRecord {
            weight: DEFAULT_WEIGHT,
            kind: "script".to_string(),
        });
        entry
    }

    #[test]
    fn merges_entries_without_cross_entry_dedup() {
        let manifest = merge_all(vec![
            ("A.html".to_string(), shared_entry()),
            ("B.html".to_string(), shared_entry()),
        ]);

        assert_eq!(manifest.len(), 2);
        assert!(manifest["A.html"].contains_key("/shared.js"));
        assert!(manifest["B.html"].contains_key("/shared.js"));
    }
}

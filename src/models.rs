//! Data structures describing dependency trees and push manifests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Node of the resolved dependency tree produced by the document analyzer.
///
/// A node with no `href` represents an import that could not be resolved;
/// downstream listing discards it along with its subtree.
#[derive(Debug, Clone, Default)]
pub struct DependencyTree {
    /// Site-root-absolute path of the document, or an external URL for
    /// imports hosted on another origin. `None` marks an unresolved import.
    pub href: Option<String>,
    /// Nested imports declared by this document, in markup order.
    pub imports: Vec<DependencyTree>,
    /// Script references attached to this document, in markup order.
    pub scripts: Vec<ResourceReference>,
    /// Stylesheet references attached to this document, in markup order.
    pub styles: Vec<ResourceReference>,
}

/// A script or stylesheet reference attached to a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    /// Reference target as written in markup; `None` marks inline content.
    pub source: Option<String>,
}

impl ResourceReference {
    /// Reference pointing at an explicit target.
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    /// Inline script or style with nothing to push.
    pub fn inline() -> Self {
        Self { source: None }
    }
}

/// An import discovered while walking the transitive import graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFeature {
    /// Resolved site-root-absolute URL of the imported document.
    pub url: String,
    /// Reference exactly as written in the importing document.
    pub original_url: String,
}

/// Push metadata recorded for a single resource path.
///
/// The `type` field is serialized even when empty so consumers can rely on
/// its presence for every path in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRecord {
    /// Push priority placeholder; currently always 1.
    pub weight: u32,
    /// Coarse resource classification: `document`, `script`, `style` or `""`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Mapping of resource paths to push metadata for one entry document.
pub type ManifestEntry = BTreeMap<String, PushRecord>;

/// Mapping of entry-document identifiers to their manifest entries.
pub type Manifest = BTreeMap<String, ManifestEntry>;

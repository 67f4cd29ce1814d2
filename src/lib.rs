#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod analyzer;
pub mod manifest;
pub mod models;
pub mod resources;

pub use analyzer::{AnalyzerError, DocumentAnalyzer};
pub use manifest::{DEFAULT_MANIFEST_NAME, ManifestFile, ManifestOptions, PushManifest};
pub use models::{
    DependencyTree, ImportFeature, Manifest, ManifestEntry, PushRecord, ResourceReference,
};

//! Push manifest generation across one or more entry documents.

mod assembly;
mod writer;

pub use assembly::{DEFAULT_WEIGHT, assemble, merge_all, resource_type};
pub use writer::write_manifest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analyzer::DocumentAnalyzer;
use crate::models::{Manifest, ManifestEntry};
use crate::resources;

/// Default file name for the generated manifest.
pub const DEFAULT_MANIFEST_NAME: &str = "push_manifest.json";

/// Serialized manifest layout: flat for a single entry document, nested under
/// entry identifiers when several documents are analyzed in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestFile {
    /// Flat mapping of resource paths to push records.
    Single(ManifestEntry),
    /// Mapping of entry identifiers to their flat manifests.
    Multi(Manifest),
}

/// Options controlling a manifest generation run.
#[derive(Debug, Clone, Default)]
pub struct ManifestOptions {
    /// Entry HTML documents to analyze; directories resolve to `index.html`.
    pub input_paths: Vec<PathBuf>,
    /// Site root used to resolve root-absolute references. When absent, each
    /// entry resolves against its own parent directory.
    pub base_path: Option<PathBuf>,
    /// Output file name; defaults to [`DEFAULT_MANIFEST_NAME`].
    pub name: Option<String>,
}

/// Generator producing one push manifest from one or more entry documents.
#[derive(Debug, Clone)]
pub struct PushManifest {
    input_paths: Vec<PathBuf>,
    base_path: Option<PathBuf>,
    name: String,
}

impl PushManifest {
    /// Create a generator for the provided options.
    pub fn new(options: ManifestOptions) -> Self {
        Self {
            input_paths: options.input_paths,
            base_path: options.base_path,
            name: options
                .name
                .unwrap_or_else(|| DEFAULT_MANIFEST_NAME.to_string()),
        }
    }

    /// Output file name the manifest will be written under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Analyze every entry document and assemble the combined manifest.
    ///
    /// Entries are processed independently; any entry failing analysis aborts
    /// the run, and nothing is written for a failed run.
    pub fn generate(&self) -> Result<ManifestFile> {
        let mut entries: Vec<(String, ManifestEntry)> = Vec::new();

        for input in &self.input_paths {
            // Without an explicit base each entry resolves against its own
            // parent directory, so the input itself must be absolute first.
            let resolved = if self.base_path.is_none() && !input.is_absolute() {
                std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(input)
            } else {
                input.clone()
            };

            let analyzer = DocumentAnalyzer::new(self.entry_base(&resolved));
            let entry_href = analyzer.resolve_input(&resolved);
            let tree = analyzer
                .analyze(&resolved)
                .with_context(|| format!("failed to analyze {}", input.display()))?;

            let urls = resources::tree_to_urls(&tree);
            debug!("{} declares {} resources", input.display(), urls.len());

            entries.push((self.entry_identifier(input), assemble(&entry_href, &urls)));
        }

        if entries.len() == 1 {
            let (_, entry) = entries.remove(0);
            Ok(ManifestFile::Single(entry))
        } else {
            Ok(ManifestFile::Multi(merge_all(entries)))
        }
    }

    /// Write a generated manifest to the configured file name.
    pub fn write(&self, manifest: &ManifestFile) -> Result<()> {
        write_manifest(manifest, Path::new(&self.name))
    }

    fn entry_base(&self, input: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.clone(),
            None => input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        }
    }

    fn entry_identifier(&self, input: &Path) -> String {
        match &self.base_path {
            Some(_) => input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.to_string_lossy().into_owned()),
            None => {
                let invocation_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                relative_identifier(input, &invocation_dir)
            }
        }
    }
}

/// Identifier for an entry analyzed without an explicit base: the input path
/// relative to the invocation directory, with forward slashes.
fn relative_identifier(input: &Path, invocation_dir: &Path) -> String {
    let relative = match input.strip_prefix(invocation_dir) {
        Ok(path) => path,
        Err(_) => input,
    };
    relative.to_string_lossy().replace('\\', "/")
}

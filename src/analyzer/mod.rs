//! Document analysis engine resolving HTML dependency graphs on disk.
//!
//! The analyzer owns everything that touches the filesystem or markup: it
//! resolves an input path against a fixed site root, scans the document for
//! import, script and style references and recursively follows local imports
//! to build a [`DependencyTree`]. Consumers receive the resolved tree (or the
//! flat import feature set) and never re-read markup themselves.

pub mod scan;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::models::{DependencyTree, ImportFeature};
use crate::resources::{is_external, resolve_reference};
use self::scan::scan_document;

/// Default document served for directory inputs.
pub const DIRECTORY_INDEX: &str = "index.html";

/// Errors surfaced by the document analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The entry document could not be resolved or read.
    #[error("failed to analyze {}: {source}", path.display())]
    AnalysisFailed {
        /// Entry path that failed to resolve.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Analyzer resolving documents against a fixed site root.
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer {
    base_path: PathBuf,
}

impl DocumentAnalyzer {
    /// Create an analyzer rooted at the given base directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Site root this analyzer resolves documents against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Root-relative href for an input path.
    ///
    /// Relative inputs resolve against the base path; directory inputs
    /// resolve to their [`DIRECTORY_INDEX`]. The result always starts with
    /// `/` and uses forward slashes.
    pub fn resolve_input(&self, input: &Path) -> String {
        let mut full = if input.is_absolute() {
            input.to_path_buf()
        } else {
            self.base_path.join(input)
        };
        if full.is_dir() {
            full = full.join(DIRECTORY_INDEX);
        }

        let relative = match full.strip_prefix(&self.base_path) {
            Ok(path) => path,
            Err(_) => full.as_path(),
        };
        format!(
            "/{}",
            relative
                .to_string_lossy()
                .replace('\\', "/")
                .trim_start_matches('/')
        )
    }

    /// Build the dependency tree for one entry document.
    ///
    /// Imports are followed depth-first. An import whose target cannot be
    /// read becomes a node without an href; a visited set keyed by resolved
    /// href keeps cyclic or repeated imports from being descended twice.
    pub fn analyze(&self, input: &Path) -> Result<DependencyTree, AnalyzerError> {
        let href = self.resolve_input(input);
        let html = self
            .read_document(&href)
            .map_err(|source| AnalyzerError::AnalysisFailed {
                path: input.to_path_buf(),
                source,
            })?;

        let mut visited = BTreeSet::new();
        visited.insert(href.clone());
        Ok(self.build_node(href, &html, &mut visited))
    }

    /// Flat transitive import feature set for one entry document.
    ///
    /// Features are reported in discovery order, deduplicated by resolved
    /// URL. External imports are included; filtering them is the resource
    /// lister's concern.
    pub fn analyze_imports(&self, input: &Path) -> Result<Vec<ImportFeature>, AnalyzerError> {
        let href = self.resolve_input(input);
        let html = self
            .read_document(&href)
            .map_err(|source| AnalyzerError::AnalysisFailed {
                path: input.to_path_buf(),
                source,
            })?;

        let mut visited = BTreeSet::new();
        visited.insert(href.clone());
        let mut features = Vec::new();
        self.collect_imports(&href, &html, &mut visited, &mut features);
        Ok(features)
    }

    fn read_document(&self, href: &str) -> std::io::Result<String> {
        let on_disk = self.base_path.join(href.trim_start_matches('/'));
        fs::read_to_string(on_disk)
    }

    fn build_node(
        &self,
        href: String,
        html: &str,
        visited: &mut BTreeSet<String>,
    ) -> DependencyTree {
        let scanned = scan_document(html);
        let mut imports = Vec::new();

        for raw in &scanned.imports {
            let resolved = resolve_reference(&href, raw);
            if is_external(&resolved) {
                imports.push(DependencyTree {
                    href: Some(resolved),
                    ..Default::default()
                });
                continue;
            }
            if visited.contains(&resolved) {
                debug!("{resolved} already visited, not descending again");
                imports.push(DependencyTree {
                    href: Some(resolved),
                    ..Default::default()
                });
                continue;
            }
            // Only successfully read documents count as visited, so a broken
            // import stays an href-less node on every occurrence.
            match self.read_document(&resolved) {
                Ok(child) => {
                    visited.insert(resolved.clone());
                    imports.push(self.build_node(resolved, &child, visited));
                }
                Err(err) => {
                    warn!("dropping unresolved import {resolved}: {err}");
                    imports.push(DependencyTree::default());
                }
            }
        }

        DependencyTree {
            href: Some(href),
            imports,
            scripts: scanned.scripts,
            styles: scanned.styles,
        }
    }

    fn collect_imports(
        &self,
        href: &str,
        html: &str,
        visited: &mut BTreeSet<String>,
        features: &mut Vec<ImportFeature>,
    ) {
        for raw in scan_document(html).imports {
            let resolved = resolve_reference(href, &raw);
            if !visited.insert(resolved.clone()) {
                continue;
            }
            features.push(ImportFeature {
                url: resolved.clone(),
                original_url: raw,
            });
            if is_external(&resolved) {
                continue;
            }
            match self.read_document(&resolved) {
                Ok(child) => self.collect_imports(&resolved, &child, visited, features),
                Err(err) => warn!("dropping unresolved import {resolved}: {err}"),
            }
        }
    }
}

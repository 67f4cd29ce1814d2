//! Serialization of generated manifests to disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::ManifestFile;

/// Serialize a manifest as prettified JSON and write it to `path`.
pub fn write_manifest(manifest: &ManifestFile, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("failed to serialize push manifest")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

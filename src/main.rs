//! Command-line entry point generating push manifests for HTML documents.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use push_manifest::{DEFAULT_MANIFEST_NAME, ManifestFile, ManifestOptions, PushManifest};

#[derive(Debug, Parser)]
#[command(name = "http2-push-manifest")]
#[command(about = "Generate an HTTP/2 push manifest from the static dependencies of HTML files")]
struct Cli {
    /// Entry HTML document to analyze; repeat for multiple entries.
    #[arg(short = 'f', long = "file", required = true)]
    files: Vec<PathBuf>,

    /// Site root used to resolve root-absolute resource paths.
    #[arg(short = 'b', long = "base")]
    base: Option<PathBuf>,

    /// Output manifest file name.
    #[arg(short = 'm', long = "manifest", default_value = DEFAULT_MANIFEST_NAME)]
    manifest: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let manifest = PushManifest::new(ManifestOptions {
        input_paths: cli.files,
        base_path: cli.base,
        name: Some(cli.manifest),
    });

    let output = manifest.generate()?;
    match &output {
        ManifestFile::Single(entry) => info!("{} resources discovered", entry.len()),
        ManifestFile::Multi(merged) => info!("{} entry documents analyzed", merged.len()),
    }

    manifest.write(&output)?;
    println!("Wrote {}", manifest.name());
    Ok(())
}

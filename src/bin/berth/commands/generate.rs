//! `berth generate` command

use anyhow::Result;

use super::Session;
use crate::cli::GenerateArgs;
use berth::ops::manifest::DEFAULT_RUNTIME_CRATE;
use berth::ops::{write_manifest, ManifestOptions};

/// Manifest file name used when neither flag nor config names one.
const DEFAULT_OUTPUT: &str = "deps.rs";

pub fn execute(args: GenerateArgs, verbose: bool) -> Result<()> {
    let session = Session::load(&args.products)?;
    let manifest_cfg = &session.config.manifest;

    // CLI > config > default; config paths are relative to the project.
    let output = match (&args.output, &manifest_cfg.output) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => session.base_dir.join(path),
        (None, None) => session.base_dir.join(DEFAULT_OUTPUT),
    };

    let runtime_crate = args
        .runtime_crate
        .or_else(|| manifest_cfg.runtime_crate.clone())
        .unwrap_or_else(|| DEFAULT_RUNTIME_CRATE.to_string());

    let mut opts = ManifestOptions::new(session.platform)
        .with_verbose(verbose)
        .with_runtime_crate(runtime_crate);
    if let Some(package) = args.package.or_else(|| manifest_cfg.package.clone()) {
        opts = opts.with_package(package);
    }

    write_manifest(&output, &session.products, &opts)?;

    println!("{}", output.display());
    Ok(())
}

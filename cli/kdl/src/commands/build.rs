//! `kdl build` — assemble the input and write the container.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use kdl_target::BuildTarget;

use crate::commands::BuildSettings;
use crate::listing;

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub artifact: PathBuf,
    pub types: usize,
    pub resources: usize,
}

/// Run a build.
pub fn run(settings: &BuildSettings) -> Result<BuildReport> {
    if !settings.input.is_file() {
        bail!("input file not found: {}", settings.input.display());
    }

    let paths = Arc::new(settings.target_paths());
    let mut target = BuildTarget::with_resource_file(paths);
    target.set_format(settings.format);

    let mut types = 0;
    let mut resources = 0;

    if let Some(scenario) = &settings.scenario {
        let manifest = target.scenario_manifest(scenario)?;
        let summary = listing::assemble(&manifest, &mut target)
            .with_context(|| format!("assembling scenario '{scenario}'"))?;
        types += summary.types;
        resources += summary.resources;
    }

    let summary = listing::assemble(&settings.input, &mut target)?;
    types += summary.types;
    resources += summary.resources;

    let artifact = target.save()?;
    println!(
        "Wrote {resources} resources ({types} types, {}) to {}",
        settings.format,
        artifact.display()
    );

    Ok(BuildReport {
        artifact,
        types,
        resources,
    })
}

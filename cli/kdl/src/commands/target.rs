//! `kdl target` — show where a build would write its artifact.

use anyhow::Result;
use kdl_target::{Format, TargetPaths};
use serde::Serialize;

use crate::commands::BuildSettings;

#[derive(Debug, Serialize)]
struct TargetDescription<'a> {
    artifact: String,
    format: Format,
    paths: &'a TargetPaths,
}

/// Print the artifact path, or the full resolution as JSON.
pub fn run(settings: &BuildSettings, json: bool) -> Result<()> {
    let paths = settings.target_paths();
    let artifact = artifact_path(settings, &paths);

    if json {
        let description = TargetDescription {
            artifact,
            format: settings.format,
            paths: &paths,
        };
        println!("{}", serde_json::to_string_pretty(&description)?);
    } else {
        println!("{artifact}");
        if paths.create_destination() {
            println!("  (directory {} will be created)", paths.destination_root());
        }
    }
    Ok(())
}

pub(crate) fn artifact_path(settings: &BuildSettings, paths: &TargetPaths) -> String {
    kdl_target::paths::target_file_path(
        paths.destination_root(),
        paths.destination_file(),
        settings.format,
    )
}

//! `kdl scenario` — locate a scenario's manifest.

use std::path::PathBuf;

use anyhow::Result;
use kdl_target::{OsFileSystem, PathResolver};

/// Print and return the manifest path of scenario `name` under `root`.
pub fn run(root: &str, name: &str) -> Result<PathBuf> {
    let mut resolver = PathResolver::new();
    resolver.set_scenario_root(root);
    let manifest = resolver.resolve().scenario_manifest(name, &OsFileSystem)?;
    println!("{}", manifest.display());
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("space")).unwrap();
        std::fs::write(dir.path().join("space").join("manifest.kdl"), "").unwrap();

        let root = format!("{}/", dir.path().display());
        let manifest = run(&root, "space").unwrap();
        assert_eq!(manifest, dir.path().join("space").join("manifest.kdl"));
    }

    #[test]
    fn missing_scenario_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().display().to_string(), "space").unwrap_err();
        assert!(err.to_string().contains("could not find scenario named 'space'"));
    }
}

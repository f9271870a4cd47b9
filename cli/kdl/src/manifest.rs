//! `kdl.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kdl_target::Format;
use serde::{Deserialize, Serialize};

/// Name of the project manifest file.
pub const MANIFEST_FILE: &str = "kdl.toml";

/// The top-level manifest structure for a KDL project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdlManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Build defaults.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Build section. Every key can be overridden on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Main input file, relative to the project directory.
    #[serde(default)]
    pub input: Option<String>,
    /// Destination path, relative to the project directory.
    #[serde(default)]
    pub output: Option<String>,
    /// Container format.
    #[serde(default)]
    pub format: Option<Format>,
    /// Directory holding scenarios.
    #[serde(default)]
    pub scenarios: Option<String>,
    /// Scenario assembled before the input.
    #[serde(default)]
    pub scenario: Option<String>,
}

impl KdlManifest {
    /// Search upward from `start_dir` for a `kdl.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: KdlManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing kdl.toml")
    }

    /// Generate the default template for `kdl init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"

[build]
input = "src/main.kdl"
output = "out/{name}"
format = "classic"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[project]
name = "space-plugin"
description = "Extra ships"

[build]
input = "src/ships.kdl"
output = "out/ships"
format = "extended"
scenarios = "~/Scenarios"
scenario = "space"
"#;
        let manifest = KdlManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.project.name, "space-plugin");
        assert_eq!(manifest.build.input.as_deref(), Some("src/ships.kdl"));
        assert_eq!(manifest.build.format, Some(Format::Extended));
        assert_eq!(manifest.build.scenario.as_deref(), Some("space"));
        assert_eq!(manifest.build.scenarios.as_deref(), Some("~/Scenarios"));
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = KdlManifest::from_str("[project]\nname = \"minimal\"\n").unwrap();
        assert_eq!(manifest.project.name, "minimal");
        assert!(manifest.build.output.is_none());
        assert!(manifest.build.format.is_none());
    }

    #[test]
    fn reject_unknown_format() {
        let bad = "[project]\nname = \"x\"\n[build]\nformat = \"pict\"\n";
        assert!(KdlManifest::from_str(bad).is_err());
    }

    #[test]
    fn template_is_valid_toml() {
        let manifest = KdlManifest::from_str(&KdlManifest::template("demo")).unwrap();
        assert_eq!(manifest.project.name, "demo");
        assert_eq!(manifest.build.output.as_deref(), Some("out/demo"));
        assert_eq!(manifest.build.format, Some(Format::Classic));
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[project]\nname = \"parent\"\n").unwrap();
        let nested = dir.path().join("src").join("types");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = KdlManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.project.name, "parent");
        assert_eq!(found_dir, dir.path());
    }
}

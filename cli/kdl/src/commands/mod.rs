//! CLI command implementations.

pub mod build;
pub mod init;
pub mod scenario;
pub mod target;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use kdl_target::{expand_tilde, Format, PathResolver, TargetPaths};

use crate::manifest::KdlManifest;

/// Build options given on the command line. Unset options fall back to the
/// manifest, then to the build target's defaults.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub input: Option<String>,
    pub output: Option<String>,
    pub format: Option<Format>,
    pub scenarios: Option<String>,
    pub scenario: Option<String>,
}

/// Fully merged build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub input: PathBuf,
    pub output: Option<String>,
    pub format: Format,
    pub scenarios: Option<String>,
    pub scenario: Option<String>,
}

impl BuildSettings {
    /// Merge command-line options over the manifest's `[build]` section.
    ///
    /// Manifest paths are relative to the project directory; command-line
    /// paths are used as given. A leading `~` is expanded in both.
    pub fn resolve(
        options: BuildOptions,
        manifest: Option<&KdlManifest>,
        project_dir: &Path,
    ) -> Result<Self> {
        let build = manifest.map(|m| m.build.clone()).unwrap_or_default();
        let from_manifest =
            |value: Option<String>| value.map(|v| project_relative(project_dir, &v));
        let from_flag = |value: Option<String>| value.map(|v| expand_tilde(&v));

        let input = match from_flag(options.input).or_else(|| from_manifest(build.input)) {
            Some(input) => PathBuf::from(input),
            None => bail!("no input file given and no [build] input in kdl.toml"),
        };

        Ok(Self {
            input,
            output: from_flag(options.output).or_else(|| from_manifest(build.output)),
            format: options.format.or(build.format).unwrap_or_default(),
            scenarios: from_flag(options.scenarios).or_else(|| from_manifest(build.scenarios)),
            scenario: options.scenario.or(build.scenario),
        })
    }

    /// Resolve the build target's paths from these settings.
    pub fn target_paths(&self) -> TargetPaths {
        let mut resolver = PathResolver::new();

        let input = self.input.to_string_lossy();
        if input.ends_with(kdl_target::paths::SOURCE_EXTENSION) {
            resolver.set_source_root(&input);
        } else {
            let parent = match self.input.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().into_owned(),
                _ => ".".to_string(),
            };
            resolver.set_source_root(&parent);
        }

        if let Some(output) = &self.output {
            resolver.set_destination_path(output);
        }
        if let Some(root) = &self.scenarios {
            resolver.set_scenario_root(root);
        }
        resolver.resolve()
    }
}

/// Resolve a manifest path against the project directory. `~` is expanded to
/// the home directory; absolute paths are kept.
pub(crate) fn project_relative(project_dir: &Path, value: &str) -> String {
    if value.starts_with('~') {
        expand_tilde(value)
    } else if Path::new(value).is_absolute() {
        value.to_string()
    } else {
        project_dir.join(value).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(build: &str) -> KdlManifest {
        toml::from_str(&format!("[project]\nname = \"t\"\n[build]\n{build}")).unwrap()
    }

    #[test]
    fn flags_override_manifest() {
        let m = manifest("input = \"src/main.kdl\"\nformat = \"rez\"\noutput = \"out/x\"\n");
        let options = BuildOptions {
            format: Some(Format::Extended),
            output: Some("/tmp/y".into()),
            ..Default::default()
        };
        let settings = BuildSettings::resolve(options, Some(&m), Path::new("/proj")).unwrap();
        assert_eq!(settings.input, PathBuf::from("/proj/src/main.kdl"));
        assert_eq!(settings.format, Format::Extended);
        assert_eq!(settings.output.as_deref(), Some("/tmp/y"));
    }

    #[test]
    fn manifest_paths_are_project_relative() {
        let m = manifest("input = \"main.kdl\"\noutput = \"out/\"\nscenarios = \"~/Scenarios\"\n");
        let settings =
            BuildSettings::resolve(BuildOptions::default(), Some(&m), Path::new("/proj")).unwrap();
        assert_eq!(settings.output.as_deref(), Some("/proj/out/"));
        assert_eq!(settings.scenarios, Some(expand_tilde("~/Scenarios")));
        assert_eq!(settings.format, Format::Classic);
    }

    #[test]
    fn manifest_tilde_paths_expand_to_home() {
        let home = expand_tilde("~");
        if home == "~" {
            return;
        }
        let m = manifest("input = \"~/src/main.kdl\"\noutput = \"~/plugins/x\"\n");
        let settings =
            BuildSettings::resolve(BuildOptions::default(), Some(&m), Path::new("/proj")).unwrap();
        let paths = settings.target_paths();
        assert_eq!(paths.destination_root(), format!("{home}/plugins"));
        assert_eq!(paths.destination_file(), "x");
        assert_eq!(paths.source_root(), format!("{home}/src"));
        assert!(!paths.destination_root().contains('~'));
    }

    #[test]
    fn flag_tilde_paths_expand_to_home() {
        let home = expand_tilde("~");
        if home == "~" {
            return;
        }
        let options = BuildOptions {
            input: Some("~/main.kdl".into()),
            output: Some("~/out/".into()),
            ..Default::default()
        };
        let settings = BuildSettings::resolve(options, None, Path::new(".")).unwrap();
        assert_eq!(settings.input, PathBuf::from(format!("{home}/main.kdl")));
        assert_eq!(settings.target_paths().destination_root(), format!("{home}/out"));
    }

    #[test]
    fn input_is_required() {
        let err = BuildSettings::resolve(BuildOptions::default(), None, Path::new("."));
        assert!(err.is_err());
    }

    #[test]
    fn source_root_follows_input() {
        let settings = BuildSettings::resolve(
            BuildOptions {
                input: Some("/proj/src/main.kdl".into()),
                ..Default::default()
            },
            None,
            Path::new("."),
        )
        .unwrap();
        assert_eq!(settings.target_paths().source_root(), "/proj/src");

        let settings = BuildSettings::resolve(
            BuildOptions {
                input: Some("/proj/listing.toml".into()),
                ..Default::default()
            },
            None,
            Path::new("."),
        )
        .unwrap();
        assert_eq!(settings.target_paths().source_root(), "/proj");
    }
}

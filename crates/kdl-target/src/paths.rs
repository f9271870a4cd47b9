//! Destination, source and scenario path resolution.
//!
//! A [`PathResolver`] takes the user-supplied locations once, at the start of
//! a run, and produces an immutable [`TargetPaths`] that the build target
//! holds for the rest of the run.
//!
//! Roots are stored as text without a trailing separator. The filesystem
//! root itself is stored as the empty string, which joins back as `/name`.

use std::path::{is_separator, Path, PathBuf};
use std::sync::Arc;

use kdl_rsrc::Format;
use serde::Serialize;

use crate::error::{Result, TargetError};
use crate::fs::{FileSystem, OsFileSystem};

/// File name used when the destination names a directory.
pub const DEFAULT_OUTPUT_FILE: &str = "result";

/// Manifest file expected inside every scenario directory.
pub const SCENARIO_MANIFEST: &str = "manifest.kdl";

/// Extension identifying a KDL source file.
pub const SOURCE_EXTENSION: &str = ".kdl";

/// Expands to the source root.
pub const ROOT_PATH_MACRO: &str = "@rpath";
/// Reserved for the scenario root; not expanded.
pub const SCENARIO_PATH_MACRO: &str = "@spath";
/// Reserved for the output root; not expanded.
pub const OUTPUT_PATH_MACRO: &str = "@opath";

const SEPARATOR: char = '/';

/// Resolved locations for one compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetPaths {
    destination_root: String,
    destination_file: String,
    create_destination: bool,
    source_root: String,
    scenario_root: String,
}

impl Default for TargetPaths {
    fn default() -> Self {
        Self {
            destination_root: ".".to_string(),
            destination_file: DEFAULT_OUTPUT_FILE.to_string(),
            create_destination: false,
            source_root: ".".to_string(),
            scenario_root: ".".to_string(),
        }
    }
}

impl TargetPaths {
    pub fn destination_root(&self) -> &str {
        &self.destination_root
    }

    pub fn destination_file(&self) -> &str {
        &self.destination_file
    }

    /// Whether the destination directory did not exist at resolution time
    /// and must be created before the artifact is written.
    pub fn create_destination(&self) -> bool {
        self.create_destination
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    pub fn scenario_root(&self) -> &str {
        &self.scenario_root
    }

    /// Expand a leading `@rpath` to the source root.
    ///
    /// `@spath` and `@opath` are recognized but have no defined expansion
    /// yet, so they pass through unchanged, as does any other path.
    pub fn resolve_source_path(&self, path: &str) -> String {
        if let Some(rest) = path.strip_prefix(ROOT_PATH_MACRO) {
            let resolved = format!("{}{rest}", self.source_root);
            log::debug!("resolved {path} to {resolved}");
            return resolved;
        }

        for reserved in [SCENARIO_PATH_MACRO, OUTPUT_PATH_MACRO] {
            if path.starts_with(reserved) {
                log::warn!("path macro {reserved} is not supported; using '{path}' as written");
            }
        }
        path.to_string()
    }

    /// Locate the manifest of the named scenario under the scenario root.
    pub fn scenario_manifest(&self, name: &str, fs: &dyn FileSystem) -> Result<PathBuf> {
        let dir = PathBuf::from(format!(
            "{}{SEPARATOR}{name}",
            expand_tilde(&self.scenario_root)
        ));
        if !fs.is_dir(&dir) {
            return Err(TargetError::ScenarioNotFound {
                name: name.to_string(),
                path: dir,
            });
        }

        let manifest = dir.join(SCENARIO_MANIFEST);
        if !fs.exists(&manifest) {
            return Err(TargetError::MissingManifest {
                name: name.to_string(),
                path: manifest,
            });
        }

        log::debug!("scenario '{name}' manifest at {}", manifest.display());
        Ok(manifest)
    }
}

/// Join a destination root, file name and the format's extension.
pub fn target_file_path(root: &str, file: &str, format: Format) -> String {
    let mut path = root.to_string();
    if !path.ends_with(is_separator) {
        path.push(SEPARATOR);
    }
    path.push_str(file);
    path.push('.');
    path.push_str(format.extension());
    path
}

/// Replace a leading `~` with the current user's home directory.
pub fn expand_tilde(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(is_separator) => rest,
        _ => return path.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => format!("{}{rest}", home.display()),
        None => path.to_string(),
    }
}

/// Builds [`TargetPaths`] from user-supplied locations.
pub struct PathResolver {
    fs: Arc<dyn FileSystem>,
    paths: TargetPaths,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    pub fn new() -> Self {
        Self::with_filesystem(Arc::new(OsFileSystem))
    }

    pub fn with_filesystem(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            paths: TargetPaths::default(),
        }
    }

    /// Split a destination path into a root directory and a file name.
    ///
    /// - An existing file: the last segment is the file name.
    /// - An existing directory: the whole path is the root, the file is
    ///   [`DEFAULT_OUTPUT_FILE`].
    /// - Anything else: the last segment is the intended file name (or
    ///   [`DEFAULT_OUTPUT_FILE`] when the path ends in a separator). If the
    ///   directory part does not exist it is marked for creation.
    pub fn set_destination_path(&mut self, path: &str) -> &mut Self {
        let probe = Path::new(path);
        let (root, file, create) = if self.fs.exists(probe) && !self.fs.is_dir(probe) {
            let (root, file) = split_last_segment(path);
            (root, file, false)
        } else if self.fs.exists(probe) {
            (path, DEFAULT_OUTPUT_FILE, false)
        } else {
            let (root, file) = split_last_segment(path);
            let file = if file.is_empty() {
                DEFAULT_OUTPUT_FILE
            } else {
                file
            };
            let create = !self.fs.is_dir(&probe_dir(root));
            (root, file, create)
        };

        self.paths.destination_root = strip_trailing_separator(root);
        self.paths.destination_file = file.to_string();
        self.paths.create_destination = create;
        log::debug!(
            "destination root '{}', file '{}'{}",
            self.paths.destination_root,
            self.paths.destination_file,
            if create { " (to be created)" } else { "" }
        );
        self
    }

    pub fn set_scenario_root(&mut self, path: &str) -> &mut Self {
        self.paths.scenario_root = strip_trailing_separator(path);
        self
    }

    /// Set the root that `@rpath` expands to.
    ///
    /// A path naming a `.kdl` source file is reduced to its directory.
    pub fn set_source_root(&mut self, path: &str) -> &mut Self {
        let root = if path.ends_with(SOURCE_EXTENSION) {
            match path.rfind(is_separator) {
                Some(i) => &path[..=i],
                None => ".",
            }
        } else {
            path
        };
        self.paths.source_root = strip_trailing_separator(root);
        self
    }

    pub fn paths(&self) -> &TargetPaths {
        &self.paths
    }

    /// Finish resolution.
    pub fn resolve(self) -> TargetPaths {
        self.paths
    }
}

/// Split at the last separator. The root keeps its trailing separator; a
/// path without one lives in the current directory.
fn split_last_segment(path: &str) -> (&str, &str) {
    match path.rfind(is_separator) {
        Some(i) => (&path[..=i], &path[i + 1..]),
        None => (".", path),
    }
}

fn strip_trailing_separator(path: &str) -> String {
    path.trim_end_matches(is_separator).to_string()
}

fn probe_dir(root: &str) -> PathBuf {
    let stripped = root.trim_end_matches(is_separator);
    if stripped.is_empty() && !root.is_empty() {
        PathBuf::from(SEPARATOR.to_string())
    } else {
        PathBuf::from(stripped)
    }
}

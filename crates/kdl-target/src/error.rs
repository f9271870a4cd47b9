//! Error types for build target operations.

use std::path::PathBuf;

use kdl_core::SourceLocation;
use kdl_rsrc::RsrcError;

/// Errors that end a compilation run.
///
/// None of these are recoverable inside the build target; they are returned
/// to the driver, which reports them and decides how to exit.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// A type was referenced before (or without) being defined.
    #[error("{location}: missing definition for type '{name}'")]
    MissingType {
        name: String,
        location: SourceLocation,
    },

    /// The scenario directory does not exist.
    #[error("could not find scenario named '{name}' (looked for {})", path.display())]
    ScenarioNotFound { name: String, path: PathBuf },

    /// The scenario directory exists but has no manifest.
    #[error("scenario '{name}' is missing a 'manifest.kdl' file ({})", path.display())]
    MissingManifest { name: String, path: PathBuf },

    /// The destination directory could not be created.
    #[error("could not create destination directory {}: {source}", path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container writer failed to serialize or write the artifact.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: RsrcError,
    },
}

/// Result type for build target operations.
pub type Result<T> = std::result::Result<T, TargetError>;

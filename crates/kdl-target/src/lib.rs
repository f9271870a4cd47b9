//! Build target for the KDL resource assembler.
//!
//! The build target is where a compilation run ends up. It owns:
//! - **Path resolution:** where the artifact is written, where `@rpath`
//!   sources live and where scenarios are found ([`paths`]).
//! - **Type containers:** the type definitions visible to the front end
//!   ([`registry`]).
//! - **Resource accumulation:** forwarding finished resources to the
//!   container writer ([`accumulator`]).
//! - **Emission:** choosing the output format and saving the artifact
//!   exactly once ([`target`]).

pub mod accumulator;
pub mod error;
pub mod fs;
pub mod paths;
pub mod registry;
pub mod target;

pub use accumulator::{ContainerWriter, ResourceAccumulator};
pub use error::{Result, TargetError};
pub use fs::{FileSystem, OsFileSystem};
pub use kdl_rsrc::Format;
pub use paths::{expand_tilde, PathResolver, TargetPaths};
pub use registry::TypeContainerRegistry;
pub use target::{BuildTarget, TargetState};

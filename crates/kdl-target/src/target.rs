//! The build target façade.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kdl_core::{Lexeme, ResourceInstance, TypeContainer};
use kdl_rsrc::{Format, ResourceFile};

use crate::accumulator::{ContainerWriter, ResourceAccumulator};
use crate::error::{Result, TargetError};
use crate::fs::{FileSystem, OsFileSystem};
use crate::paths::{target_file_path, TargetPaths};
use crate::registry::TypeContainerRegistry;

/// Lifecycle of a build target.
///
/// `Configuring -> Emitting -> Done`. A failed save returns to
/// `Configuring`; nothing moves back from `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Configuring,
    Emitting,
    Done,
}

/// The output of one compilation run.
///
/// The front end registers type containers and adds resources while
/// parsing; the driver calls [`BuildTarget::save`] once at the end.
/// Calling `save` again recomputes the path and rewrites the artifact, but
/// that is not a supported use.
pub struct BuildTarget<W = ResourceFile> {
    paths: Arc<TargetPaths>,
    format: Format,
    output_file: Option<String>,
    registry: TypeContainerRegistry,
    resources: ResourceAccumulator<W>,
    fs: Arc<dyn FileSystem>,
    state: TargetState,
}

impl BuildTarget<ResourceFile> {
    /// A build target backed by an in-memory [`ResourceFile`].
    pub fn with_resource_file(paths: Arc<TargetPaths>) -> Self {
        Self::new(paths, ResourceFile::new())
    }
}

impl<W: ContainerWriter> BuildTarget<W> {
    pub fn new(paths: Arc<TargetPaths>, writer: W) -> Self {
        Self {
            paths,
            format: Format::default(),
            output_file: None,
            registry: TypeContainerRegistry::new(),
            resources: ResourceAccumulator::new(writer),
            fs: Arc::new(OsFileSystem),
            state: TargetState::Configuring,
        }
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn paths(&self) -> &TargetPaths {
        &self.paths
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Override the artifact's file name (without extension).
    pub fn set_output_file(&mut self, name: impl Into<String>) {
        self.output_file = Some(name.into());
    }

    pub fn output_file(&self) -> &str {
        self.output_file
            .as_deref()
            .unwrap_or_else(|| self.paths.destination_file())
    }

    /// Where [`save`](Self::save) will write the artifact.
    pub fn target_file_path(&self) -> String {
        target_file_path(self.paths.destination_root(), self.output_file(), self.format)
    }

    pub fn resolve_source_path(&self, path: &str) -> String {
        self.paths.resolve_source_path(path)
    }

    pub fn scenario_manifest(&self, name: &str) -> Result<PathBuf> {
        self.paths.scenario_manifest(name, self.fs.as_ref())
    }

    // Type containers

    pub fn add_type_container(&mut self, container: TypeContainer) {
        self.registry.add(container);
    }

    pub fn type_container_count(&self) -> usize {
        self.registry.count()
    }

    /// # Panics
    ///
    /// Panics if `index >= self.type_container_count()`.
    pub fn type_container_at(&self, index: usize) -> &TypeContainer {
        self.registry.at(index)
    }

    pub fn type_container_named(&self, name: &Lexeme) -> Result<&TypeContainer> {
        self.registry.named(name)
    }

    pub fn types(&self) -> &TypeContainerRegistry {
        &self.registry
    }

    // Resources

    pub fn add_resource(&mut self, resource: ResourceInstance) {
        self.resources.add(resource);
    }

    pub fn resource_count(&self) -> usize {
        self.resources.forwarded()
    }

    pub fn writer(&self) -> &W {
        self.resources.writer()
    }

    pub fn into_writer(self) -> W {
        self.resources.into_writer()
    }

    /// Write the accumulated resources and return the artifact path.
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = PathBuf::from(self.target_file_path());
        if self.state == TargetState::Done {
            log::warn!("build target already saved; writing {} again", path.display());
        }

        self.state = TargetState::Emitting;
        match self.emit(&path) {
            Ok(()) => {
                self.state = TargetState::Done;
                Ok(path)
            }
            Err(e) => {
                self.state = TargetState::Configuring;
                Err(e)
            }
        }
    }

    fn emit(&mut self, path: &Path) -> Result<()> {
        let root = Path::new(self.paths.destination_root());
        if self.paths.create_destination() && !self.fs.is_dir(root) {
            log::debug!("creating destination directory {}", root.display());
            self.fs
                .create_dir_all(root)
                .map_err(|source| TargetError::CreateDestination {
                    path: root.to_path_buf(),
                    source,
                })?;
        }

        self.resources
            .writer_mut()
            .write(path, self.format)
            .map_err(|source| TargetError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

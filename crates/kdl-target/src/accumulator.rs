//! Resource accumulation.

use std::path::Path;

use kdl_core::{ResourceInstance, TypeCode};
use kdl_rsrc::{Format, ResourceFile};

/// The collaborator that stores resources and serializes them.
pub trait ContainerWriter {
    fn add_resource(&mut self, code: TypeCode, id: i64, name: &str, data: Vec<u8>);

    fn write(&mut self, path: &Path, format: Format) -> kdl_rsrc::Result<()>;
}

impl ContainerWriter for ResourceFile {
    fn add_resource(&mut self, code: TypeCode, id: i64, name: &str, data: Vec<u8>) {
        ResourceFile::add_resource(self, code, id, name, data);
    }

    fn write(&mut self, path: &Path, format: Format) -> kdl_rsrc::Result<()> {
        ResourceFile::write(self, path, format)
    }
}

/// Forwards finished resources to a [`ContainerWriter`].
///
/// Nothing is buffered here; duplicate handling belongs to the writer.
#[derive(Debug)]
pub struct ResourceAccumulator<W> {
    writer: W,
    forwarded: usize,
}

impl<W: ContainerWriter> ResourceAccumulator<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            forwarded: 0,
        }
    }

    pub fn add(&mut self, resource: ResourceInstance) {
        let data = resource.assemble();
        log::debug!(
            "adding resource '{}' #{} '{}' ({} bytes)",
            resource.type_code(),
            resource.id(),
            resource.name(),
            data.len()
        );
        self.writer
            .add_resource(resource.type_code(), resource.id(), resource.name(), data);
        self.forwarded += 1;
    }

    /// Number of resources handed to the writer so far.
    pub fn forwarded(&self) -> usize {
        self.forwarded
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub(crate) fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

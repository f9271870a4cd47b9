//! In-memory resource file.

use std::fs;
use std::io::Write;
use std::path::Path;

use kdl_core::TypeCode;

use crate::error::Result;
use crate::format::Format;
use crate::{classic, extended, rez};

/// A single resource: id, name and raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub data: Vec<u8>,
}

/// All resources sharing one type code, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    code: TypeCode,
    resources: Vec<Resource>,
}

impl ResourceType {
    pub fn code(&self) -> TypeCode {
        self.code
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

/// A resource container being assembled.
///
/// Types and resources keep insertion order. Adding a resource whose type
/// code and id are already present replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct ResourceFile {
    types: Vec<ResourceType>,
}

impl ResourceFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resource(&mut self, code: TypeCode, id: i64, name: &str, data: Vec<u8>) {
        let index = match self.types.iter().position(|t| t.code == code) {
            Some(index) => index,
            None => {
                self.types.push(ResourceType {
                    code,
                    resources: Vec::new(),
                });
                self.types.len() - 1
            }
        };
        let resources = &mut self.types[index].resources;

        if let Some(existing) = resources.iter_mut().find(|r| r.id == id) {
            log::warn!("replacing duplicate resource '{code}' #{id} ('{}')", existing.name);
            existing.name = name.to_string();
            existing.data = data;
            return;
        }

        resources.push(Resource {
            id,
            name: name.to_string(),
            data,
        });
    }

    pub fn types(&self) -> &[ResourceType] {
        &self.types
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn resource_count(&self) -> usize {
        self.types.iter().map(|t| t.resources.len()).sum()
    }

    pub fn resource(&self, code: TypeCode, id: i64) -> Option<&Resource> {
        self.types
            .iter()
            .find(|t| t.code == code)
            .and_then(|t| t.resources.iter().find(|r| r.id == id))
    }

    /// Serialize to a byte vector in the given format.
    pub fn encode(&self, format: Format) -> Result<Vec<u8>> {
        match format {
            Format::Classic => classic::encode(self),
            Format::Extended => extended::encode(self),
            Format::Rez => rez::encode(self),
        }
    }

    /// Serialize to a writer in the given format.
    pub fn write_to<W: Write>(&self, writer: &mut W, format: Format) -> Result<()> {
        let bytes = self.encode(format)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Serialize and write to `path`, replacing any existing file.
    pub fn write(&self, path: &Path, format: Format) -> Result<()> {
        let bytes = self.encode(format)?;
        fs::write(path, &bytes)?;
        log::info!(
            "wrote {} resources ({} bytes, {format}) to {}",
            self.resource_count(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> TypeCode {
        TypeCode::new(s).unwrap()
    }

    #[test]
    fn groups_by_type_in_insertion_order() {
        let mut file = ResourceFile::new();
        file.add_resource(code("STR "), 128, "a", vec![1]);
        file.add_resource(code("PICT"), 128, "b", vec![2]);
        file.add_resource(code("STR "), 129, "c", vec![3]);

        assert_eq!(file.type_count(), 2);
        assert_eq!(file.resource_count(), 3);
        assert_eq!(file.types()[0].code(), code("STR "));
        assert_eq!(file.types()[0].resources().len(), 2);
        assert_eq!(file.types()[1].code(), code("PICT"));
    }

    #[test]
    fn duplicate_id_replaces() {
        let mut file = ResourceFile::new();
        file.add_resource(code("STR "), 128, "first", vec![1]);
        file.add_resource(code("STR "), 128, "second", vec![2, 2]);

        assert_eq!(file.resource_count(), 1);
        let res = file.resource(code("STR "), 128).unwrap();
        assert_eq!(res.name, "second");
        assert_eq!(res.data, vec![2, 2]);
    }

    #[test]
    fn same_id_different_types_coexist() {
        let mut file = ResourceFile::new();
        file.add_resource(code("STR "), 128, "", vec![]);
        file.add_resource(code("snd "), 128, "", vec![]);
        assert_eq!(file.resource_count(), 2);
        assert!(file.resource(code("snd "), 128).is_some());
        assert!(file.resource(code("snd "), 129).is_none());
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.ndat");
        let mut file = ResourceFile::new();
        file.add_resource(code("STR "), 128, "hello", b"hello".to_vec());

        file.write(&path, Format::Classic).unwrap();
        let written = fs::read(&path).unwrap();
        assert_eq!(written, file.encode(Format::Classic).unwrap());
    }

    #[test]
    fn write_to_matches_encode() {
        let mut file = ResourceFile::new();
        file.add_resource(code("TEXT"), 1, "", b"abc".to_vec());
        for format in [Format::Classic, Format::Extended, Format::Rez] {
            let mut buf = Vec::new();
            file.write_to(&mut buf, format).unwrap();
            assert_eq!(buf, file.encode(format).unwrap());
        }
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("result.ndat");
        let file = ResourceFile::new();
        assert!(file.write(&path, Format::Classic).is_err());
    }
}

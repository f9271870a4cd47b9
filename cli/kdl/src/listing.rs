//! TOML resource listings: the front end used by the `kdl` binary.
//!
//! A listing declares type containers and resource instances:
//!
//! ```toml
//! [[type]]
//! name = "Greeting"
//! code = "STR "
//! fields = [{ name = "text", kind = "pstring" }]
//!
//! [[resource]]
//! type = "Greeting"
//! id = 128
//! name = "Hello"
//! values = { text = "Hello, world" }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use kdl_core::{
    FieldKind, FieldValue, Lexeme, ResourceInstance, SourceLocation, TypeCode, TypeContainer,
    TypeField,
};
use kdl_media::PngImage;
use kdl_target::{BuildTarget, ContainerWriter};
use serde::Deserialize;
use toml::Spanned;

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default, rename = "type")]
    types: Vec<TypeDecl>,
    #[serde(default, rename = "resource")]
    resources: Vec<ResourceDecl>,
}

#[derive(Debug, Deserialize)]
struct TypeDecl {
    name: String,
    code: String,
    #[serde(default)]
    fields: Vec<FieldDecl>,
}

#[derive(Debug, Deserialize)]
struct FieldDecl {
    name: String,
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ResourceDecl {
    #[serde(rename = "type")]
    type_name: Spanned<String>,
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    values: toml::Table,
}

/// What a listing contributed to the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblySummary {
    pub types: usize,
    pub resources: usize,
}

/// Parse the listing at `path` and feed its types and resources to `target`.
pub fn assemble<W: ContainerWriter>(
    path: &Path,
    target: &mut BuildTarget<W>,
) -> Result<AssemblySummary> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let listing: Listing =
        toml::from_str(&source).with_context(|| format!("parsing {}", path.display()))?;
    let mut summary = AssemblySummary::default();

    for decl in listing.types {
        let code = TypeCode::new(&decl.code)
            .with_context(|| format!("type '{}' in {}", decl.name, path.display()))?;
        let mut container = TypeContainer::new(&decl.name, code);
        for field in decl.fields {
            let kind: FieldKind = field
                .kind
                .parse()
                .with_context(|| format!("field '{}' of type '{}'", field.name, decl.name))?;
            container = container.with_field(TypeField::new(field.name, kind));
        }
        target.add_type_container(container);
        summary.types += 1;
    }

    for decl in listing.resources {
        let location = SourceLocation::from_offset(path, &source, decl.type_name.span().start);
        let lexeme = Lexeme::new(decl.type_name.get_ref().as_str(), location.clone());
        let container = target.type_container_named(&lexeme)?.clone();

        let mut resource = ResourceInstance::of_type(&container, decl.id, &decl.name);
        for field in container.fields() {
            let value = decl.values.get(&field.name).with_context(|| {
                format!(
                    "{location}: resource '{}' #{} is missing field '{}'",
                    decl.name, decl.id, field.name
                )
            })?;
            let value = field_value(field, value, target)
                .with_context(|| format!("{location}: resource '{}' #{}", decl.name, decl.id))?;
            resource.push_value(value);
        }

        for key in decl.values.keys() {
            if container.field(key).is_none() {
                log::warn!(
                    "{location}: '{key}' is not a field of type '{}'; ignored",
                    container.name()
                );
            }
        }

        target.add_resource(resource);
        summary.resources += 1;
    }

    log::debug!(
        "{}: {} types, {} resources",
        path.display(),
        summary.types,
        summary.resources
    );
    Ok(summary)
}

fn field_value<W: ContainerWriter>(
    field: &TypeField,
    value: &toml::Value,
    target: &BuildTarget<W>,
) -> Result<FieldValue> {
    let expect_str = || {
        value
            .as_str()
            .with_context(|| format!("field '{}' expects a string", field.name))
    };

    match field.kind {
        FieldKind::Byte | FieldKind::Word | FieldKind::Long | FieldKind::Quad => {
            let Some(number) = value.as_integer() else {
                bail!("field '{}' expects an integer", field.name);
            };
            let width = field
                .kind
                .integer_width()
                .context("integer field without a width")?;
            Ok(FieldValue::Integer {
                width,
                value: number,
            })
        }
        FieldKind::PString => Ok(FieldValue::PString(expect_str()?.to_string())),
        FieldKind::CString => Ok(FieldValue::CString(expect_str()?.to_string())),
        FieldKind::Data => {
            let path = source_file(target, expect_str()?);
            let data =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            Ok(FieldValue::Data(data))
        }
        FieldKind::Image => {
            let path = source_file(target, expect_str()?);
            let image = PngImage::open(&path)?;
            Ok(FieldValue::Data(image.surface().to_raster_bytes()?))
        }
    }
}

/// Resolve a file reference; relative paths are taken from the source root.
fn source_file<W: ContainerWriter>(target: &BuildTarget<W>, reference: &str) -> PathBuf {
    let resolved = PathBuf::from(target.resolve_source_path(reference));
    if resolved.is_relative() {
        Path::new(target.paths().source_root()).join(resolved)
    } else {
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;

    use kdl_target::{PathResolver, TargetError};

    fn target_for(source: &Path) -> BuildTarget {
        let mut resolver = PathResolver::new();
        resolver.set_source_root(source.to_str().unwrap());
        BuildTarget::with_resource_file(Arc::new(resolver.resolve()))
    }

    #[test]
    fn types_and_resources() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(
            &input,
            r#"
[[type]]
name = "Greeting"
code = "STR "
fields = [{ name = "count", kind = "word" }, { name = "text", kind = "pstring" }]

[[resource]]
type = "Greeting"
id = 128
name = "Hello"
values = { text = "hi", count = 3 }
"#,
        )
        .unwrap();

        let mut target = target_for(&input);
        let summary = assemble(&input, &mut target).unwrap();
        assert_eq!(summary, AssemblySummary { types: 1, resources: 1 });

        let code = TypeCode::new("STR ").unwrap();
        let res = target.writer().resource(code, 128).unwrap();
        assert_eq!(res.name, "Hello");
        assert_eq!(res.data, vec![0, 3, 2, b'h', b'i']);
    }

    #[test]
    fn unknown_type_reports_location() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(&input, "[[resource]]\nid = 1\ntype = \"Ghost\"\n").unwrap();

        let mut target = target_for(&input);
        let err = assemble(&input, &mut target).unwrap_err();
        let target_err = err.downcast_ref::<TargetError>().unwrap();
        match target_err {
            TargetError::MissingType { name, location } => {
                assert_eq!(name, "Ghost");
                assert_eq!(location.line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn data_field_reads_rpath_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("blob.bin"), [1u8, 2, 3]).unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(
            &input,
            r#"
[[type]]
name = "Blob"
code = "DATA"
fields = [{ name = "payload", kind = "data" }]

[[resource]]
type = "Blob"
id = 1
values = { payload = "@rpath/assets/blob.bin" }

[[resource]]
type = "Blob"
id = 2
values = { payload = "assets/blob.bin" }
"#,
        )
        .unwrap();

        let mut target = target_for(&input);
        assemble(&input, &mut target).unwrap();
        let code = TypeCode::new("DATA").unwrap();
        assert_eq!(target.writer().resource(code, 1).unwrap().data, vec![1, 2, 3]);
        assert_eq!(target.writer().resource(code, 2).unwrap().data, vec![1, 2, 3]);
    }

    #[test]
    fn image_field_stores_raster() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(2, 3)
            .save(dir.path().join("icon.png"))
            .unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(
            &input,
            r#"
[[type]]
name = "Icon"
code = "PNG "
fields = [{ name = "image", kind = "image" }]

[[resource]]
type = "Icon"
id = 128
name = "App"
values = { image = "@rpath/icon.png" }
"#,
        )
        .unwrap();

        let mut target = target_for(&input);
        assemble(&input, &mut target).unwrap();
        let data = &target
            .writer()
            .resource(TypeCode::new("PNG ").unwrap(), 128)
            .unwrap()
            .data;
        assert_eq!(&data[0..4], &[0, 2, 0, 3]);
        assert_eq!(data.len(), 4 + 2 * 3 * 4);
    }

    #[test]
    fn missing_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(
            &input,
            r#"
[[type]]
name = "Greeting"
code = "STR "
fields = [{ name = "text", kind = "cstring" }]

[[resource]]
type = "Greeting"
id = 128
"#,
        )
        .unwrap();

        let mut target = target_for(&input);
        let err = assemble(&input, &mut target).unwrap_err();
        assert!(format!("{err:#}").contains("missing field 'text'"));
    }

    #[test]
    fn mistyped_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(
            &input,
            r#"
[[type]]
name = "Counter"
code = "CNT "
fields = [{ name = "value", kind = "long" }]

[[resource]]
type = "Counter"
id = 1
values = { value = "three" }
"#,
        )
        .unwrap();

        let mut target = target_for(&input);
        let err = assemble(&input, &mut target).unwrap_err();
        assert!(format!("{err:#}").contains("expects an integer"));
    }

    #[test]
    fn bad_type_code_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("main.kdl");
        fs::write(&input, "[[type]]\nname = \"Bad\"\ncode = \"TOOLONG\"\n").unwrap();

        let mut target = target_for(&input);
        let err = assemble(&input, &mut target).unwrap_err();
        assert!(format!("{err:#}").contains("invalid type code"));
    }
}

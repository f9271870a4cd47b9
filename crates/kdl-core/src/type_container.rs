//! Type containers: named field layouts for a resource type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::code::TypeCode;
use crate::error::CoreError;
use crate::resource::IntegerWidth;

/// The kind of value a field holds and how it is laid out when assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Signed 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Word,
    /// Signed 32-bit integer.
    Long,
    /// Signed 64-bit integer.
    Quad,
    /// Length-prefixed string (at most 255 bytes).
    PString,
    /// NUL-terminated string.
    CString,
    /// Raw bytes imported from a file.
    Data,
    /// An image file, decoded and stored as a raster.
    Image,
}

impl FieldKind {
    /// Integer width for the numeric kinds.
    pub fn integer_width(&self) -> Option<IntegerWidth> {
        match self {
            FieldKind::Byte => Some(IntegerWidth::Byte),
            FieldKind::Word => Some(IntegerWidth::Word),
            FieldKind::Long => Some(IntegerWidth::Long),
            FieldKind::Quad => Some(IntegerWidth::Quad),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Byte => "byte",
            FieldKind::Word => "word",
            FieldKind::Long => "long",
            FieldKind::Quad => "quad",
            FieldKind::PString => "pstring",
            FieldKind::CString => "cstring",
            FieldKind::Data => "data",
            FieldKind::Image => "image",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byte" => Ok(FieldKind::Byte),
            "word" => Ok(FieldKind::Word),
            "long" => Ok(FieldKind::Long),
            "quad" => Ok(FieldKind::Quad),
            "pstring" => Ok(FieldKind::PString),
            "cstring" => Ok(FieldKind::CString),
            "data" => Ok(FieldKind::Data),
            "image" => Ok(FieldKind::Image),
            other => Err(CoreError::UnknownFieldKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// A single named field in a type's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    pub name: String,
    pub kind: FieldKind,
}

impl TypeField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A named resource type definition.
///
/// Created by the front end when a type definition is parsed and not
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeContainer {
    name: String,
    code: TypeCode,
    fields: Vec<TypeField>,
}

impl TypeContainer {
    pub fn new(name: impl Into<String>, code: TypeCode) -> Self {
        Self {
            name: name.into(),
            code,
            fields: Vec::new(),
        }
    }

    /// Append a field to the layout.
    pub fn with_field(mut self, field: TypeField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> TypeCode {
        self.code
    }

    pub fn fields(&self) -> &[TypeField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&TypeField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

//! Resource instances and their assembly into raw bytes.

use serde::{Deserialize, Serialize};

use crate::code::TypeCode;
use crate::type_container::TypeContainer;

/// Width of an integer field when assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegerWidth {
    Byte,
    Word,
    Long,
    Quad,
}

impl IntegerWidth {
    pub fn bytes(&self) -> usize {
        match self {
            IntegerWidth::Byte => 1,
            IntegerWidth::Word => 2,
            IntegerWidth::Long => 4,
            IntegerWidth::Quad => 8,
        }
    }
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Big-endian integer, truncated to `width`.
    Integer { width: IntegerWidth, value: i64 },
    /// Length byte followed by at most 255 bytes of text.
    PString(String),
    /// Text followed by a NUL byte.
    CString(String),
    /// Raw bytes copied verbatim.
    Data(Vec<u8>),
}

impl FieldValue {
    fn assemble_into(&self, out: &mut Vec<u8>) {
        match self {
            FieldValue::Integer { width, value } => {
                let bytes = value.to_be_bytes();
                out.extend_from_slice(&bytes[bytes.len() - width.bytes()..]);
            }
            FieldValue::PString(text) => {
                let bytes = &text.as_bytes()[..text.len().min(255)];
                out.push(bytes.len() as u8);
                out.extend_from_slice(bytes);
            }
            FieldValue::CString(text) => {
                out.extend_from_slice(text.as_bytes());
                out.push(0);
            }
            FieldValue::Data(data) => out.extend_from_slice(data),
        }
    }
}

/// A fully resolved resource ready to be written to a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInstance {
    type_code: TypeCode,
    id: i64,
    name: String,
    values: Vec<FieldValue>,
}

impl ResourceInstance {
    pub fn new(type_code: TypeCode, id: i64, name: impl Into<String>) -> Self {
        Self {
            type_code,
            id,
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Start an instance of the given type container.
    pub fn of_type(container: &TypeContainer, id: i64, name: impl Into<String>) -> Self {
        Self::new(container.code(), id, name)
    }

    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn push_value(&mut self, value: FieldValue) {
        self.values.push(value);
    }

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Serialize the field values, in order, into the resource's payload.
    pub fn assemble(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for value in &self.values {
            value.assemble_into(&mut out);
        }
        out
    }
}

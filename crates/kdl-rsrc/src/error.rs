//! Errors raised while building or writing resource containers.

use std::io;

use kdl_core::TypeCode;
use thiserror::Error;

use crate::format::Format;

#[derive(Debug, Error)]
pub enum RsrcError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown container format '{name}' (expected classic, extended or rez)")]
    UnknownFormat { name: String },

    #[error("resource '{code}' #{id} does not fit the id range of the {format} format")]
    IdOutOfRange {
        format: Format,
        code: TypeCode,
        id: i64,
    },

    #[error("resource '{code}' #{id} has a {len}-byte name; at most 255 bytes are allowed")]
    NameTooLong { code: TypeCode, id: i64, len: usize },

    #[error("{format} container too large: {detail}")]
    TooLarge { format: Format, detail: String },
}

pub type Result<T> = std::result::Result<T, RsrcError>;

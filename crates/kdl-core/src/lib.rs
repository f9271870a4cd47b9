//! Front-end value types for the KDL resource assembler.
//!
//! The language front end produces two kinds of values that the build target
//! consumes:
//! - **Type containers:** named descriptions of a resource type's field layout.
//! - **Resource instances:** fully resolved values tagged with a type code,
//!   numeric id and name, ready to be assembled into raw bytes.

pub mod code;
pub mod error;
pub mod lexeme;
pub mod resource;
pub mod type_container;

pub use code::TypeCode;
pub use error::CoreError;
pub use lexeme::{Lexeme, SourceLocation};
pub use resource::{FieldValue, IntegerWidth, ResourceInstance};
pub use type_container::{FieldKind, TypeContainer, TypeField};

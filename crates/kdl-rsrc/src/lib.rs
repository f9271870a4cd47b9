//! Resource container writer for the KDL assembler.
//!
//! Collects resources in memory and serializes them into one of three
//! container formats:
//!
//! ```text
//! Format     Extension  Layout
//! ---------  ---------  ------------------------------------------------
//! Classic    .ndat      Macintosh resource fork (16-bit ids, 24-bit offsets)
//! Extended   .kdat      Resource fork widened to 64-bit ids and offsets
//! Rez        .rez       Little-endian BRGR archive with a trailing type map
//! ```

mod classic;
mod error;
mod extended;
mod file;
mod format;
mod rez;

pub use error::{Result, RsrcError};
pub use file::{Resource, ResourceFile, ResourceType};
pub use format::Format;

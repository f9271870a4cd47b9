//! Error types for front-end values.

/// Errors raised while constructing front-end values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A type code was not exactly four ASCII characters.
    #[error("invalid type code '{code}': expected exactly 4 ASCII characters")]
    InvalidTypeCode { code: String },

    /// A field kind name was not recognized.
    #[error("unknown field kind '{kind}'")]
    UnknownFieldKind { kind: String },
}

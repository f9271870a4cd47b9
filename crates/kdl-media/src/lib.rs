//! Image decoding for image-backed resources.
//!
//! Resources whose payload is an image hand the source file (or its bytes)
//! to [`PngImage`], which decodes it into an RGBA [`Surface`].

pub mod error;
pub mod png;
pub mod surface;

pub use error::MediaError;
pub use png::PngImage;
pub use surface::Surface;

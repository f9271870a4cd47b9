//! PNG decoding.

use std::fs;
use std::path::Path;

use image::ImageFormat;

use crate::error::MediaError;
use crate::surface::Surface;

/// A decoded PNG image.
#[derive(Debug, Clone)]
pub struct PngImage {
    surface: Surface,
}

impl PngImage {
    /// Read and decode the PNG file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MediaError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| MediaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Decode PNG data held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MediaError> {
        let decoded = image::load_from_memory_with_format(data, ImageFormat::Png)?;
        Ok(Self {
            surface: Surface::new(decoded.to_rgba8()),
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

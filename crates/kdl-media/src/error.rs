//! Image decoding errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image is {width}x{height}; raster payloads hold at most 65535x65535")]
    TooLarge { width: u32, height: u32 },

    #[error("failed to decode PNG data: {0}")]
    Decode(#[from] image::ImageError),
}

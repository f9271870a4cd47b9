//! Decoded raster surfaces.

use image::RgbaImage;

use crate::error::MediaError;

/// An RGBA raster, 8 bits per channel.
#[derive(Debug, Clone)]
pub struct Surface {
    raster: RgbaImage,
}

impl Surface {
    pub fn new(raster: RgbaImage) -> Self {
        Self { raster }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// The RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.raster.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Raw raster payload: width and height as big-endian `u16`, followed
    /// by the RGBA rows top to bottom.
    pub fn to_raster_bytes(&self) -> Result<Vec<u8>, MediaError> {
        let too_large = || MediaError::TooLarge {
            width: self.width(),
            height: self.height(),
        };
        let width = u16::try_from(self.width()).map_err(|_| too_large())?;
        let height = u16::try_from(self.height()).map_err(|_| too_large())?;
        let pixels = self.raster.as_raw();

        let mut out = Vec::with_capacity(4 + pixels.len());
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(pixels);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn pixel_lookup() {
        let mut raster = RgbaImage::new(2, 1);
        raster.put_pixel(1, 0, Rgba([1, 2, 3, 4]));
        let surface = Surface::new(raster);
        assert_eq!(surface.pixel(1, 0), Some([1, 2, 3, 4]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 0), None);
    }

    #[test]
    fn raster_bytes_layout() {
        let mut raster = RgbaImage::new(2, 1);
        raster.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let bytes = Surface::new(raster).to_raster_bytes().unwrap();
        assert_eq!(&bytes[0..4], &[0, 2, 0, 1]);
        assert_eq!(&bytes[4..8], &[255, 0, 0, 255]);
        assert_eq!(bytes.len(), 4 + 2 * 4);
    }

    #[test]
    fn oversized_raster_is_rejected() {
        let surface = Surface::new(RgbaImage::new(65_536, 1));
        match surface.to_raster_bytes() {
            Err(MediaError::TooLarge { width, height }) => {
                assert_eq!((width, height), (65_536, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

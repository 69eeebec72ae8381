use std::{fs::File, io::BufReader, path::Path};

use image::{EncodableLayout, ImageError, ImageFormat, ImageReader, RgbaImage};

use crate::{error::Error, math::Vec2i, Result};

/// Decoded pixels living in ordinary memory, not yet uploaded anywhere.
///
/// Only bitmaps are accepted, whatever the file extension says.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Read and decode a bitmap file
    pub fn load_bmp(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decode = || -> Result<RgbaImage, ImageError> {
            let file = BufReader::new(File::open(path)?);
            Ok(ImageReader::with_format(file, ImageFormat::Bmp)
                .decode()?
                .into_rgba8())
        };
        let pixels = decode().map_err(|source| Error::AssetRead {
            path: path.to_owned(),
            source,
        })?;
        log::debug!(
            "Decoded {} ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );
        Ok(Self { pixels })
    }
    /// Width, in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }
    /// Height, in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
    /// Width and height, in pixels
    pub fn size(&self) -> Vec2i {
        Vec2i::from_dims(self.width(), self.height())
    }
    /// Tightly packed RGBA8 rows, top row first
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::mock::{bmp_fixture, scratch_path};

    #[test]
    fn loads_bitmap_from_disk() {
        let path = bmp_fixture("surface-load", 7, 3);
        let surface = Surface::load_bmp(&path).unwrap();
        assert_eq!(surface.size(), Vec2i::new(7, 3));
        assert_eq!(surface.as_bytes().len(), 7 * 3 * 4);
        // fixtures are filled with an opaque colour
        assert_eq!(&surface.as_bytes()[..4], &[200, 40, 10, 255]);
    }

    #[test]
    fn missing_file_is_an_asset_read_failure() {
        let path = scratch_path("surface-missing.bmp");
        let err = Surface::load_bmp(&path).unwrap_err();
        match err {
            Error::AssetRead { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_formats_are_rejected_even_with_bmp_extension() {
        let path = scratch_path("surface-not-a-bitmap.bmp");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really a png").unwrap();
        let err = Surface::load_bmp(&path).unwrap_err();
        assert!(matches!(err, Error::AssetRead { .. }));
        assert!(err.to_string().starts_with("LoadBMP error: "));
    }
}

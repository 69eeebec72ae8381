use std::path::Path;

use crate::{error::Error, math::Rect, Result};

use super::{Canvas, Surface};

/// Load a bitmap from the filesystem into a texture owned by the caller.
///
/// The decoded pixels are dropped before returning, whether the upload worked or not.
pub fn load_texture<C: Canvas>(path: impl AsRef<Path>, canvas: &mut C) -> Result<C::Texture> {
    let surface = Surface::load_bmp(path)?;
    canvas
        .create_texture_from_surface(&surface)
        .map_err(Error::TextureConversion)
}

/// Draw a texture at its native size with its top left corner at `(x, y)`
pub fn render_texture<C: Canvas>(texture: &C::Texture, canvas: &mut C, x: i32, y: i32) {
    let size = canvas.query(texture);
    canvas.copy(texture, Rect::new((x, y), size));
}

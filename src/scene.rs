use std::path::Path;

use crate::{
    graphics::{load_texture, render_texture, Canvas},
    math::{self, Vec2i},
    Result,
};

/// The two textures making up the frame: a tiled background and a centered image.
///
/// Both have to load before a `Scene` exists, so nothing is ever drawn with only one of
/// them. If the second load fails, the first texture is dropped on the way out.
#[derive(Debug)]
pub struct Scene<T> {
    /// Tiled 2x2 from the top left corner
    pub background: T,
    /// Drawn centered on top of the background
    pub image: T,
}

impl<T> Scene<T> {
    /// Load both textures, the background first
    pub fn load<C: Canvas<Texture = T>>(
        canvas: &mut C,
        background: impl AsRef<Path>,
        image: impl AsRef<Path>,
    ) -> Result<Self> {
        let background = load_texture(background, canvas)?;
        let image = load_texture(image, canvas)?;
        Ok(Self { background, image })
    }

    /// Clear the canvas and draw the frame for a screen of size `screen`
    pub fn draw<C: Canvas<Texture = T>>(&self, canvas: &mut C, screen: Vec2i) {
        canvas.clear();
        let tile = canvas.query(&self.background);
        for origin in math::tile_origins(tile) {
            render_texture(&self.background, canvas, origin.x(), origin.y());
        }
        let origin = math::centered(screen, canvas.query(&self.image));
        render_texture(&self.image, canvas, origin.x(), origin.y());
    }

    /// Draw the frame and show it
    pub fn present<C: Canvas<Texture = T>>(&self, canvas: &mut C, screen: Vec2i) {
        self.draw(canvas, screen);
        canvas.present();
    }
}

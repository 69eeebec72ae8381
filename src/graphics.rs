//! Loading bitmaps into textures and copying them onto a rendering context.
//!
//! [RenderContext] is the wgpu backed context bound to a window, any other [Canvas] works
//! with [load_texture] and [render_texture] as well.

mod api;
#[cfg(test)]
pub(crate) mod mock;
mod render_2d;
mod render_context;
mod surface;
mod texture;

pub use api::{load_texture, render_texture};
pub use render_context::RenderContext;
pub use surface::Surface;
pub use texture::Texture;

use crate::math::{Rect, Vec2i};

/// Something draw commands can be issued to, and that owns the textures it can draw.
pub trait Canvas {
    /// Handle to pixel data the canvas can draw without further conversion.
    ///
    /// Dropping the handle releases the texture.
    type Texture;

    /// Upload decoded pixels, returning the backend's diagnostic on failure
    fn create_texture_from_surface(&mut self, surface: &Surface) -> Result<Self::Texture, String>;
    /// Native width and height of a texture, in pixels
    fn query(&self, texture: &Self::Texture) -> Vec2i;
    /// Start a new frame, discarding anything drawn since the last present
    fn clear(&mut self);
    /// Copy the whole texture into `dst`, stretching it if the sizes differ
    fn copy(&mut self, texture: &Self::Texture, dst: Rect);
    /// Show everything drawn since the last clear
    fn present(&mut self);
}

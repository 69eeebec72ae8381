#![warn(missing_docs)]
//! Opens a window, tiles a bitmap across it 2x2, draws a second copy of the bitmap
//! centered on top, shows that single frame for a while and exits.
//!
//! The pieces are usable on their own: [graphics::load_texture] and
//! [graphics::render_texture] work against any [graphics::Canvas].

/// Program configuration
pub mod config;
/// Error type shared by everything that can fail
pub mod error;
/// Contains functions for loading and rendering textures
pub mod graphics;
/// Integer vectors and the layout arithmetic for the frame
pub mod math;
/// The background/image pair and how it is laid out
pub mod scene;
/// Contains functions for working with the window
pub mod window;

pub use config::{Conf, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use error::{Error, Result};

use graphics::RenderContext;
use scene::Scene;
use window::WindowSettings;

/// Show the frame described by `conf` and return once the window is gone.
///
/// Resources are acquired in the order event loop, window, rendering context, textures,
/// and released in the reverse order on every path out of here.
pub fn run(conf: &Conf) -> Result<()> {
    log::info!("Starting, asset {}", conf.asset.display());
    window::run(WindowSettings::from(conf), conf.display_time, |window| {
        let mut context = RenderContext::new(window, conf.vsync)?;
        let scene = Scene::load(&mut context, &conf.asset, &conf.asset)?;
        scene.present(&mut context, conf.screen_size);
        // Tuple fields drop front to back: background, image, then the context.
        Ok((scene, context))
    })
}

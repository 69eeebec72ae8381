use std::{path::PathBuf, time::Duration};

use crate::math::Vec2i;

/// Width of the window, in pixels
pub const SCREEN_WIDTH: i32 = 640;
/// Height of the window, in pixels
pub const SCREEN_HEIGHT: i32 = 480;

/// Program configuration.
///
/// Nothing here is read from the command line or the environment, [Conf::default] is what
/// the binary runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Conf {
    /// Title of the window
    pub window_title: String,
    /// Size of the window and of the area the scene is laid out in
    pub screen_size: Vec2i,
    /// Where to place the window, or `None` to let the window system decide
    pub window_position: Option<Vec2i>,
    /// Bitmap used for both the background and the centered image, relative to the
    /// working directory
    pub asset: PathBuf,
    /// How long the composed frame stays on screen before exiting
    pub display_time: Duration,
    /// Present in sync with the display refresh
    pub vsync: bool,
}

impl Default for Conf {
    fn default() -> Self {
        Self {
            window_title: "Hello World!".to_owned(),
            screen_size: Vec2i::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            window_position: Some(Vec2i::new(100, 100)),
            asset: PathBuf::from("safeway.bmp"),
            display_time: Duration::from_millis(5000),
            vsync: true,
        }
    }
}

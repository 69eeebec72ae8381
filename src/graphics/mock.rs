//! In-memory [Canvas] for tests, records every call and tracks live textures.

use std::{cell::Cell, path::PathBuf, rc::Rc};

use image::{ImageFormat, Rgb, RgbImage};

use super::{Canvas, Surface};
use crate::math::{Rect, Vec2i};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Upload { id: usize, size: Vec2i },
    Clear,
    Copy { id: usize, dst: Rect },
    Present,
}

#[derive(Debug)]
pub(crate) struct MockTexture {
    pub id: usize,
    size: Vec2i,
    live: Rc<Cell<usize>>,
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockCanvas {
    pub ops: Vec<Op>,
    live: Rc<Cell<usize>>,
    uploads: usize,
    /// Uploads with this index (0 based) and later fail
    pub fail_from_upload: Option<usize>,
}

impl MockCanvas {
    pub fn failing_from(upload: usize) -> Self {
        Self {
            fail_from_upload: Some(upload),
            ..Self::default()
        }
    }
    pub fn live_textures(&self) -> usize {
        self.live.get()
    }
    pub fn copies(&self) -> Vec<(usize, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Copy { id, dst } => Some((*id, *dst)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for MockCanvas {
    type Texture = MockTexture;

    fn create_texture_from_surface(&mut self, surface: &Surface) -> Result<MockTexture, String> {
        let id = self.uploads;
        self.uploads += 1;
        if self.fail_from_upload.is_some_and(|n| id >= n) {
            return Err("mock device lost".to_owned());
        }
        self.ops.push(Op::Upload {
            id,
            size: surface.size(),
        });
        self.live.set(self.live.get() + 1);
        Ok(MockTexture {
            id,
            size: surface.size(),
            live: self.live.clone(),
        })
    }

    fn query(&self, texture: &MockTexture) -> Vec2i {
        texture.size
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn copy(&mut self, texture: &MockTexture, dst: Rect) {
        self.ops.push(Op::Copy {
            id: texture.id,
            dst,
        });
    }

    fn present(&mut self) {
        self.ops.push(Op::Present);
    }
}

/// A path in the temp directory that is unique to this test process
pub(crate) fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tileview-{}-{name}", std::process::id()))
}

/// Write a solid colour 24-bit bitmap and return its path
pub(crate) fn bmp_fixture(name: &str, width: u32, height: u32) -> PathBuf {
    let path = scratch_path(&format!("{name}.bmp"));
    RgbImage::from_pixel(width, height, Rgb([200, 40, 10]))
        .save_with_format(&path, ImageFormat::Bmp)
        .expect("failed to write bitmap fixture");
    path
}

use nalgebra::Vector2;

/// A 2-dimensional vector of integers, used for pixel positions and sizes
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vec2i(pub Vector2<i32>);

impl Default for Vec2i {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Vec2i {
    #[inline(always)]
    /// Create a vector from its components
    pub fn new(x: i32, y: i32) -> Self {
        Self(Vector2::new(x, y))
    }
    #[inline(always)]
    /// Create a vector out of unsigned image dimensions, saturating at `i32::MAX`
    pub fn from_dims(width: u32, height: u32) -> Self {
        Self::new(
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }
    #[inline(always)]
    /// Access the x component of this vector
    pub fn x(&self) -> i32 {
        self.0.x
    }
    #[inline(always)]
    /// Access the y component of this vector
    pub fn y(&self) -> i32 {
        self.0.y
    }
}

impl From<(i32, i32)> for Vec2i {
    #[inline(always)]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::ops::Add for Vec2i {
    type Output = Vec2i;

    #[inline(always)]
    fn add(self, rhs: Vec2i) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Vec2i {
    type Output = Vec2i;

    #[inline(always)]
    fn sub(self, rhs: Vec2i) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Div<i32> for Vec2i {
    type Output = Vec2i;

    /// Component-wise division, truncating toward zero
    #[inline(always)]
    fn div(self, rhs: i32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

/// An axis aligned rectangle in pixels, anchored at its top left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// Top left corner
    pub pos: Vec2i,
    /// Width and height
    pub size: Vec2i,
}

impl Rect {
    /// Create a rectangle from a position and a size
    pub fn new(pos: impl Into<Vec2i>, size: impl Into<Vec2i>) -> Self {
        Self {
            pos: pos.into(),
            size: size.into(),
        }
    }
}

/// Origin that centers something of size `item` inside `screen`.
///
/// Both halves are truncated separately, so odd sizes can land one pixel off true center.
pub fn centered(screen: Vec2i, item: Vec2i) -> Vec2i {
    screen / 2 - item / 2
}

/// The four origins of a 2x2 tiling of `tile`, row by row starting at the top left.
///
/// Tiles smaller than half the screen leave the bottom/right of the screen uncovered.
pub fn tile_origins(tile: Vec2i) -> [Vec2i; 4] {
    [
        Vec2i::new(0, 0),
        Vec2i::new(tile.x(), 0),
        Vec2i::new(0, tile.y()),
        Vec2i::new(tile.x(), tile.y()),
    ]
}

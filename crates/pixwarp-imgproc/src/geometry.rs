//! Integer rectangles, float points and the 2x3 affine matrix they are
//! transformed by.

use glam::Vec2;
use pixwarp_image::ImageSize;

/// A 2x3 affine matrix (linear part plus translation).
///
/// Composition follows the column-vector convention: `a * b` applies `b`
/// first, then `a`.
pub type Matrix = glam::Affine2;

/// An integer rectangle used for source and canvas bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels. May be negative when built from malformed input.
    pub width: i32,
    /// Height in pixels. May be negative when built from malformed input.
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle at the origin covering an image of `size`.
    pub fn from_size(size: ImageSize) -> Self {
        let width = i32::try_from(size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(size.height).unwrap_or(i32::MAX);
        Self::new(0, 0, width, height)
    }

    /// The x coordinate of the left edge.
    pub fn left(&self) -> i32 {
        self.x
    }

    /// The x coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// The y coordinate of the top edge.
    pub fn top(&self) -> i32 {
        self.y
    }

    /// The y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether `(px, py)` lies inside, left/top inclusive and right/bottom exclusive.
    #[inline]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The size covered by the rectangle, or `None` for negative extents.
    pub fn to_size(&self) -> Option<ImageSize> {
        Some(ImageSize {
            width: usize::try_from(self.width).ok()?,
            height: usize::try_from(self.height).ok()?,
        })
    }
}

/// A point in continuous pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Transform the point by `matrix`, truncating the result toward zero.
    #[inline]
    pub fn rotate(self, matrix: &Matrix) -> Self {
        let p = matrix.transform_point2(Vec2::new(self.x, self.y));
        Self::new(p.x.trunc(), p.y.trunc())
    }

    /// The integer coordinates of the point, truncated toward zero.
    #[inline]
    pub fn to_i32(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    /// A rotation of `degrees` about `center`.
    ///
    /// Positive angles turn the x axis toward the y axis.
    pub fn create_rotation(center: Point, degrees: f32) -> Matrix {
        let center = Vec2::from(center);
        Matrix::from_translation(center)
            * Matrix::from_angle(degrees.to_radians())
            * Matrix::from_translation(-center)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

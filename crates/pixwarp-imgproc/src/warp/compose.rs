use glam::Vec2;

use crate::geometry::{Matrix, Rectangle};

// Absorbs float drift so exact extents such as 4.0000005 do not round up.
const EXTENT_EPSILON: f32 = 1e-4;

/// Compose `base` with the translations that make it act about the image centers.
///
/// The result maps a destination (canvas) pixel to source space: the canvas
/// center is moved to the origin, `base` is applied, and the origin is moved
/// to the source center.
///
/// # Arguments
///
/// * `source` - The source image bounds.
/// * `canvas` - The destination canvas bounds.
/// * `base` - The transform to center, e.g. a rotation about the origin.
pub fn centered_matrix(source: &Rectangle, canvas: &Rectangle, base: &Matrix) -> Matrix {
    let to_canvas_origin = Matrix::from_translation(Vec2::new(
        -canvas.width as f32 * 0.5,
        -canvas.height as f32 * 0.5,
    ));
    let to_source_center = Matrix::from_translation(Vec2::new(
        source.width as f32 * 0.5,
        source.height as f32 * 0.5,
    ));

    to_source_center * *base * to_canvas_origin
}

/// The bounding box of the four corners of `rect` transformed by `matrix`.
///
/// The box is anchored at the origin; its extents are rounded up to whole
/// pixels.
pub fn bounding_rectangle(rect: &Rectangle, matrix: &Matrix) -> Rectangle {
    let (left, right) = (rect.left() as f32, rect.right() as f32);
    let (top, bottom) = (rect.top() as f32, rect.bottom() as f32);

    let corners = [
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(left, bottom),
        Vec2::new(right, bottom),
    ]
    .map(|c| matrix.transform_point2(c));

    let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |a, c| a.min(*c));
    let max = corners
        .iter()
        .fold(Vec2::splat(f32::NEG_INFINITY), |a, c| a.max(*c));

    let extent = |e: f32| (e - EXTENT_EPSILON).ceil().max(0.0) as i32;

    Rectangle::new(0, 0, extent(max.x - min.x), extent(max.y - min.y))
}

/// Compute the canvas that holds the whole of `source` after the transform.
///
/// `process` is the destination-to-source matrix, so the corners are pushed
/// through its inverse. A non-invertible matrix keeps the source bounds.
pub fn compute_canvas(source: &Rectangle, process: &Matrix) -> Rectangle {
    let det = process.matrix2.determinant();
    if det == 0.0 || !det.is_finite() {
        return *source;
    }
    bounding_rectangle(source, &process.inverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn canvas_of_identity_is_source() {
        let source = Rectangle::new(0, 0, 7, 3);
        assert_eq!(compute_canvas(&source, &Matrix::IDENTITY), source);
    }

    #[test]
    fn canvas_of_zero_size_source() {
        let process = Point::create_rotation(Point::ZERO, -30.0);
        let canvas = compute_canvas(&Rectangle::default(), &process);
        assert_eq!(canvas, Rectangle::default());
    }

    #[test]
    fn canvas_of_singular_matrix_is_source() {
        let source = Rectangle::new(0, 0, 4, 4);
        let singular = Matrix::from_scale(Vec2::new(0.0, 1.0));
        assert_eq!(compute_canvas(&source, &singular), source);
    }

    #[test]
    fn canvas_of_45_degrees() {
        let process = Point::create_rotation(Point::ZERO, -45.0);
        let canvas = compute_canvas(&Rectangle::new(0, 0, 10, 10), &process);
        // 10 * sqrt(2) = 14.14
        assert_eq!(canvas, Rectangle::new(0, 0, 15, 15));
    }

    #[test]
    fn centered_matrix_maps_centers() {
        let source = Rectangle::new(0, 0, 4, 2);
        let canvas = Rectangle::new(0, 0, 6, 8);
        let base = Point::create_rotation(Point::ZERO, 33.0);
        let m = centered_matrix(&source, &canvas, &base);
        let c = m.transform_point2(Vec2::new(3.0, 4.0));
        assert!((c - Vec2::new(2.0, 1.0)).length() < 1e-5);
    }
}

use geo::{Area, ConvexHull, MultiPolygon};

use crate::geom::GeometryError;

/// Ratio of a shape's area to the area of its convex hull, in (0, 1].
/// Fails on shapes whose hull has no area.
pub fn convexity(shape: &MultiPolygon<f64>) -> Result<f64, GeometryError> {
    let hull_area = shape.convex_hull().unsigned_area();
    if !(hull_area > 0.0) { return Err(GeometryError::DegenerateHull) }

    // Unioned rings can carry a little floating point slack past the hull.
    Ok((shape.unsigned_area() / hull_area).min(1.0))
}

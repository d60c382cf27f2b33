use std::f64::consts::PI;

use geo::{BooleanOps, BoundingRect, Centroid, LineString, MultiLineString, MultiPolygon};

use crate::{geom::GeometryError, objective::geometric_score};

/// Number of chord directions sampled over a half turn.
const CHORD_SAMPLES: usize = 720;

/// Chord-scan compactness in [0, 1].
///
/// Chords are cut through the centroid at `CHORD_SAMPLES` equally spaced angles
/// over [0, π). Each chord is scored against the median chord length with the
/// symmetric ratio `min(c/m, m/c)`, and the scores are averaged. A chord that
/// misses the shape, or only touches it at a point, has length 0 and scores 0.
/// The measure assumes the centroid sits inside the bulk of the shape; widely
/// separated parts score poorly.
pub fn compactness(shape: &MultiPolygon<f64>) -> Result<f64, GeometryError> {
    let chords = chord_lengths(shape)?;
    let median = median(&chords);

    Ok(chords.iter().map(|&c| geometric_score(c, median)).sum::<f64>() / chords.len() as f64)
}

/// Lengths of the chords through the centroid, one per sampled direction.
/// Chords crossing several parts (or holes) sum their pieces.
fn chord_lengths(shape: &MultiPolygon<f64>) -> Result<Vec<f64>, GeometryError> {
    let center = shape.centroid().ok_or(GeometryError::MissingCentroid)?;
    let bounds = shape.bounding_rect().ok_or(GeometryError::Empty)?;

    // Long enough to cross the whole shape from any interior point.
    let reach = 2.0 * bounds.width().hypot(bounds.height());

    let chords = (0..CHORD_SAMPLES)
        .map(|k| {
            let (dy, dx) = (PI * k as f64 / CHORD_SAMPLES as f64).sin_cos();
            let segment = LineString::from(vec![
                (center.x() - reach * dx, center.y() - reach * dy),
                (center.x() + reach * dx, center.y() + reach * dy),
            ]);

            shape.clip(&MultiLineString::new(vec![segment]), false).0.iter()
                .flat_map(|piece| piece.lines())
                .map(|line| line.dx().hypot(line.dy()))
                .sum::<f64>()
        })
        .collect();

    Ok(chords)
}

/// Median of a sample, averaging the two middle values for even counts.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() { return 0.0 }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 { (sorted[mid - 1] + sorted[mid]) / 2.0 } else { sorted[mid] }
}

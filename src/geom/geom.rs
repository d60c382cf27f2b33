use geo::{BooleanOps, BoundingRect, Coord, MultiPolygon, Rect};

use crate::geom::GeometryError;

/// Geometries holds one MultiPolygon per district, indexed like the district graph.
#[derive(Debug, Clone, Default)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    pub(crate) fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self { shapes }
    }

    /// Get the shape of a single district.
    #[inline] pub(crate) fn shape(&self, idx: usize) -> Option<&MultiPolygon<f64>> { self.shapes.get(idx) }

    /// Compute the bounding rectangle of all MultiPolygons.
    pub(crate) fn bounds(&self) -> Option<Rect<f64>> {
        self.shapes.iter()
            .filter_map(|polygon| polygon.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                }
            ))
    }

    /// Union the shapes of a subset of districts into one (possibly multi-part) geometry.
    /// Returns `Ok(None)` for an empty subset.
    /// This method may be slow for large numbers of complex polygons.
    pub(crate) fn union_of(&self, indices: &[usize]) -> Result<Option<MultiPolygon<f64>>, GeometryError> {
        let shapes = indices.iter()
            .map(|&i| self.shapes.get(i).ok_or(GeometryError::UnknownIndex(i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(shapes.into_iter().cloned().reduce(|a, b| a.union(&b)))
    }
}

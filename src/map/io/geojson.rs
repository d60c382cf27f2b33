use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::map::District;

/// Read the district feature table from GeoJSON bytes.
///
/// Each feature needs `properties.name` and a Polygon, MultiPolygon or
/// GeometryCollection geometry. `properties.elector_size` defaults to 0.
/// Station names come from `properties.nearest_mrts`, or failing that from
/// the `name` of `nearest_minor_mrt` and `nearest_major_mrt`, in that order.
pub(crate) fn read_districts_from_geojson_bytes(bytes: &[u8]) -> Result<Vec<District>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("GeoJSON is not a FeatureCollection: missing 'features' array"))?;

    features.iter().enumerate()
        .map(|(i, feature)| parse_feature(feature).with_context(|| format!("Invalid feature at position {i}")))
        .collect()
}

/// Parse a single feature into a District.
fn parse_feature(feature: &Value) -> Result<District> {
    let properties = &feature["properties"];
    let id = properties["name"].as_str()
        .ok_or_else(|| anyhow!("missing string property 'name'"))?;

    let elector_size = match &properties["elector_size"] {
        Value::Null => 0,
        value => value.as_u64()
            .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v.round() as u64))
            .ok_or_else(|| anyhow!("'elector_size' of {id} must be a non-negative number"))?,
    };

    let nearest_stations = match properties["nearest_mrts"].as_array() {
        Some(names) => names.iter().filter_map(|name| name.as_str().map(str::to_string)).collect(),
        None => ["nearest_minor_mrt", "nearest_major_mrt"].iter()
            .filter_map(|key| properties[*key]["name"].as_str().map(str::to_string))
            .collect(),
    };

    let shape = parse_geometry(&feature["geometry"]).with_context(|| format!("Invalid geometry for {id}"))?;

    Ok(District::new(id, elector_size, nearest_stations, shape))
}

/// Parse a GeoJSON geometry object into a MultiPolygon.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coords = || geometry["coordinates"].as_array().ok_or_else(|| anyhow!("missing 'coordinates' array"));

    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords()?)?])),
        Some("MultiPolygon") => Ok(MultiPolygon(
            coords()?.iter()
                .map(|polygon| polygon.as_array()
                    .ok_or_else(|| anyhow!("MultiPolygon member is not an array"))
                    .and_then(|rings| parse_polygon_coords(rings)))
                .collect::<Result<Vec<_>>>()?
        )),
        Some("GeometryCollection") => {
            // KML conversions wrap polygons (and stray points/lines) in collections.
            let members = geometry["geometries"].as_array()
                .ok_or_else(|| anyhow!("missing 'geometries' array"))?;
            let mut polygons = Vec::new();
            for member in members {
                if matches!(member["type"].as_str(), Some("Polygon" | "MultiPolygon" | "GeometryCollection")) {
                    polygons.extend(parse_geometry(member)?.0);
                }
            }
            Ok(MultiPolygon(polygons))
        }
        Some(other) => bail!("unsupported geometry type '{other}'"),
        None => bail!("missing geometry type"),
    }
}

/// Parse polygon coordinates: an exterior ring followed by interior rings.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("ring is not an array"))
            .and_then(|coords| parse_ring_coords(coords))
    });

    let exterior = rings.next().ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from GeoJSON positions, ignoring any altitude component.
/// Format: [[x, y], [x, y, z], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = coords.iter()
        .map(|position| {
            let x = position[0].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
            let y = position[1].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
            Ok(Coord { x, y })
        })
        .collect::<Result<Vec<_>>>()?;

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

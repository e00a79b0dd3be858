//! City boundary extent
//!
//! Bounding box of the polygons in a GeoJSON file. The extent is informational
//! only; no emissions calculation depends on it.

use crate::errors::IoResult;
use geo::{BoundingRect, Geometry, GeometryCollection, MultiPolygon, Polygon};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Collect polygons, descending into nested collections. Other geometry kinds are ignored.
fn collect_polygons(geometry: Geometry<f64>, polygons: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => polygons.push(polygon),
        Geometry::MultiPolygon(MultiPolygon(parts)) => polygons.extend(parts),
        Geometry::GeometryCollection(GeometryCollection(members)) => {
            for member in members {
                collect_polygons(member, polygons);
            }
        }
        _ => {}
    }
}

/// Bounds of all polygon and multipolygon rings in a GeoJSON document.
///
/// Returns `None` when the document contains no polygon coordinates.
pub fn geojson_bounds(document: &str) -> IoResult<Option<GeoBounds>> {
    let geojson: GeoJson = document.parse().map_err(Box::new)?;
    let collection = GeometryCollection::<f64>::try_from(&geojson).map_err(Box::new)?;

    let mut polygons = Vec::new();
    for geometry in collection {
        collect_polygons(geometry, &mut polygons);
    }

    Ok(MultiPolygon(polygons).bounding_rect().map(|rect| GeoBounds {
        min_x: rect.min().x,
        max_x: rect.max().x,
        min_y: rect.min().y,
        max_y: rect.max().y,
    }))
}

/// Bounds of the polygons in the GeoJSON file at `path`; `None` if the file does not exist
pub fn load_geojson_bounds(path: impl AsRef<Path>) -> IoResult<Option<GeoBounds>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    geojson_bounds(&fs::read_to_string(path)?)
}

//! District boundary index: GeoJSON loading and part storage

use crate::districts::{DistrictId, DistrictPart, Result};
use geo::{LineString, Polygon};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawProperties {
    #[serde(rename = "BoroCD")]
    boro_cd: Option<u16>,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum RawGeometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

/// Immutable collection of district polygon parts.
///
/// Loaded once at startup; iteration order is the feature order of the
/// source file (MultiPolygon parts in coordinate order), so containment
/// queries are deterministic.
#[derive(Debug, Default)]
pub struct DistrictIndex {
    parts: Vec<DistrictPart>,
}

impl DistrictIndex {
    /// An empty index: every query degrades to "no district".
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index directly from parts. Useful for tests and for callers
    /// that source geometry elsewhere.
    pub fn from_parts(parts: Vec<DistrictPart>) -> Self {
        Self { parts }
    }

    /// Parse a GeoJSON FeatureCollection with `BoroCD` integer properties.
    /// Features without a usable id or geometry are skipped, not fatal.
    pub fn from_geojson_slice(bytes: &[u8]) -> Result<Self> {
        profiling::scope!("DistrictIndex::from_geojson_slice");

        let collection: RawCollection = serde_json::from_slice(bytes)?;
        let mut parts = Vec::new();

        for feature in collection.features {
            let Some(code) = feature.properties.boro_cd else {
                tracing::warn!("Skipping feature without a BoroCD property");
                continue;
            };
            let Some(geometry) = feature.geometry else {
                tracing::warn!(boro_cd = code, "Skipping feature without geometry");
                continue;
            };

            let id = DistrictId::new(code);
            match geometry {
                RawGeometry::Polygon(rings) => {
                    if let Some(polygon) = polygon_from_rings(id, rings) {
                        parts.push(DistrictPart::new(id, polygon));
                    }
                }
                RawGeometry::MultiPolygon(polygons) => {
                    for rings in polygons {
                        if let Some(polygon) = polygon_from_rings(id, rings) {
                            parts.push(DistrictPart::new(id, polygon));
                        }
                    }
                }
            }
        }

        Ok(Self { parts })
    }

    /// Read and parse a GeoJSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_geojson_slice(&bytes)
    }

    /// Load a GeoJSON file, degrading to an empty index on any failure.
    /// The base map must still render when the geometry source is missing
    /// or corrupt; selection features become no-ops.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(index) => {
                tracing::info!(
                    path = %path.display(),
                    parts = index.len(),
                    districts = index.district_ids().len(),
                    "Loaded district boundaries"
                );
                index
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load district boundaries, starting with an empty index"
                );
                Self::new()
            }
        }
    }

    /// All polygon parts, in stable load order.
    pub fn parts(&self) -> &[DistrictPart] {
        &self.parts
    }

    /// Number of polygon parts (not districts).
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Unique district ids in first-seen order.
    pub fn district_ids(&self) -> Vec<DistrictId> {
        let mut ids = Vec::new();
        for part in &self.parts {
            if !ids.contains(&part.id) {
                ids.push(part.id);
            }
        }
        ids
    }
}

/// Build a polygon from GeoJSON rings (first exterior, rest holes).
/// Degenerate rings make the whole part unusable and are skipped with a log.
fn polygon_from_rings(id: DistrictId, rings: Vec<Vec<[f64; 2]>>) -> Option<Polygon<f64>> {
    let mut rings = rings.into_iter().map(ring_to_line_string);

    let exterior = match rings.next() {
        Some(ring) if ring.0.len() >= 4 => ring,
        _ => {
            tracing::warn!(boro_cd = id.code(), "Skipping part with degenerate exterior ring");
            return None;
        }
    };

    let interiors: Vec<LineString<f64>> = rings.filter(|ring| ring.0.len() >= 4).collect();
    Some(Polygon::new(exterior, interiors))
}

fn ring_to_line_string(ring: Vec<[f64; 2]>) -> LineString<f64> {
    LineString::from(ring.into_iter().map(|c| (c[0], c[1])).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "BoroCD": 105, "shape_area": "1.0" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-74.05, 40.70], [-73.95, 40.70],
                        [-73.95, 40.76], [-74.05, 40.76],
                        [-74.05, 40.70]
                    ]]
                }
            },
            {
                "type": "Feature",
                "properties": { "BoroCD": 401 },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[
                            [-73.80, 40.70], [-73.75, 40.70],
                            [-73.75, 40.75], [-73.80, 40.75],
                            [-73.80, 40.70]
                        ]],
                        [[
                            [-73.70, 40.76], [-73.65, 40.76],
                            [-73.65, 40.80], [-73.70, 40.80],
                            [-73.70, 40.76]
                        ]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "BoroCD": 164 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-73.94, 40.76], [-73.92, 40.76],
                        [-73.92, 40.80], [-73.94, 40.80],
                        [-73.94, 40.76]
                    ]]
                }
            }
        ]
    }"#;

    #[test]
    fn test_load_feature_collection() {
        let index = DistrictIndex::from_geojson_slice(SAMPLE.as_bytes()).unwrap();
        // The MultiPolygon district contributes two parts sharing one id.
        assert_eq!(index.len(), 4);
        let ids: Vec<u16> = index.district_ids().iter().map(|id| id.code()).collect();
        assert_eq!(ids, vec![105, 401, 164]);
    }

    #[test]
    fn test_part_order_is_feature_order() {
        let index = DistrictIndex::from_geojson_slice(SAMPLE.as_bytes()).unwrap();
        let codes: Vec<u16> = index.parts().iter().map(|p| p.id.code()).collect();
        assert_eq!(codes, vec![105, 401, 401, 164]);
    }

    #[test]
    fn test_corrupt_source_is_an_error() {
        assert!(DistrictIndex::from_geojson_slice(b"not json").is_err());
        assert!(DistrictIndex::from_geojson_slice(b"{\"type\": 42}").is_err());
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let index = DistrictIndex::load_or_empty(Path::new("/nonexistent/districts.json"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_features_without_id_or_geometry_are_skipped() {
        let partial = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": null },
                {
                    "type": "Feature",
                    "properties": { "BoroCD": 201 },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[
                            [-73.90, 40.80], [-73.85, 40.80],
                            [-73.85, 40.85], [-73.90, 40.85],
                            [-73.90, 40.80]
                        ]]
                    }
                }
            ]
        }"#;
        let index = DistrictIndex::from_geojson_slice(partial.as_bytes()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.parts()[0].id.code(), 201);
    }

    #[test]
    fn test_degenerate_rings_are_skipped() {
        let degenerate = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "BoroCD": 101 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[ [-74.0, 40.7], [-73.9, 40.7] ]]
                }
            }]
        }"#;
        let index = DistrictIndex::from_geojson_slice(degenerate.as_bytes()).unwrap();
        assert!(index.is_empty());
    }
}

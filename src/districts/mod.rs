//! Community district geometry module
//!
//! This module provides the loaded district boundary index and the pure
//! geometric queries over it. It has no rendering dependencies: the map layer
//! consumes it, but everything here is testable with plain `geo` types.
//!
//! # Overview
//!
//! - [`DistrictIndex`]: immutable collection of polygon parts loaded once from
//!   a GeoJSON feature collection keyed by the integer `BoroCD` code
//! - [`resolve`]: point-in-polygon and bounding-box queries over the index
//! - [`DistrictId`]: the BoroCD code (borough digit + board number), including
//!   the fixed set of non-selectable placeholder areas
//!
//! A district's geometry may be split over several parts (MultiPolygon
//! features are flattened), so queries aggregate by id, never by part.
//!
//! # Usage Example
//!
//! ```rust
//! use boardmap::districts::{resolve, DistrictIndex};
//! use geo::Point;
//!
//! let geojson = br#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": { "BoroCD": 105 },
//!         "geometry": {
//!             "type": "Polygon",
//!             "coordinates": [[
//!                 [-74.05, 40.70], [-73.95, 40.70],
//!                 [-73.95, 40.76], [-74.05, 40.76],
//!                 [-74.05, 40.70]
//!             ]]
//!         }
//!     }]
//! }"#;
//!
//! let index = DistrictIndex::from_geojson_slice(geojson)?;
//! let id = resolve::district_for_point(Point::new(-73.99, 40.73), &index);
//! assert_eq!(id.map(|id| id.code()), Some(105));
//! # Ok::<(), boardmap::districts::DistrictError>(())
//! ```

mod feature;
mod index;
pub mod resolve;

// Public API exports
pub use feature::{DistrictId, DistrictPart, Location};
pub use index::DistrictIndex;

/// Error types for the district geometry module
#[derive(Debug, thiserror::Error)]
pub enum DistrictError {
    #[error("GeoJSON parsing error: {0}")]
    GeoJsonParse(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DistrictError>;

//! Location name to latitude/longitude lookup.
//!
//! Coordinates are not persisted. They are read from the same upstream
//! document the ingest job uses, once per process, and kept in a
//! [`CoordinateCache`] that is handed to the query layer.

use cwa_temperature_core::ForecastSource;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::OnceCell;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

pub type CoordinateMap = HashMap<String, Coordinate>;

/// Depth-first search for the first non-empty array stored under a key named `location`.
///
/// Object keys are visited in document order.
pub fn find_location_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, child)| match child {
            Value::Array(items) if key == "location" && !items.is_empty() => Some(items),
            _ => find_location_list(child),
        }),
        Value::Array(items) => items.iter().find_map(find_location_list),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn first_number(location: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| number(location.get(*key)))
}

/// Name and position of one entry of the location list, if all three are usable.
///
/// `lat`/`latitude` and `lon`/`longitude` are read from the entry itself;
/// failing that, the first directly nested object carrying both `lat` and `lon`.
pub fn coordinate_of(location: &Value) -> Option<(String, Coordinate)> {
    let name = location
        .get("locationName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())?;

    let top_level = first_number(location, &["lat", "latitude"])
        .zip(first_number(location, &["lon", "longitude"]));

    let (lat, lon) = match top_level {
        Some(pair) => pair,
        None => location.as_object()?.values().find_map(|nested| {
            if !nested.is_object() {
                return None;
            }
            number(nested.get("lat")).zip(number(nested.get("lon")))
        })?,
    };

    Some((name.to_string(), Coordinate { lat, lon }))
}

/// Entries without a name or a numeric position are skipped, not reported.
pub fn build_coordinate_map(document: &Value) -> CoordinateMap {
    let Some(locations) = find_location_list(document) else {
        debug!("no location list found in upstream document");
        return CoordinateMap::new();
    };

    locations.iter().filter_map(coordinate_of).collect()
}

/// Populate-once cache of the coordinate map.
///
/// The first [`resolve`](Self::resolve) fetches and builds the map; every
/// later call in this process reuses it. A failed fetch caches an empty map.
pub struct CoordinateCache {
    source: Option<Arc<dyn ForecastSource>>,
    cell: OnceCell<Arc<CoordinateMap>>,
}

impl CoordinateCache {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        Self {
            source: Some(source),
            cell: OnceCell::new(),
        }
    }

    /// A cache that is already populated and never fetches
    pub fn seeded(map: CoordinateMap) -> Self {
        Self {
            source: None,
            cell: OnceCell::from(Arc::new(map)),
        }
    }

    pub fn empty() -> Self {
        Self::seeded(CoordinateMap::new())
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn resolve(&self) -> Arc<CoordinateMap> {
        self.cell
            .get_or_init(|| async {
                let Some(source) = &self.source else {
                    return Arc::new(CoordinateMap::new());
                };
                match source.fetch_document().await {
                    Ok(document) => {
                        let map = build_coordinate_map(&document);
                        debug!("resolved coordinates for {} locations", map.len());
                        Arc::new(map)
                    }
                    Err(e) => {
                        warn!("coordinate lookup unavailable: {}", e);
                        Arc::new(CoordinateMap::new())
                    }
                }
            })
            .await
            .clone()
    }
}

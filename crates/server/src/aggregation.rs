use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use utoipa::ToSchema;

use crate::{
    db::{self, normalize_all, Reading, TemperatureData},
    Coordinate, CoordinateCache,
};

/// How rows sharing an (area, date) pair are treated on the read side.
///
/// Every ingest run appends, so re-running the job stores the same forecast day again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Every stored row is reported
    #[default]
    KeepAll,
    /// Only the most recently inserted row of each (area, date) pair is reported
    LatestInserted,
}

/// Most recent reading of one area joined with its coordinates
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LatestReading {
    pub area: String,
    pub date: String,
    #[serde(rename = "maxT")]
    pub max_t: Option<f64>,
    #[serde(rename = "minT")]
    pub min_t: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LatestReading {
    fn join(reading: Reading, coordinate: Option<&Coordinate>) -> Self {
        Self {
            area: reading.area,
            date: reading.date,
            max_t: reading.max_t,
            min_t: reading.min_t,
            lat: coordinate.map(|c| c.lat),
            lon: coordinate.map(|c| c.lon),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("missing area parameter")]
    MissingArea,
    #[error(transparent)]
    Data(#[from] db::Error),
}

/// Keeps the last inserted row of every (area, date) pair, at that row's position.
pub fn collapse_duplicates(readings: Vec<Reading>) -> Vec<Reading> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Reading> = readings
        .into_iter()
        .rev()
        .filter(|r| seen.insert((r.area.clone(), r.date.clone())))
        .collect();
    kept.reverse();
    kept
}

/// One reading per area, areas in order of first appearance.
///
/// A later reading wins when its date is non-empty and either the current
/// pick has no date or the new date compares strictly greater. Ties keep the
/// first one seen.
pub fn latest_per_area(readings: Vec<Reading>) -> Vec<Reading> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<Reading> = Vec::new();

    for reading in readings {
        match index.get(&reading.area) {
            Some(&at) => {
                let current = &latest[at];
                let newer = !reading.date.is_empty()
                    && (current.date.is_empty() || reading.date > current.date);
                if newer {
                    latest[at] = reading;
                }
            }
            None => {
                index.insert(reading.area.clone(), latest.len());
                latest.push(reading);
            }
        }
    }

    latest
}

/// Readings of `area`, oldest first. Equal dates keep insertion order.
pub fn history_for_area(readings: Vec<Reading>, area: &str) -> Vec<Reading> {
    let mut history: Vec<Reading> = readings.into_iter().filter(|r| r.area == area).collect();
    history.sort_by(|a, b| a.date.cmp(&b.date));
    history
}

/// Read-side views over the stored records. Nothing is cached here
/// apart from the coordinate map; every call reads the store again.
pub struct TemperatureQueries {
    data: Arc<dyn TemperatureData>,
    coordinates: Arc<CoordinateCache>,
    duplicates: DuplicatePolicy,
}

impl TemperatureQueries {
    pub fn new(
        data: Arc<dyn TemperatureData>,
        coordinates: Arc<CoordinateCache>,
        duplicates: DuplicatePolicy,
    ) -> Self {
        Self {
            data,
            coordinates,
            duplicates,
        }
    }

    /// All stored readings, normalized, in insertion order
    pub async fn readings(&self) -> Result<Vec<Reading>, QueryError> {
        let records = self.data.records().await?;
        let readings = normalize_all(&records);
        Ok(match self.duplicates {
            DuplicatePolicy::KeepAll => readings,
            DuplicatePolicy::LatestInserted => collapse_duplicates(readings),
        })
    }

    pub async fn list_latest_per_area(&self) -> Result<Vec<LatestReading>, QueryError> {
        let latest = latest_per_area(self.readings().await?);
        if latest.is_empty() {
            return Ok(vec![]);
        }

        let coordinates = self.coordinates.resolve().await;
        debug!(
            "latest readings for {} areas, {} with coordinates",
            latest.len(),
            latest
                .iter()
                .filter(|r| coordinates.contains_key(&r.area))
                .count()
        );

        Ok(latest
            .into_iter()
            .map(|reading| {
                let coordinate = coordinates.get(&reading.area);
                LatestReading::join(reading, coordinate)
            })
            .collect())
    }

    pub async fn list_history_for_area(
        &self,
        area: Option<&str>,
    ) -> Result<Vec<Reading>, QueryError> {
        let area = match area {
            Some(area) if !area.trim().is_empty() => area,
            _ => return Err(QueryError::MissingArea),
        };
        Ok(history_for_area(self.readings().await?, area))
    }
}

//! Recorded location tracks.
//!
//! A track is a CSV file with the columns `lat`, `lng`, `accuracy` and
//! `error`. Each row is either a fix or a location error:
//!
//! ```csv
//! lat,lng,accuracy,error
//! 47.6062,-122.3321,5,
//! ,,,unknown
//! ,,,denied
//! ,,,GPS receiver disconnected
//! ```

use std::{fs::File, io, path::Path};

use geomark_core::entities::{
    Coordinate, DistanceFilter, Fix, LocationError, LocationEvent, Meters,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackParseError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Invalid coordinate in line {line}")]
    InvalidCoordinate { line: u64 },
    #[error("Line {line} contains neither a position nor an error")]
    Incomplete { line: u64 },
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    lat: Option<f64>,
    lng: Option<f64>,
    accuracy: Option<Meters>,
    error: Option<String>,
}

pub fn read_track_file<P: AsRef<Path>>(path: P) -> Result<Vec<LocationEvent>, TrackParseError> {
    let file = File::open(path)?;
    read_track(file)
}

pub fn read_track<R: io::Read>(reader: R) -> Result<Vec<LocationEvent>, TrackParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut events = vec![];
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let TrackRecord {
            lat,
            lng,
            accuracy,
            error,
        } = record.deserialize(Some(&headers))?;
        let event = match (lat, lng, error) {
            (_, _, Some(error)) if !error.is_empty() => {
                LocationEvent::Failed(location_error(&error))
            }
            (Some(lat), Some(lng), _) => {
                let pos = Coordinate::try_from_lat_lng_deg(lat, lng)
                    .ok_or(TrackParseError::InvalidCoordinate { line })?;
                let fix = Fix {
                    horizontal_accuracy: accuracy,
                    ..Fix::now(pos)
                };
                LocationEvent::Updated(vec![fix])
            }
            _ => return Err(TrackParseError::Incomplete { line }),
        };
        events.push(event);
    }
    log::debug!("Read {} location events", events.len());
    Ok(events)
}

/// Drops fixes that are closer than the filter distance to the last
/// delivered fix. Errors always pass.
pub fn apply_distance_filter(
    events: Vec<LocationEvent>,
    filter: DistanceFilter,
) -> Vec<LocationEvent> {
    let DistanceFilter::Meters(min_distance) = filter else {
        return events;
    };
    let mut last_pos: Option<Coordinate> = None;
    events
        .into_iter()
        .filter_map(|event| match event {
            LocationEvent::Updated(fixes) => {
                let fixes: Vec<_> = fixes
                    .into_iter()
                    .filter(|fix| {
                        let moved = last_pos
                            .map(|last| last.distance_to(fix.pos) >= min_distance)
                            .unwrap_or(true);
                        if moved {
                            last_pos = Some(fix.pos);
                        }
                        moved
                    })
                    .collect();
                (!fixes.is_empty()).then_some(LocationEvent::Updated(fixes))
            }
            event => Some(event),
        })
        .collect()
}

fn location_error(error: &str) -> LocationError {
    match error.to_ascii_lowercase().as_str() {
        "unknown" | "location-unknown" => LocationError::LocationUnknown,
        "denied" => LocationError::Denied,
        _ => LocationError::Other(error.to_owned()),
    }
}

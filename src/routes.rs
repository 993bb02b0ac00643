use crate::segment::{RawSegment, Segment};
use crate::taxi::Taxi;
use crate::util::Interval;
use crate::{TaxiId, TaxiSet};
use serde::Deserialize;

/// The journeys of every taxi in a replay.
#[derive(Clone, Default)]
pub struct Routes {
    /// The taxis, in the order they appear in the route file.
    taxis: TaxiSet,
}

impl Routes {
    /// Creates an empty set of routes.
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a route file: a JSON object mapping each taxi's name to its list of segments.
    ///
    /// Taxis whose segments are malformed are skipped with a warning; only a document
    /// which is not a JSON object is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut routes = Self::new();
        for (name, value) in raw {
            let segments = match Vec::<RawSegment>::deserialize(value) {
                Ok(raw_segments) => raw_segments
                    .into_iter()
                    .map(Segment::from_raw)
                    .collect::<Result<Vec<_>, _>>(),
                Err(err) => {
                    log::warn!("Skipping taxi {}: {}", name, err);
                    continue;
                }
            };
            match segments {
                Ok(segments) => {
                    if routes.add_taxi(name.clone(), segments).is_none() {
                        log::warn!("Skipping taxi {}: no segments", name);
                    }
                }
                Err(err) => log::warn!("Skipping taxi {}: {}", name, err),
            }
        }
        log::debug!("Parsed routes for {} taxis", routes.len());
        Ok(routes)
    }

    /// Adds a taxi. Returns `None`, adding nothing, if there are no segments.
    pub fn add_taxi(&mut self, name: String, segments: Vec<Segment>) -> Option<TaxiId> {
        if segments.is_empty() {
            return None;
        }
        Some(self.taxis.insert_with_key(|id| Taxi::new(id, name, segments)))
    }

    /// Returns an iterator over all the taxis.
    pub fn iter_taxis(&self) -> impl Iterator<Item = &Taxi> {
        self.taxis.values()
    }

    /// Gets a reference to the taxi with the given ID.
    pub fn get_taxi(&self, taxi_id: TaxiId) -> &Taxi {
        &self.taxis[taxi_id]
    }

    /// The number of taxis.
    pub fn len(&self) -> usize {
        self.taxis.len()
    }

    /// Whether there are no taxis.
    pub fn is_empty(&self) -> bool {
        self.taxis.is_empty()
    }

    /// The time at which the last segment of any taxi ends.
    pub fn end_time(&self) -> Option<f64> {
        self.iter_taxis().map(Taxi::end_time).reduce(f64::max)
    }

    /// The range of times a replay starting at `min_time` should cover.
    ///
    /// Never ends before it starts, even if every segment is finished by `min_time`.
    pub fn time_domain(&self, min_time: f64) -> Interval<f64> {
        let max_time = self.end_time().unwrap_or(min_time);
        Interval::new(min_time, f64::max(min_time, max_time))
    }
}

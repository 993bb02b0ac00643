use crate::error::SegmentError;
use crate::math::{lerp_point, Point2d};
use crate::util::Interval;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The purpose of a segment of a taxi's journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Driving to pick up a passenger.
    Pickup,
    /// Carrying a passenger to their destination.
    Dropoff,
    /// Free to be dispatched.
    #[serde(alias = "idle-eligible")]
    Idle,
    /// Anything else found in the route file.
    #[serde(other)]
    Other,
}

/// A timestamped sub-path of a taxi's journey.
///
/// Always contains at least one point, with non-decreasing timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    kind: SegmentKind,
    route: Vec<Point2d>,
    timestamps: Vec<f64>,
}

/// A segment as it appears in the route file.
#[derive(Deserialize)]
pub(crate) struct RawSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    #[serde(with = "crate::math::pairs")]
    pub route: Vec<Point2d>,
    #[serde(rename = "timestamp")]
    pub timestamps: Vec<f64>,
}

impl Segment {
    /// Creates a new segment.
    ///
    /// If `route` and `timestamps` differ in length, the longer one is truncated.
    pub fn new(
        kind: SegmentKind,
        mut route: Vec<Point2d>,
        mut timestamps: Vec<f64>,
    ) -> Result<Self, SegmentError> {
        let len = usize::min(route.len(), timestamps.len());
        if len == 0 {
            return Err(SegmentError::Empty);
        }
        if route.len() != timestamps.len() {
            log::warn!(
                "Segment has {} points but {} timestamps, truncating to {}",
                route.len(),
                timestamps.len(),
                len
            );
            route.truncate(len);
            timestamps.truncate(len);
        }
        for (index, (prev, next)) in timestamps.iter().tuple_windows().enumerate() {
            // Written this way round so NaN is rejected too.
            if !(prev <= next) {
                return Err(SegmentError::OutOfOrder {
                    index: index + 1,
                    prev: *prev,
                    next: *next,
                });
            }
        }
        Ok(Self {
            kind,
            route,
            timestamps,
        })
    }

    pub(crate) fn from_raw(raw: RawSegment) -> Result<Self, SegmentError> {
        Self::new(raw.kind, raw.route, raw.timestamps)
    }

    /// The kind of segment.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The waypoints of the segment.
    pub fn route(&self) -> &[Point2d] {
        &self.route
    }

    /// The time at which each waypoint is reached.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// The time at which the segment starts.
    pub fn start_time(&self) -> f64 {
        self.timestamps[0]
    }

    /// The time at which the segment ends.
    pub fn end_time(&self) -> f64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// The period during which the segment is active.
    pub fn interval(&self) -> Interval<f64> {
        Interval::new(self.start_time(), self.end_time())
    }

    /// Whether the segment is active at the given time.
    pub fn is_active(&self, time: f64) -> bool {
        self.interval().contains(time)
    }

    /// The first waypoint.
    pub fn first_point(&self) -> Point2d {
        self.route[0]
    }

    /// The last waypoint.
    pub fn last_point(&self) -> Point2d {
        self.route[self.route.len() - 1]
    }

    /// Samples the position along the segment at the given time.
    ///
    /// Times outside the segment are clamped to its ends.
    pub fn sample(&self, time: f64) -> Point2d {
        if self.route.len() < 2 {
            return self.route[0];
        }
        let max_idx = self.route.len() - 2;
        let idx = self
            .timestamps
            .iter()
            .tuple_windows()
            .position(|(t0, t1)| *t0 <= time && time <= *t1)
            .unwrap_or(0)
            .min(max_idx);
        let span = Interval::new(self.timestamps[idx], self.timestamps[idx + 1]);
        lerp_point(self.route[idx], self.route[idx + 1], span.fraction(time))
    }
}

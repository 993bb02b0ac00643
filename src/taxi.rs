use crate::math::Point2d;
use crate::segment::Segment;
use crate::TaxiId;

/// A taxi and the segments making up its journey.
#[derive(Clone, Debug)]
pub struct Taxi {
    /// The taxi's ID.
    pub(crate) id: TaxiId,
    /// The key of the taxi in the route file.
    name: String,
    /// The segments of the journey, in the order they appear in the route file.
    segments: Vec<Segment>,
}

/// Where a taxi is at a particular time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Location<'a> {
    /// Travelling along a segment.
    Active {
        segment: &'a Segment,
        position: Point2d,
    },
    /// Between, before or after its segments.
    Idle { position: Point2d },
}

impl<'a> Location<'a> {
    /// The taxi's position.
    pub fn position(&self) -> Point2d {
        match *self {
            Location::Active { position, .. } | Location::Idle { position } => position,
        }
    }

    /// The segment the taxi is travelling along, if any.
    pub fn segment(&self) -> Option<&'a Segment> {
        match *self {
            Location::Active { segment, .. } => Some(segment),
            Location::Idle { .. } => None,
        }
    }
}

impl Taxi {
    /// Creates a new taxi; `segments` must not be empty.
    pub(crate) fn new(id: TaxiId, name: String, segments: Vec<Segment>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { id, name, segments }
    }

    /// Gets the taxi's ID.
    pub fn id(&self) -> TaxiId {
        self.id
    }

    /// The key of the taxi in the route file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The segments of the taxi's journey.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The time at which the taxi's final segment ends.
    pub fn end_time(&self) -> f64 {
        self.last_segment().end_time()
    }

    /// The first segment which is active at the given time.
    pub fn active_segment(&self, time: f64) -> Option<&Segment> {
        self.segments.iter().find(|seg| seg.is_active(time))
    }

    /// Finds where the taxi is at the given time.
    pub fn locate(&self, time: f64) -> Location<'_> {
        match self.active_segment(time) {
            Some(segment) => Location::Active {
                segment,
                position: segment.sample(time),
            },
            None => Location::Idle {
                position: self.idle_position(time),
            },
        }
    }

    /// The position of the taxi when no segment is active.
    fn idle_position(&self, time: f64) -> Point2d {
        let last = self.last_segment();
        if time >= last.end_time() {
            return last.last_point();
        }
        self.segments
            .iter()
            .rev()
            .find(|seg| time >= seg.start_time())
            .map(Segment::last_point)
            .unwrap_or_else(|| self.segments[0].first_point())
    }

    fn last_segment(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }
}

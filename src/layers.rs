//! Declarative layer data for a map renderer.
//!
//! Everything here is a pure function of the routes and the current time.

use crate::math::Point2d;
use crate::routes::Routes;
use crate::segment::SegmentKind;
use crate::taxi::Location;
use serde::Serialize;

/// An RGB colour.
pub type Color = [u8; 3];

/// Colour of a taxi travelling along a segment.
pub const ACTIVE_COLOR: Color = [0, 122, 255];
/// Colour of an idle taxi.
pub const IDLE_COLOR: Color = [150, 150, 150];
/// Colour of an arc towards a pickup.
pub const PICKUP_COLOR: Color = [255, 0, 0];
/// Colour of an arc towards a dropoff.
pub const DROPOFF_COLOR: Color = [0, 255, 0];
/// Colour of the trails.
pub const TRAIL_COLOR: Color = [0, 122, 255];

/// A taxi's current position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TaxiPoint {
    #[serde(with = "crate::math::pair")]
    pub position: Point2d,
    pub color: Color,
}

/// A line from a taxi to the destination of its pickup or dropoff.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Arc {
    #[serde(with = "crate::math::pair")]
    pub source: Point2d,
    #[serde(with = "crate::math::pair")]
    pub target: Point2d,
    pub color: Color,
}

/// The path of one segment, drawn as a trail that fades behind the current time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripPath {
    #[serde(with = "crate::math::pairs")]
    pub path: Vec<Point2d>,
    pub timestamps: Vec<f64>,
    pub color: Color,
}

/// Everything needed to draw a single frame.
#[derive(Clone, Debug, Serialize)]
pub struct Layers<'a> {
    pub current_time: f64,
    pub trail_length: f64,
    pub trips: &'a [TripPath],
    pub arcs: Vec<Arc>,
    pub points: Vec<TaxiPoint>,
}

/// The colour of the arc for a segment kind, or `None` if it has no arc.
pub fn arc_color(kind: SegmentKind) -> Option<Color> {
    match kind {
        SegmentKind::Pickup => Some(PICKUP_COLOR),
        SegmentKind::Dropoff => Some(DROPOFF_COLOR),
        SegmentKind::Idle | SegmentKind::Other => None,
    }
}

/// The position of every taxi at the given time.
pub fn taxi_points(routes: &Routes, time: f64) -> Vec<TaxiPoint> {
    routes
        .iter_taxis()
        .map(|taxi| match taxi.locate(time) {
            Location::Active { position, .. } => TaxiPoint {
                position,
                color: ACTIVE_COLOR,
            },
            Location::Idle { position } => TaxiPoint {
                position,
                color: IDLE_COLOR,
            },
        })
        .collect()
}

/// Arcs for every taxi currently on its way to a pickup or a dropoff.
pub fn dynamic_arcs(routes: &Routes, time: f64) -> Vec<Arc> {
    routes
        .iter_taxis()
        .filter_map(|taxi| {
            let segment = taxi.active_segment(time)?;
            let color = arc_color(segment.kind())?;
            Some(Arc {
                source: segment.sample(time),
                target: segment.last_point(),
                color,
            })
        })
        .collect()
}

/// The trail of every segment of every taxi.
pub fn trip_paths(routes: &Routes) -> Vec<TripPath> {
    routes
        .iter_taxis()
        .flat_map(|taxi| taxi.segments())
        .map(|segment| TripPath {
            path: segment.route().to_vec(),
            timestamps: segment.timestamps().to_vec(),
            color: TRAIL_COLOR,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::segment::Segment;

    fn routes() -> Routes {
        let mut routes = Routes::new();
        let seg = |kind, route: &[(f64, f64)], timestamps: &[f64]| {
            let route = route.iter().map(|(x, y)| Point2d::new(*x, *y)).collect();
            Segment::new(kind, route, timestamps.to_vec()).unwrap()
        };
        routes.add_taxi(
            "1".into(),
            vec![
                seg(SegmentKind::Pickup, &[(0.0, 0.0), (10.0, 0.0)], &[0.0, 10.0]),
                seg(SegmentKind::Dropoff, &[(10.0, 0.0), (10.0, 10.0)], &[12.0, 22.0]),
            ],
        );
        routes.add_taxi(
            "2".into(),
            vec![seg(SegmentKind::Idle, &[(5.0, 5.0), (5.0, 15.0)], &[0.0, 10.0])],
        );
        routes.add_taxi(
            "3".into(),
            vec![seg(SegmentKind::Other, &[(0.0, 0.0), (0.0, 4.0)], &[20.0, 24.0])],
        );
        routes
    }

    #[test]
    fn pickup_arc() {
        let arcs = dynamic_arcs(&routes(), 5.0);
        assert_eq!(
            arcs,
            vec![Arc {
                source: Point2d::new(5.0, 0.0),
                target: Point2d::new(10.0, 0.0),
                color: PICKUP_COLOR,
            }]
        );
    }

    #[test]
    fn dropoff_arc() {
        let arcs = dynamic_arcs(&routes(), 17.0);
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].source, Point2d::new(10.0, 5.0));
        assert_eq!(arcs[0].target, Point2d::new(10.0, 10.0));
        assert_eq!(arcs[0].color, DROPOFF_COLOR);
    }

    #[test]
    fn no_arcs_while_idle() {
        assert!(dynamic_arcs(&routes(), 11.0).is_empty());
        assert!(dynamic_arcs(&routes(), 23.0).is_empty());
    }

    #[test]
    fn points_are_coloured_by_activity() {
        let points = taxi_points(&routes(), 11.0);
        assert_eq!(
            points,
            vec![
                TaxiPoint {
                    position: Point2d::new(10.0, 0.0),
                    color: IDLE_COLOR
                },
                TaxiPoint {
                    position: Point2d::new(5.0, 15.0),
                    color: IDLE_COLOR
                },
                TaxiPoint {
                    position: Point2d::new(0.0, 0.0),
                    color: IDLE_COLOR
                },
            ]
        );
        let points = taxi_points(&routes(), 5.0);
        assert_eq!(points[0].color, ACTIVE_COLOR);
        assert_eq!(points[1].position, Point2d::new(5.0, 10.0));
        assert_eq!(points[1].color, ACTIVE_COLOR);
        assert_eq!(points[2].color, IDLE_COLOR);
    }

    #[test]
    fn same_time_same_frame() {
        let routes = routes();
        for time in [0.0, 3.3, 10.0, 17.25, 40.0] {
            assert_eq!(taxi_points(&routes, time), taxi_points(&routes, time));
            assert_eq!(dynamic_arcs(&routes, time), dynamic_arcs(&routes, time));
        }
    }

    #[test]
    fn one_trail_per_segment() {
        let trips = trip_paths(&routes());
        assert_eq!(trips.len(), 4);
        assert_eq!(trips[1].timestamps, vec![12.0, 22.0]);
        assert_eq!(trips[3].path, vec![Point2d::new(0.0, 0.0), Point2d::new(0.0, 4.0)]);
    }

    #[test]
    fn serializes_as_pairs() {
        let arc = Arc {
            source: Point2d::new(1.5, 2.0),
            target: Point2d::new(3.0, 4.0),
            color: PICKUP_COLOR,
        };
        let json = serde_json::to_value(arc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": [1.5, 2.0], "target": [3.0, 4.0], "color": [255, 0, 0]})
        );
    }
}

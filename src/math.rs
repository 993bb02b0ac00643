//! Mathematical structs and functions.

use cgmath::Point2;

/// A 2D point
pub type Point2d = Point2<f64>;

/// Linearly interpolates between two points.
///
/// `r` is the fraction of the way from `a` to `b`; it is not clamped.
/// Returns exactly `a` when `r` is 0 and exactly `b` when `r` is 1.
pub fn lerp_point(a: Point2d, b: Point2d, r: f64) -> Point2d {
    Point2d::new(a.x * (1.0 - r) + b.x * r, a.y * (1.0 - r) + b.y * r)
}

/// Serializes a [Point2d] as an `[x, y]` pair, the layout expected by the rendering layers.
pub(crate) mod pair {
    use super::Point2d;
    use serde::{Serialize, Serializer};

    pub fn serialize<S: Serializer>(point: &Point2d, serializer: S) -> Result<S::Ok, S::Error> {
        [point.x, point.y].serialize(serializer)
    }
}

/// Like [pair], but for a sequence of points.
pub(crate) mod pairs {
    use super::Point2d;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point2d], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(points.len()))?;
        for point in points {
            seq.serialize_element(&[point.x, point.y])?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Point2d>, D::Error> {
        let raw = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|[x, y]| Point2d::new(x, y)).collect())
    }
}

//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval contains the value, inclusive of both ends.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Float> Interval<T> {
    /// Clamps a value into the interval.
    pub fn clamp(&self, value: T) -> T {
        value.max(self.min).min(self.max)
    }

    /// The fraction of the way `value` lies through the interval, clamped to `[0, 1]`.
    /// A degenerate interval yields zero.
    pub fn fraction(&self, value: T) -> T {
        let len = self.length();
        if len <= T::zero() {
            return T::zero();
        }
        ((value - self.min) / len).max(T::zero()).min(T::one())
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

/// Formats a simulation time, in minutes since midnight, as `HH:MM`.
pub fn clock_label(time: f64) -> String {
    let hours = (time / 60.0).floor();
    let minutes = (time % 60.0).floor();
    format!("{:02}:{:02}", hours as i64, minutes as i64)
}

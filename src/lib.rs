pub use cgmath;
pub use config::Config;
pub use dataset::Dataset;
pub use error::{ConfigError, LoadError, SegmentError};
pub use layers::{Arc, Color, Layers, TaxiPoint, TripPath};
pub use player::{Clock, ManualClock, PlaybackState, Player, PlayerParams, SystemClock};
pub use replay::Replay;
pub use routes::Routes;
pub use segment::{Segment, SegmentKind};
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use taxi::{Location, Taxi};
pub use util::{clock_label, Interval};

mod config;
pub mod dataset;
mod error;
pub mod layers;
pub mod math;
pub mod player;
mod replay;
mod routes;
mod segment;
mod taxi;
mod util;

new_key_type! {
    /// Unique ID of a [Taxi].
    pub struct TaxiId;
}

type TaxiSet = SlotMap<TaxiId, Taxi>;

use crate::config::Config;
use crate::layers::{dynamic_arcs, taxi_points, trip_paths, Arc, Layers, TaxiPoint, TripPath};
use crate::player::{Clock, PlaybackState, Player, PlayerParams};
use crate::routes::Routes;
use crate::util::{clock_label, Interval};

/// Default length of the fading trail behind each taxi, in units of simulation time.
pub const DEFAULT_TRAIL_LENGTH: f64 = 0.8;

/// An animated replay of taxi journeys.
pub struct Replay<C: Clock> {
    /// The journeys being replayed.
    routes: Routes,
    /// The trail of every segment, which does not change between frames.
    trips: Vec<TripPath>,
    /// Drives the simulation time.
    player: Player<C>,
    /// Length of the trail behind each taxi.
    trail_length: f64,
}

impl<C: Clock> Replay<C> {
    /// Creates a replay which starts playing from `min_time`.
    pub fn new(routes: Routes, clock: C, min_time: f64, params: PlayerParams) -> Self {
        let domain = routes.time_domain(min_time);
        log::info!(
            "Replaying {} taxis from {} to {}",
            routes.len(),
            clock_label(domain.min),
            clock_label(domain.max)
        );
        let trips = trip_paths(&routes);
        Self {
            routes,
            trips,
            player: Player::new(clock, domain, params),
            trail_length: DEFAULT_TRAIL_LENGTH,
        }
    }

    /// Creates a replay using the timing parameters in `config`.
    pub fn from_config(routes: Routes, clock: C, config: &Config) -> Self {
        Self::new(routes, clock, config.min_time, config.player_params())
            .with_trail_length(config.trail_length)
    }

    /// Sets the length of the trail behind each taxi.
    pub fn with_trail_length(mut self, trail_length: f64) -> Self {
        self.trail_length = trail_length;
        self
    }

    /// Services one display refresh. Returns true if simulation time advanced.
    pub fn on_refresh(&mut self) -> bool {
        self.player.on_refresh()
    }

    /// Sets the time by hand. [Read more](Player::scrub).
    pub fn scrub(&mut self, time: f64) {
        self.player.scrub(time);
    }

    /// The current simulation time.
    pub fn time(&self) -> f64 {
        self.player.time()
    }

    /// The range of valid simulation times.
    pub fn domain(&self) -> Interval<f64> {
        self.player.domain()
    }

    pub fn state(&self) -> PlaybackState {
        self.player.state()
    }

    /// The current time formatted as `HH:MM`.
    pub fn label(&self) -> String {
        clock_label(self.time())
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn player(&self) -> &Player<C> {
        &self.player
    }

    pub fn trips(&self) -> &[TripPath] {
        &self.trips
    }

    /// The current position of every taxi.
    pub fn points(&self) -> Vec<TaxiPoint> {
        taxi_points(&self.routes, self.time())
    }

    /// The current pickup and dropoff arcs.
    pub fn arcs(&self) -> Vec<Arc> {
        dynamic_arcs(&self.routes, self.time())
    }

    /// Everything needed to draw the current frame.
    pub fn layers(&self) -> Layers<'_> {
        Layers {
            current_time: self.time(),
            trail_length: self.trail_length,
            trips: &self.trips,
            arcs: self.arcs(),
            points: self.points(),
        }
    }
}

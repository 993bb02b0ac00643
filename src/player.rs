//! Drives simulation time forward, one display refresh at a time.

use crate::util::Interval;
use std::cell::Cell;
use std::time::Instant;

/// A source of wall-clock time, in seconds.
pub trait Clock {
    /// The current time in seconds, relative to an arbitrary origin.
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Reads the system's monotonic clock.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock which only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Default::default()
    }

    /// Moves the clock forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Whether simulation time is moving on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Time advances by a fixed step every frame.
    AutoPlaying,
    /// Time only changes when scrubbed.
    Paused,
}

/// Whether a frame has been requested from the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    None,
    Pending,
}

/// The tunable parameters of a [Player].
#[derive(Clone, Copy, Debug)]
pub struct PlayerParams {
    /// How far simulation time advances each frame.
    pub time_step: f64,
    /// How long after the last scrub to resume playing, in s.
    pub resume_delay: f64,
}

impl PlayerParams {
    /// Whether time moves forward by a finite amount each frame.
    pub fn is_valid(&self) -> bool {
        self.time_step.is_finite() && self.time_step > 0.0
    }
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            time_step: 0.005,
            resume_delay: 0.15,
        }
    }
}

/// Owns the simulation time and moves it along.
///
/// The embedding loop calls [Player::on_refresh] once per display refresh. A step
/// only happens if a frame was requested, and at most one request can be pending,
/// so however often playback is resumed time never advances more than once per frame.
pub struct Player<C: Clock> {
    clock: C,
    params: PlayerParams,
    /// The range simulation time is confined to.
    domain: Interval<f64>,
    /// The current simulation time.
    time: f64,
    state: PlaybackState,
    frame: FrameRequest,
    /// When to resume playing after a scrub, in clock time.
    resume_at: Option<f64>,
}

impl<C: Clock> Player<C> {
    /// Creates a player at the start of `domain`, auto-playing with a frame requested.
    ///
    /// A time step which is not finite and positive is replaced by the default.
    pub fn new(clock: C, domain: Interval<f64>, mut params: PlayerParams) -> Self {
        if !params.is_valid() {
            log::warn!("Invalid time step {}, using the default", params.time_step);
            params.time_step = PlayerParams::default().time_step;
        }
        let mut player = Self {
            clock,
            params,
            domain,
            time: domain.min,
            state: PlaybackState::AutoPlaying,
            frame: FrameRequest::None,
            resume_at: None,
        };
        player.request_frame();
        player
    }

    /// The current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The range of valid simulation times.
    pub fn domain(&self) -> Interval<f64> {
        self.domain
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether a frame is waiting to be serviced.
    pub fn frame_pending(&self) -> bool {
        self.frame == FrameRequest::Pending
    }

    /// Whether playback will resume once the scrub delay expires.
    pub fn resume_pending(&self) -> bool {
        self.resume_at.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Requests that the next refresh advances time.
    /// Returns false if a request was already pending.
    pub fn request_frame(&mut self) -> bool {
        if self.frame == FrameRequest::Pending {
            return false;
        }
        self.frame = FrameRequest::Pending;
        true
    }

    /// Sets the time by hand, as when dragging a slider. Playback pauses, and
    /// resumes once no scrub has happened for the resume delay.
    pub fn scrub(&mut self, time: f64) {
        self.time = self.domain.clamp(time);
        self.state = PlaybackState::Paused;
        self.resume_at = Some(self.clock.now() + self.params.resume_delay);
        log::trace!("Scrubbed to {:.3}", self.time);
    }

    /// Services one display refresh. Returns true if simulation time advanced.
    pub fn on_refresh(&mut self) -> bool {
        self.poll_resume();

        if self.frame != FrameRequest::Pending {
            return false;
        }
        self.frame = FrameRequest::None;

        if self.state != PlaybackState::AutoPlaying {
            return false;
        }

        let next = self.time + self.params.time_step;
        if next >= self.domain.max {
            self.time = self.domain.max;
            self.state = PlaybackState::Paused;
            log::debug!("Reached the end of the replay at {:.3}", self.time);
        } else {
            self.time = next;
            self.request_frame();
        }
        true
    }

    /// Resumes playing if the scrub delay has expired.
    fn poll_resume(&mut self) {
        match self.resume_at {
            Some(at) if self.clock.now() >= at => {
                self.resume_at = None;
                if self.time < self.domain.max {
                    self.state = PlaybackState::AutoPlaying;
                    self.request_frame();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const FRAME: f64 = 1.0 / 60.0;

    fn params() -> PlayerParams {
        PlayerParams {
            time_step: 0.5,
            resume_delay: 0.15,
        }
    }

    #[test]
    fn starts_playing() {
        let player = Player::new(ManualClock::new(), Interval::new(420.0, 430.0), params());
        assert_eq!(player.time(), 420.0);
        assert_eq!(player.state(), PlaybackState::AutoPlaying);
        assert!(player.frame_pending());
    }

    #[test]
    fn advances_once_per_refresh() {
        let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 10.0), params());
        assert!(player.on_refresh());
        assert_approx_eq!(player.time(), 0.5);
        assert!(player.on_refresh());
        assert_approx_eq!(player.time(), 1.0);
    }

    #[test]
    fn duplicate_requests_are_ignored() {
        let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 10.0), params());
        assert!(!player.request_frame());
        assert!(!player.request_frame());
        player.on_refresh();
        assert_approx_eq!(player.time(), 0.5);
        assert!(player.frame_pending());
    }

    #[test]
    fn halts_exactly_at_end() {
        let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 2.2), params());
        let mut last = player.time();
        let mut frames = 0;
        while player.on_refresh() {
            assert!(player.time() >= last);
            last = player.time();
            frames += 1;
        }
        assert_eq!(frames, 5);
        assert_eq!(player.time(), 2.2);
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.frame_pending());
        assert!(!player.on_refresh());
    }

    #[test]
    fn scrub_pauses_then_resumes() {
        let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 10.0), params());
        player.on_refresh();
        player.scrub(4.0);
        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(player.time(), 4.0);

        // The pending frame is consumed without advancing
        player.clock().advance(FRAME);
        assert!(!player.on_refresh());
        assert_eq!(player.time(), 4.0);

        player.clock().advance(0.1);
        assert!(!player.on_refresh());
        assert_eq!(player.state(), PlaybackState::Paused);

        player.clock().advance(0.1);
        assert!(player.on_refresh());
        assert_eq!(player.state(), PlaybackState::AutoPlaying);
        assert_approx_eq!(player.time(), 4.5);
    }

    #[test]
    fn each_scrub_restarts_the_delay() {
        let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 10.0), params());
        player.scrub(1.0);
        player.clock().advance(0.1);
        player.on_refresh();
        player.scrub(2.0);
        player.clock().advance(0.1);
        assert!(!player.on_refresh());
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(player.resume_pending());

        player.clock().advance(0.1);
        assert!(player.on_refresh());
        assert_approx_eq!(player.time(), 2.5);
    }

    #[test]
    fn scrub_to_end_stays_paused() {
        let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 10.0), params());
        player.scrub(50.0);
        assert_eq!(player.time(), 10.0);
        player.clock().advance(1.0);
        assert!(!player.on_refresh());
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.resume_pending());
    }

    #[test]
    fn scrub_before_start_is_clamped() {
        let mut player = Player::new(ManualClock::new(), Interval::new(420.0, 480.0), params());
        player.scrub(0.0);
        assert_eq!(player.time(), 420.0);
    }

    #[test]
    fn bad_time_step_still_moves_forward() {
        for time_step in [-1.0, 0.0, f64::INFINITY] {
            let params = PlayerParams {
                time_step,
                resume_delay: 0.15,
            };
            let mut player = Player::new(ManualClock::new(), Interval::new(0.0, 0.0175), params);
            let mut frames = 0;
            while player.on_refresh() {
                assert!(player.time() >= 0.0);
                frames += 1;
                assert!(frames < 100, "never finished with step {}", time_step);
            }
            assert_eq!(frames, 4);
            assert_eq!(player.time(), 0.0175);
            assert_eq!(player.state(), PlaybackState::Paused);
        }
    }

    #[test]
    fn empty_domain_finishes_immediately() {
        let mut player = Player::new(ManualClock::new(), Interval::new(420.0, 420.0), params());
        assert!(player.on_refresh());
        assert_eq!(player.time(), 420.0);
        assert_eq!(player.state(), PlaybackState::Paused);
    }
}

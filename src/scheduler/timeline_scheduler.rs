//! Transport-controlled conversion of wall-clock ticks into timeline time

use tracing::{debug, trace, warn};

use crate::config::TimelineConfig;
use crate::listener::SharedListener;
use crate::scheduler::transport::{PlayDirection, StepMode};
use crate::tick::{FrameTicker, TickHandle, TickSource};

/// Converts wall-clock ticks into a bounded, directional, speed-scaled
/// timeline position and notifies registered listeners.
///
/// The scheduler owns no clock and never blocks. An injected [`TickSource`]
/// arms at most one pending tick at a time; the host delivers each armed
/// tick by calling [`tick`](Self::tick) with the current wall-clock time in
/// milliseconds, and the scheduler re-arms while it is running.
pub struct TimelineScheduler {
    config: TimelineConfig,
    /// True exactly while a tick request is armed
    running: bool,
    speed: f64,
    direction: PlayDirection,
    step_mode: StepMode,
    /// Virtual timeline position in milliseconds
    elapsed_ms: f64,
    /// Wall-clock time of the last measured tick; 0.0 means none yet
    previous_tick_ms: f64,
    /// Wall-clock delta measured by the last tick
    time_since_last_tick_ms: f64,
    listeners: Vec<SharedListener>,
    tick_source: Box<dyn TickSource>,
    pending_tick: Option<TickHandle>,
}

impl TimelineScheduler {
    /// Create a scheduler with the default configuration and a [`FrameTicker`]
    pub fn new() -> Self {
        Self::with_config(TimelineConfig::default())
    }

    /// Create a scheduler with the given configuration and a [`FrameTicker`]
    pub fn with_config(config: TimelineConfig) -> Self {
        Self::with_tick_source(config, Box::new(FrameTicker::new()))
    }

    /// Create a scheduler with an injected tick source.
    ///
    /// The configuration is taken as-is; hand-built values should be checked
    /// with [`TimelineConfig::validate`] first. The initial rate is normal
    /// speed clamped into the configured range.
    pub fn with_tick_source(config: TimelineConfig, tick_source: Box<dyn TickSource>) -> Self {
        if let Err(error) = config.validate() {
            warn!(%error, "timeline config failed validation; clamps will misbehave");
        }
        let speed = config.clamp_speed(1.0);
        Self {
            config,
            running: false,
            speed,
            direction: PlayDirection::Forward,
            step_mode: StepMode::Measured,
            elapsed_ms: 0.0,
            previous_tick_ms: 0.0,
            time_since_last_tick_ms: 0.0,
            listeners: Vec::new(),
            tick_source,
            pending_tick: None,
        }
    }

    /// Register a listener. Notification order follows registration order;
    /// the same listener may be registered more than once.
    pub fn add_listener(&mut self, listener: SharedListener) {
        self.listeners.push(listener);
        debug!(listeners = self.listeners.len(), "listener registered");
    }

    /// Register several listeners, preserving the given order
    pub fn add_listeners(&mut self, listeners: impl IntoIterator<Item = SharedListener>) {
        for listener in listeners {
            self.add_listener(listener);
        }
    }

    /// Number of registered listeners
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Begin continuous forward playback, resetting the rate to normal.
    /// The reset is clamped into the configured range.
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
        self.step_mode = StepMode::Measured;
        self.set_speed(1.0);
        debug!("transport: play");
        self.start();
    }

    /// Begin continuous reverse playback, resetting the rate to normal.
    /// The reset is clamped into the configured range.
    pub fn play_backwards(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.step_mode = StepMode::Measured;
        self.set_speed(1.0);
        debug!("transport: play backwards");
        self.start();
    }

    /// Advance the timeline by a fixed amount per tick, ignoring wall-clock
    /// time and playback rate
    pub fn fast_forward(&mut self) {
        self.direction = PlayDirection::Forward;
        self.step_mode = StepMode::Fixed(self.config.fast_forward_ms);
        debug!(fixed_ms = self.config.fast_forward_ms, "transport: fast forward");
        self.start();
    }

    /// Rewind the timeline by a fixed amount per tick, ignoring wall-clock
    /// time and playback rate
    pub fn rewind(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.step_mode = StepMode::Fixed(self.config.fast_forward_ms);
        debug!(fixed_ms = self.config.fast_forward_ms, "transport: rewind");
        self.start();
    }

    /// Raise the playback rate by one increment
    pub fn speed_up(&mut self) {
        self.set_speed(self.speed + self.config.speed_increment);
    }

    /// Lower the playback rate by one increment
    pub fn slow_down(&mut self) {
        self.set_speed(self.speed - self.config.speed_increment);
    }

    /// Reset the playback rate to normal
    pub fn normal_speed(&mut self) {
        self.set_speed(1.0);
    }

    /// Set the playback rate, clamped to the configured range
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = self.config.clamp_speed(speed);
        debug!(speed = self.speed, "transport: speed");
    }

    /// Arm the tick source and begin ticking. No-op when already running.
    ///
    /// Tick measurement state is reset so the first measured tick after a
    /// (re)start yields a zero delta; the timeline position is untouched.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.previous_tick_ms = 0.0;
        self.time_since_last_tick_ms = 0.0;
        self.pending_tick = Some(self.tick_source.request_tick());
        debug!("scheduler started");
    }

    /// Cancel the pending tick and stop. No-op when already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(handle) = self.pending_tick.take() {
            self.tick_source.cancel_tick(handle);
        }
        debug!("scheduler stopped");
    }

    /// Toggle between running and stopped
    pub fn pause(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Process one tick at wall-clock time `now_ms`.
    ///
    /// Called by the host on behalf of the armed tick request. The delta is
    /// either the fixed per-tick magnitude or the measured wall-clock time
    /// scaled by the playback rate, signed by the direction. Listeners see
    /// the raw delta even when the timeline position saturates at a bound.
    ///
    /// A tick delivered after `stop()` is ignored; a cancelled handle should
    /// not fire, but a slow host may still deliver one.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.running {
            warn!(now_ms, "tick while stopped; ignoring");
            return;
        }
        // The armed request is spent by this invocation
        self.pending_tick = None;

        let delta_ms = match self.step_mode {
            StepMode::Fixed(ms) => ms * self.direction.signum(),
            StepMode::Measured => {
                let raw_ms = if self.previous_tick_ms == 0.0 {
                    // First tick since (re)start has nothing to measure against
                    0.0
                } else {
                    now_ms - self.previous_tick_ms
                };
                self.previous_tick_ms = now_ms;
                self.time_since_last_tick_ms = raw_ms;
                raw_ms * self.speed * self.direction.signum()
            }
        };

        trace!(now_ms, delta_ms, elapsed_ms = self.elapsed_ms, "tick");
        self.notify_update(delta_ms);
        self.elapsed_ms = self.config.clamp_elapsed(self.elapsed_ms + delta_ms);

        // Re-arm only if a listener did not stop the scheduler
        if self.running {
            self.pending_tick = Some(self.tick_source.request_tick());
        }
    }

    /// Jump the timeline by one step and notify the scroll capability
    pub fn step(&mut self, direction: PlayDirection) {
        self.scrub(self.config.step_ms * direction.signum());
    }

    /// Jump the timeline by one skip and notify the scroll capability
    pub fn skip(&mut self, direction: PlayDirection) {
        self.scrub(self.config.skip_ms * direction.signum());
    }

    /// Return the timeline to zero and notify the scroll capability
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        debug!("transport: restart");
        self.notify_scroll();
    }

    fn scrub(&mut self, delta_ms: f64) {
        self.elapsed_ms = self.config.clamp_elapsed(self.elapsed_ms + delta_ms);
        debug!(delta_ms, elapsed_ms = self.elapsed_ms, "transport: scrub");
        self.notify_scroll();
    }

    fn notify_update(&self, delta_ms: f64) {
        for listener in &self.listeners {
            listener.borrow_mut().update(delta_ms);
        }
    }

    fn notify_scroll(&self) {
        for listener in &self.listeners {
            listener.borrow_mut().scroll(self.elapsed_ms);
        }
    }

    /// Current timeline position in milliseconds
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Current playback-rate multiplier
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current playback direction
    #[inline]
    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Current step mode
    #[inline]
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    /// Whether the scheduler is ticking
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a tick request is outstanding
    #[inline]
    pub fn has_pending_tick(&self) -> bool {
        self.pending_tick.is_some()
    }

    /// Wall-clock delta measured by the most recent tick
    #[inline]
    pub fn time_since_last_tick_ms(&self) -> f64 {
        self.time_since_last_tick_ms
    }

    /// The active configuration
    #[inline]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }
}

impl Default for TimelineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

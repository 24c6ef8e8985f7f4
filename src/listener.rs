//! Listener capabilities notified by the timeline scheduler

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

/// Capabilities an object can expose to the timeline scheduler.
///
/// Both methods default to no-ops, so implementors opt into exactly the
/// notifications they care about: `update` for continuous playback,
/// `scroll` for discrete repositioning, or both.
pub trait TimelineListener {
    /// Continuous playback notification.
    ///
    /// `delta_ms` is the signed, speed-scaled virtual time advanced by one
    /// tick. It is negative when playing in reverse and is reported even
    /// when the timeline position saturates at a bound.
    fn update(&mut self, delta_ms: f64) {
        let _ = delta_ms;
    }

    /// Repositioning notification.
    ///
    /// `elapsed_ms` is the absolute timeline position after a step, skip,
    /// or restart.
    fn scroll(&mut self, elapsed_ms: f64) {
        let _ = elapsed_ms;
    }
}

/// Shared handle to a listener.
///
/// The engine is single-threaded; `Rc<RefCell<...>>` lets one object be
/// registered with the scheduler and the renderer at the same time.
pub type SharedListener = Rc<RefCell<dyn TimelineListener>>;

/// Listener that logs every notification
#[derive(Debug, Default)]
pub struct LoggingListener {
    name: String,
}

impl LoggingListener {
    /// Create a logging listener with a name to tag its output
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TimelineListener for LoggingListener {
    fn update(&mut self, delta_ms: f64) {
        debug!(listener = %self.name, delta_ms, "update");
    }

    fn scroll(&mut self, elapsed_ms: f64) {
        debug!(listener = %self.name, elapsed_ms, "scroll");
    }
}

/// A single notification observed by a [`RecordingListener`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// `update` with its signed delta in milliseconds
    Update(f64),
    /// `scroll` with the absolute position in milliseconds
    Scroll(f64),
}

/// Listener that records every notification for testing
#[derive(Debug, Default)]
pub struct RecordingListener {
    notifications: Vec<Notification>,
}

impl RecordingListener {
    /// Create a new recording listener
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, in the order they were received
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Number of notifications received
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    /// The deltas of `update` notifications, in order
    pub fn update_deltas(&self) -> Vec<f64> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Update(delta_ms) => Some(*delta_ms),
                Notification::Scroll(_) => None,
            })
            .collect()
    }

    /// The positions of `scroll` notifications, in order
    pub fn scroll_positions(&self) -> Vec<f64> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Scroll(elapsed_ms) => Some(*elapsed_ms),
                Notification::Update(_) => None,
            })
            .collect()
    }

    /// Clear recorded notifications
    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl TimelineListener for RecordingListener {
    fn update(&mut self, delta_ms: f64) {
        self.notifications.push(Notification::Update(delta_ms));
    }

    fn scroll(&mut self, elapsed_ms: f64) {
        self.notifications.push(Notification::Scroll(elapsed_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpdateOnly {
        total_ms: f64,
    }

    impl TimelineListener for UpdateOnly {
        fn update(&mut self, delta_ms: f64) {
            self.total_ms += delta_ms;
        }
    }

    #[test]
    fn test_default_capabilities_are_noops() {
        let mut listener = UpdateOnly { total_ms: 0.0 };
        listener.update(16.0);
        // The unimplemented capability falls back to the default no-op
        listener.scroll(500.0);
        assert_eq!(listener.total_ms, 16.0);
    }

    #[test]
    fn test_recording_listener_order() {
        let mut listener = RecordingListener::new();
        listener.update(16.0);
        listener.scroll(100.0);
        listener.update(-8.0);

        assert_eq!(
            listener.notifications(),
            &[
                Notification::Update(16.0),
                Notification::Scroll(100.0),
                Notification::Update(-8.0),
            ]
        );
        assert_eq!(listener.update_deltas(), vec![16.0, -8.0]);
        assert_eq!(listener.scroll_positions(), vec![100.0]);

        listener.clear();
        assert_eq!(listener.notification_count(), 0);
    }

    #[test]
    fn test_shared_listener_coercion() {
        let recorder = Rc::new(RefCell::new(RecordingListener::new()));
        let shared: SharedListener = recorder.clone();

        shared.borrow_mut().update(5.0);
        assert_eq!(recorder.borrow().update_deltas(), vec![5.0]);
    }
}

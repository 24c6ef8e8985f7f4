//! Tick scheduling port between the timeline scheduler and its host.
//!
//! The scheduler never sleeps or spins on its own. When it needs another
//! wall-clock callback it asks an injected [`TickSource`] to arm exactly one;
//! the host later drives the scheduler with the current time and the request
//! is spent. [`FrameClock`] produces those timestamps on native and wasm
//! targets alike.

use std::cell::Cell;
use std::rc::Rc;

use instant::Instant;
use tracing::trace;

/// Opaque identifier for an armed tick request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Create a handle from its raw id (tick sources mint these)
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric id of this handle
    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Scheduling capability injected into the timeline scheduler.
///
/// A request arms a single future tick; the tick fires once and must be
/// re-requested for continuous playback. Cancelling a pending handle
/// guarantees it never fires.
pub trait TickSource {
    /// Arm a single future tick and return its handle
    fn request_tick(&mut self) -> TickHandle;

    /// Disarm a previously requested tick
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Default tick source for hosts that drive frames themselves.
///
/// Pure bookkeeping: remembers the most recently armed handle and counts
/// requests and cancellations. The handle slot is replaced when the
/// scheduler re-arms and cleared when it cancels; delivery itself is
/// observed by the scheduler, not the source.
#[derive(Debug, Default)]
pub struct FrameTicker {
    next_id: u64,
    armed: Option<TickHandle>,
    requests: u64,
    cancels: u64,
}

impl FrameTicker {
    /// Create a new frame ticker
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently armed handle, if it was not cancelled
    #[inline]
    pub fn armed(&self) -> Option<TickHandle> {
        self.armed
    }

    /// Whether an uncancelled handle is outstanding
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Total number of tick requests seen
    #[inline]
    pub fn request_count(&self) -> u64 {
        self.requests
    }

    /// Total number of cancellations seen
    #[inline]
    pub fn cancel_count(&self) -> u64 {
        self.cancels
    }
}

impl TickSource for FrameTicker {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        self.requests += 1;
        let handle = TickHandle(self.next_id);
        self.armed = Some(handle);
        trace!(handle = handle.id(), "tick armed");
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.cancels += 1;
        if self.armed == Some(handle) {
            self.armed = None;
            trace!(handle = handle.id(), "tick cancelled");
        }
    }
}

/// Shared view into a [`ManualTickSource`]'s bookkeeping.
///
/// Cloneable, so it stays readable after the source moves behind the
/// scheduler's `Box<dyn TickSource>` boundary.
#[derive(Debug, Clone, Default)]
pub struct TickProbe {
    requests: Rc<Cell<u64>>,
    cancels: Rc<Cell<u64>>,
    armed: Rc<Cell<Option<TickHandle>>>,
}

impl TickProbe {
    /// Total number of tick requests
    #[inline]
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }

    /// Total number of cancellations
    #[inline]
    pub fn cancels(&self) -> u64 {
        self.cancels.get()
    }

    /// Most recently armed handle, if it was not cancelled
    #[inline]
    pub fn armed(&self) -> Option<TickHandle> {
        self.armed.get()
    }
}

/// Deterministic tick source for tests and headless hosts.
///
/// Never schedules anything by itself; the caller delivers ticks at times of
/// its choosing and uses the shared [`TickProbe`] to observe arming behavior
/// from outside the scheduler.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    next_id: u64,
    probe: TickProbe,
}

impl ManualTickSource {
    /// Create a source together with a probe observing it
    pub fn new() -> (Self, TickProbe) {
        let source = Self::default();
        let probe = source.probe.clone();
        (source, probe)
    }
}

impl TickSource for ManualTickSource {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.probe.requests.set(self.probe.requests.get() + 1);
        self.probe.armed.set(Some(handle));
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.probe.cancels.set(self.probe.cancels.get() + 1);
        if self.probe.armed.get() == Some(handle) {
            self.probe.armed.set(None);
        }
    }
}

/// Monotonic millisecond clock for producing tick timestamps.
///
/// Backed by `instant::Instant`, which falls back to `performance.now()` on
/// wasm targets.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    /// Start a clock at the current instant
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//! Timeline Engine
//!
//! A minimal real-time animation engine: a transport-controlled timeline
//! scheduler converts wall-clock ticks into a bounded, directional,
//! speed-scaled elapsed value and notifies listeners, while a fixed-cadence
//! renderer repaints drawable objects on an independent clock.
//!
//! The scheduler owns no clock and never blocks. Hosts inject a
//! [`TickSource`] (or keep the default bookkeeping one), deliver armed ticks
//! with wall-clock timestamps, and wire entities in through the
//! [`TimelineEngine`] façade:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use timeline_engine::{
//!     DrawSurface, PlayDirection, Renderable, TimelineEngine, TimelineListener,
//! };
//!
//! struct Console;
//!
//! impl DrawSurface for Console {
//!     fn clear(&mut self) {}
//! }
//!
//! #[derive(Default)]
//! struct Dot {
//!     x: f64,
//! }
//!
//! impl TimelineListener for Dot {
//!     fn update(&mut self, delta_ms: f64) {
//!         self.x += delta_ms * 0.01;
//!     }
//! }
//!
//! impl Renderable for Dot {
//!     fn render(&mut self, _surface: &mut dyn DrawSurface) {}
//! }
//!
//! let mut engine = TimelineEngine::new(Box::new(Console));
//! let dot = Rc::new(RefCell::new(Dot::default()));
//! engine.add(dot.clone());
//!
//! engine.play();
//! engine.advance(1_000.0); // first tick measures nothing
//! engine.advance(1_016.0);
//! assert_eq!(engine.elapsed_ms(), 16.0);
//!
//! engine.step(PlayDirection::Forward);
//! assert_eq!(engine.elapsed_ms(), 36.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod listener;
pub mod renderer;
pub mod scheduler;
pub mod tick;

// Re-export common types for convenience
pub use config::{EngineConfig, RendererConfig, TimelineConfig};
pub use engine::TimelineEngine;
pub use error::TimelineError;
pub use listener::{
    LoggingListener, Notification, RecordingListener, SharedListener, TimelineListener,
};
pub use renderer::{DrawSurface, FrameInterval, Renderable, Renderer, SharedRenderable};
pub use scheduler::{PlayDirection, StepMode, TimelineScheduler};
pub use tick::{FrameClock, FrameTicker, ManualTickSource, TickHandle, TickProbe, TickSource};

/// Timeline engine result type
pub type Result<T> = std::result::Result<T, TimelineError>;

//! Fixed-cadence repainting of drawable objects

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::config::RendererConfig;

/// Drawing surface capability.
///
/// The engine never inspects the surface beyond wiping it before a repaint;
/// hosts bring whatever canvas, terminal, or buffer they render to.
pub trait DrawSurface {
    /// Wipe the surface in preparation for a repaint
    fn clear(&mut self);
}

/// Capability of objects that can draw themselves onto a surface
pub trait Renderable {
    /// Draw this object onto the surface
    fn render(&mut self, surface: &mut dyn DrawSurface);
}

/// Shared handle to a renderable.
///
/// The engine is single-threaded; `Rc<RefCell<...>>` lets one object be
/// registered with the renderer and the scheduler at the same time.
pub type SharedRenderable = Rc<RefCell<dyn Renderable>>;

/// Owned handle to a repeating repaint interval.
///
/// Created when the renderer starts and released when it stops, never held
/// globally. Tracks when the next repaint is due.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInterval {
    period_ms: f64,
    next_due_ms: f64,
}

impl FrameInterval {
    /// Arm an interval at `now_ms`; the first repaint is due one period later
    pub fn new(period_ms: f64, now_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    /// Period between repaints in milliseconds
    #[inline]
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Wall-clock time the next repaint is due
    #[inline]
    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    /// Consume the interval's due state at `now_ms`.
    ///
    /// Returns true and re-arms one period from `now_ms` when the repaint is
    /// due. However late the host is, at most one repaint becomes due per
    /// call; missed periods are skipped, not burst.
    pub fn fire_if_due(&mut self, now_ms: f64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms + self.period_ms;
        true
    }
}

/// Repaints every registered drawable at a fixed cadence.
///
/// The repaint clock is independent of the timeline scheduler: pausing the
/// timeline does not stop repainting and vice versa. Each repaint clears the
/// surface, then renders every drawable in registration order.
pub struct Renderer {
    config: RendererConfig,
    surface: Box<dyn DrawSurface>,
    renderables: Vec<SharedRenderable>,
    interval: Option<FrameInterval>,
}

impl Renderer {
    /// Create a renderer over the given surface at the default cadence
    pub fn new(surface: Box<dyn DrawSurface>) -> Self {
        Self::with_config(RendererConfig::default(), surface)
    }

    /// Create a renderer over the given surface with the given configuration.
    ///
    /// The configuration is taken as-is; hand-built values should be checked
    /// with [`RendererConfig::validate`] first. A zero FPS yields an infinite
    /// repaint period, so frames never come due.
    pub fn with_config(config: RendererConfig, surface: Box<dyn DrawSurface>) -> Self {
        if let Err(error) = config.validate() {
            warn!(%error, "renderer config failed validation; repaint cadence will misbehave");
        }
        Self {
            config,
            surface,
            renderables: Vec::new(),
            interval: None,
        }
    }

    /// Register a drawable. Repaint order follows registration order.
    pub fn add_renderable(&mut self, renderable: SharedRenderable) {
        self.renderables.push(renderable);
        debug!(renderables = self.renderables.len(), "renderable registered");
    }

    /// Register several drawables, preserving the given order
    pub fn add_renderables(&mut self, renderables: impl IntoIterator<Item = SharedRenderable>) {
        for renderable in renderables {
            self.add_renderable(renderable);
        }
    }

    /// Number of registered drawables
    #[inline]
    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }

    /// Arm the repaint interval at `now_ms`. No-op when already running.
    pub fn start(&mut self, now_ms: f64) {
        if self.interval.is_some() {
            return;
        }
        self.interval = Some(FrameInterval::new(self.config.frame_period_ms(), now_ms));
        debug!(fps = self.config.target_fps, "renderer started");
    }

    /// Release the repaint interval. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            debug!("renderer stopped");
        }
    }

    /// Toggle between running and stopped
    pub fn pause(&mut self, now_ms: f64) {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now_ms);
        }
    }

    /// Repaint once, unconditionally: clear the surface, then render every
    /// registered drawable in registration order
    pub fn render(&mut self) {
        self.surface.clear();
        for renderable in &self.renderables {
            renderable.borrow_mut().render(self.surface.as_mut());
        }
        trace!(renderables = self.renderables.len(), "repaint");
    }

    /// Repaint if the interval is due at `now_ms`.
    ///
    /// Returns whether a repaint happened. Does nothing while stopped.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        let due = match self.interval.as_mut() {
            Some(interval) => interval.fire_if_due(now_ms),
            None => false,
        };
        if due {
            self.render();
        }
        due
    }

    /// Whether the repaint interval is armed
    #[inline]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// The armed repaint interval, if any
    #[inline]
    pub fn interval(&self) -> Option<&FrameInterval> {
        self.interval.as_ref()
    }

    /// The active configuration
    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

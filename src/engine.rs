//! Engine façade composing the timeline scheduler and the renderer

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::EngineConfig;
use crate::listener::TimelineListener;
use crate::renderer::{DrawSurface, Renderable, Renderer};
use crate::scheduler::{PlayDirection, TimelineScheduler};
use crate::tick::TickSource;

/// The animation engine: one timeline scheduler driving update/scroll
/// notifications plus one fixed-cadence renderer repainting drawables.
///
/// The engine is pure composition. Entities registered through [`add`] are
/// handed to both components and see timeline notifications and repaints in
/// registration order; the two clocks stay independent, so pausing the
/// timeline does not stop repainting.
///
/// [`add`]: TimelineEngine::add
pub struct TimelineEngine {
    scheduler: TimelineScheduler,
    renderer: Renderer,
}

impl TimelineEngine {
    /// Create an engine over the given surface with default configuration
    pub fn new(surface: Box<dyn DrawSurface>) -> Self {
        Self::with_config(EngineConfig::default(), surface)
    }

    /// Create an engine over the given surface with the given configuration
    pub fn with_config(config: EngineConfig, surface: Box<dyn DrawSurface>) -> Self {
        Self {
            scheduler: TimelineScheduler::with_config(config.timeline),
            renderer: Renderer::with_config(config.renderer, surface),
        }
    }

    /// Create an engine with an injected tick source for the scheduler
    pub fn with_tick_source(
        config: EngineConfig,
        tick_source: Box<dyn TickSource>,
        surface: Box<dyn DrawSurface>,
    ) -> Self {
        Self {
            scheduler: TimelineScheduler::with_tick_source(config.timeline, tick_source),
            renderer: Renderer::with_config(config.renderer, surface),
        }
    }

    /// Register an entity with both the timeline and the renderer.
    ///
    /// The scheduler sees its listener capability, the renderer its drawable
    /// one. Registration order is preserved in both.
    pub fn add<E>(&mut self, entity: Rc<RefCell<E>>)
    where
        E: TimelineListener + Renderable + 'static,
    {
        self.scheduler.add_listener(entity.clone());
        self.renderer.add_renderable(entity);
    }

    /// Register several entities, preserving the given order
    pub fn add_all<E>(&mut self, entities: impl IntoIterator<Item = Rc<RefCell<E>>>)
    where
        E: TimelineListener + Renderable + 'static,
    {
        for entity in entities {
            self.add(entity);
        }
    }

    /// Start both clocks
    pub fn start(&mut self, now_ms: f64) {
        self.scheduler.start();
        self.renderer.start(now_ms);
    }

    /// Stop both clocks
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.renderer.stop();
    }

    /// Toggle both clocks between running and stopped
    pub fn pause(&mut self, now_ms: f64) {
        self.scheduler.pause();
        self.renderer.pause(now_ms);
    }

    /// Advance one host frame at wall-clock time `now_ms`: deliver the armed
    /// scheduler tick, if any, then give the renderer a repaint opportunity
    pub fn advance(&mut self, now_ms: f64) {
        if self.scheduler.has_pending_tick() {
            self.scheduler.tick(now_ms);
        }
        self.renderer.on_frame(now_ms);
    }

    /// Begin continuous forward playback at normal speed
    pub fn play(&mut self) {
        self.scheduler.play();
    }

    /// Begin continuous reverse playback at normal speed
    pub fn play_backwards(&mut self) {
        self.scheduler.play_backwards();
    }

    /// Advance the timeline by a fixed amount per tick
    pub fn fast_forward(&mut self) {
        self.scheduler.fast_forward();
    }

    /// Rewind the timeline by a fixed amount per tick
    pub fn rewind(&mut self) {
        self.scheduler.rewind();
    }

    /// Raise the playback rate by one increment
    pub fn speed_up(&mut self) {
        self.scheduler.speed_up();
    }

    /// Lower the playback rate by one increment
    pub fn slow_down(&mut self) {
        self.scheduler.slow_down();
    }

    /// Reset the playback rate to normal
    pub fn normal_speed(&mut self) {
        self.scheduler.normal_speed();
    }

    /// Set the playback rate, clamped to the configured range
    pub fn set_speed(&mut self, speed: f64) {
        self.scheduler.set_speed(speed);
    }

    /// Jump the timeline by one step and notify the scroll capability
    pub fn step(&mut self, direction: PlayDirection) {
        self.scheduler.step(direction);
    }

    /// Jump the timeline by one skip and notify the scroll capability
    pub fn skip(&mut self, direction: PlayDirection) {
        self.scheduler.skip(direction);
    }

    /// Return the timeline to zero and notify the scroll capability
    pub fn restart(&mut self) {
        self.scheduler.restart();
    }

    /// Current timeline position in milliseconds
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.scheduler.elapsed_ms()
    }

    /// The timeline scheduler
    #[inline]
    pub fn scheduler(&self) -> &TimelineScheduler {
        &self.scheduler
    }

    /// Mutable access to the timeline scheduler
    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut TimelineScheduler {
        &mut self.scheduler
    }

    /// The renderer
    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Mutable access to the renderer
    #[inline]
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}

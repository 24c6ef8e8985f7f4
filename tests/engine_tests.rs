use std::cell::RefCell;
use std::rc::Rc;

use timeline_engine::{
    DrawSurface, EngineConfig, ManualTickSource, PlayDirection, Renderable, RendererConfig,
    TickProbe, TimelineEngine, TimelineListener,
};

/// Shared call log so tests can observe ordering across the surface and
/// every registered entity
#[derive(Clone, Default)]
struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

struct LoggingSurface {
    log: CallLog,
}

impl DrawSurface for LoggingSurface {
    fn clear(&mut self) {
        self.log.push("clear");
    }
}

/// Entity exposing both capabilities, logging every call
struct Sprite {
    name: &'static str,
    log: CallLog,
    position_ms: f64,
}

impl Sprite {
    fn new(name: &'static str, log: CallLog) -> Self {
        Self {
            name,
            log,
            position_ms: 0.0,
        }
    }
}

impl TimelineListener for Sprite {
    fn update(&mut self, delta_ms: f64) {
        self.position_ms += delta_ms;
        self.log.push(format!("update {} {}", self.name, delta_ms));
    }

    fn scroll(&mut self, elapsed_ms: f64) {
        self.position_ms = elapsed_ms;
        self.log.push(format!("scroll {} {}", self.name, elapsed_ms));
    }
}

impl Renderable for Sprite {
    fn render(&mut self, _surface: &mut dyn DrawSurface) {
        self.log.push(format!("render {}", self.name));
    }
}

fn engine_with_probe() -> (TimelineEngine, TickProbe, CallLog) {
    let log = CallLog::default();
    let (source, probe) = ManualTickSource::new();
    let engine = TimelineEngine::with_tick_source(
        EngineConfig::default(),
        Box::new(source),
        Box::new(LoggingSurface { log: log.clone() }),
    );
    (engine, probe, log)
}

#[test]
fn test_entities_register_into_both_components() {
    let (mut engine, _probe, log) = engine_with_probe();
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));
    engine.add(Rc::new(RefCell::new(Sprite::new("b", log.clone()))));

    assert_eq!(engine.scheduler().listener_count(), 2);
    assert_eq!(engine.renderer().renderable_count(), 2);
}

#[test]
fn test_advance_ticks_then_repaints() {
    let (mut engine, _probe, log) = engine_with_probe();
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));
    engine.add(Rc::new(RefCell::new(Sprite::new("b", log.clone()))));

    engine.play();
    engine.start(1_000.0);
    engine.advance(1_000.0); // primes the measurement; repaint not due
    log.clear();

    engine.advance(1_020.0);

    // One frame: the tick's updates land before the repaint, and the
    // repaint clears before drawing in registration order
    assert_eq!(
        log.entries(),
        vec![
            "update a 20",
            "update b 20",
            "clear",
            "render a",
            "render b",
        ]
    );
    assert_eq!(engine.elapsed_ms(), 20.0);
}

#[test]
fn test_clocks_are_independent() {
    let (mut engine, _probe, log) = engine_with_probe();
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));

    // Timeline runs, renderer never started: updates without repaints
    engine.play();
    engine.advance(1_000.0);
    engine.advance(1_016.0);
    assert_eq!(
        log.entries(),
        vec!["update a 0", "update a 16"]
    );

    // Renderer runs, timeline stopped: repaints without updates
    engine.scheduler_mut().stop();
    engine.renderer_mut().start(1_016.0);
    log.clear();
    engine.advance(1_040.0);
    assert_eq!(log.entries(), vec!["clear", "render a"]);
}

#[test]
fn test_facade_arms_exactly_one_tick() {
    let (mut engine, probe, _log) = engine_with_probe();

    engine.play();
    engine.play();
    assert_eq!(probe.requests(), 1);

    engine.advance(1_000.0); // consumes and re-arms
    assert_eq!(probe.requests(), 2);

    engine.stop();
    assert_eq!(probe.cancels(), 1);
    assert!(!engine.scheduler().has_pending_tick());
}

#[test]
fn test_fixed_transport_through_facade() {
    let (mut engine, _probe, _log) = engine_with_probe();

    engine.fast_forward();
    engine.advance(1_000.0);
    engine.advance(1_001.0);
    assert_eq!(engine.elapsed_ms(), 200.0);

    engine.rewind();
    engine.advance(1_002.0);
    assert_eq!(engine.elapsed_ms(), 100.0);
}

#[test]
fn test_scrubs_reach_entities_without_repainting() {
    let (mut engine, _probe, log) = engine_with_probe();
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));

    engine.step(PlayDirection::Forward);
    engine.skip(PlayDirection::Forward);
    engine.restart();

    assert_eq!(
        log.entries(),
        vec!["scroll a 20", "scroll a 1020", "scroll a 0"]
    );
    assert_eq!(engine.elapsed_ms(), 0.0);
}

#[test]
fn test_engine_stop_silences_late_frames() {
    let (mut engine, _probe, log) = engine_with_probe();
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));

    engine.play();
    engine.start(1_000.0);
    engine.advance(1_000.0);
    engine.stop();
    log.clear();

    // Frames after stop produce neither updates nor repaints
    engine.advance(1_100.0);
    engine.advance(1_200.0);
    assert!(log.entries().is_empty());
}

#[test]
fn test_renderer_cadence_through_facade() {
    let log = CallLog::default();
    let config =
        EngineConfig::default().with_renderer(RendererConfig::default().with_target_fps(10.0));
    let mut engine =
        TimelineEngine::with_config(config, Box::new(LoggingSurface { log: log.clone() }));
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));

    engine.renderer_mut().start(0.0);

    // 10 fps means a 100 ms period
    engine.advance(50.0);
    assert!(log.entries().is_empty());

    engine.advance(100.0);
    assert_eq!(log.entries(), vec!["clear", "render a"]);

    // A long stall still yields a single repaint
    log.clear();
    engine.advance(1_000.0);
    assert_eq!(log.entries(), vec!["clear", "render a"]);
}

#[test]
fn test_manual_repaint_without_running() {
    let (mut engine, _probe, log) = engine_with_probe();
    engine.add(Rc::new(RefCell::new(Sprite::new("a", log.clone()))));

    // One-shot rendering works without either clock running
    engine.renderer_mut().render();
    assert_eq!(log.entries(), vec!["clear", "render a"]);
}

//! Console demo driving the engine in real time with a scripted transport.
//!
//! A slider tracks timeline time along a fixed track while the script plays,
//! changes speed, fast-forwards, rewinds, scrubs, and finally stops. Set
//! `RUST_LOG=timeline_engine=debug` to watch the transport transitions.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use timeline_engine::{
    DrawSurface, FrameClock, LoggingListener, PlayDirection, Renderable, TimelineEngine,
    TimelineListener,
};

const TRACK_WIDTH: usize = 60;

/// Terminal line the demo repaints in place
struct ConsoleSurface;

impl DrawSurface for ConsoleSurface {
    fn clear(&mut self) {
        print!("\r{}\r", " ".repeat(TRACK_WIDTH + 20));
    }
}

/// A marker sliding along a track as timeline time accumulates
struct Slider {
    position_ms: f64,
    track_ms: f64,
}

impl Slider {
    fn new(track_ms: f64) -> Self {
        Self {
            position_ms: 0.0,
            track_ms,
        }
    }
}

impl TimelineListener for Slider {
    fn update(&mut self, delta_ms: f64) {
        self.position_ms = (self.position_ms + delta_ms).clamp(0.0, self.track_ms);
    }

    fn scroll(&mut self, elapsed_ms: f64) {
        self.position_ms = elapsed_ms.min(self.track_ms);
    }
}

impl Renderable for Slider {
    fn render(&mut self, _surface: &mut dyn DrawSurface) {
        let filled = ((self.position_ms / self.track_ms) * TRACK_WIDTH as f64) as usize;
        let filled = filled.min(TRACK_WIDTH);
        print!(
            "\r[{}{}] {:7.0} ms",
            "=".repeat(filled),
            " ".repeat(TRACK_WIDTH - filled),
            self.position_ms
        );
        let _ = io::stdout().flush();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("timeline_engine=info")),
        )
        .init();

    let mut engine = TimelineEngine::new(Box::new(ConsoleSurface));
    engine.add(Rc::new(RefCell::new(Slider::new(10_000.0))));
    engine
        .scheduler_mut()
        .add_listener(Rc::new(RefCell::new(LoggingListener::new("slider"))));

    let clock = FrameClock::new();
    engine.start(clock.now_ms());
    engine.play();

    // Scripted transport: (wall-clock time it fires, label, action)
    let mut script: Vec<(f64, &str, Box<dyn FnMut(&mut TimelineEngine)>)> = vec![
        (1_000.0, "speed up x2", Box::new(|e| e.set_speed(2.0))),
        (2_000.0, "fast forward", Box::new(|e| e.fast_forward())),
        (2_500.0, "play", Box::new(|e| e.play())),
        (3_500.0, "rewind", Box::new(|e| e.rewind())),
        (
            4_000.0,
            "skip back",
            Box::new(|e| {
                e.play();
                e.skip(PlayDirection::Reverse);
            }),
        ),
        (5_000.0, "restart", Box::new(|e| e.restart())),
        (6_000.0, "stop", Box::new(|e| e.stop())),
    ];
    let mut next = 0;

    loop {
        let now_ms = clock.now_ms();
        if next < script.len() && now_ms >= script[next].0 {
            println!("\n-> {}", script[next].1);
            (script[next].2)(&mut engine);
            next += 1;
        }
        engine.advance(now_ms);
        if next >= script.len() && !engine.scheduler().is_running() {
            break;
        }
        thread::sleep(Duration::from_millis(4));
    }

    println!("\ndone at {:.0} ms of timeline time", engine.elapsed_ms());
}

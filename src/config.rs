//! Configuration for the timeline scheduler and draw dispatcher

use crate::TimelineError;
use serde::{Deserialize, Serialize};

/// Configuration for the timeline scheduler.
///
/// Defaults reproduce the engine's stock transport behavior; every bound and
/// increment can be tuned per engine instance. All magnitudes are in
/// milliseconds of virtual timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Lower clamp for the playback-rate multiplier
    pub min_speed: f64,
    /// Upper clamp for the playback-rate multiplier
    pub max_speed: f64,
    /// Amount added/removed by `speed_up`/`slow_down`
    pub speed_increment: f64,
    /// Upper clamp for the virtual timeline position (lower clamp is zero)
    pub max_elapsed_ms: f64,
    /// Scrub distance of a single `step`
    pub step_ms: f64,
    /// Scrub distance of a single `skip`
    pub skip_ms: f64,
    /// Constant per-tick magnitude used by `fast_forward`/`rewind`
    pub fast_forward_ms: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            min_speed: 0.1,
            max_speed: 5.0,
            speed_increment: 0.1,
            max_elapsed_ms: 300_000.0,
            step_ms: 20.0,
            skip_ms: 1_000.0,
            fast_forward_ms: 100.0,
        }
    }
}

impl TimelineConfig {
    /// Parse a configuration from JSON. Missing fields fall back to their
    /// defaults; the result is validated before being returned.
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.min_speed <= 0.0 || !self.min_speed.is_finite() {
            return Err(TimelineError::invalid_config(
                "Minimum speed must be positive and finite",
            ));
        }

        if self.max_speed < self.min_speed || !self.max_speed.is_finite() {
            return Err(TimelineError::invalid_config(
                "Maximum speed must be finite and at least the minimum speed",
            ));
        }

        if self.speed_increment <= 0.0 || !self.speed_increment.is_finite() {
            return Err(TimelineError::invalid_config(
                "Speed increment must be positive and finite",
            ));
        }

        if self.max_elapsed_ms <= 0.0 || !self.max_elapsed_ms.is_finite() {
            return Err(TimelineError::invalid_config(
                "Maximum elapsed time must be positive and finite",
            ));
        }

        if self.step_ms <= 0.0 || self.skip_ms <= 0.0 || self.fast_forward_ms <= 0.0 {
            return Err(TimelineError::invalid_config(
                "Step, skip, and fast-forward magnitudes must be positive",
            ));
        }

        Ok(())
    }

    /// Clamp a playback-rate multiplier into the configured range
    #[inline]
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.clamp(self.min_speed, self.max_speed)
    }

    /// Clamp a timeline position into the configured range
    #[inline]
    pub fn clamp_elapsed(&self, elapsed_ms: f64) -> f64 {
        elapsed_ms.clamp(0.0, self.max_elapsed_ms)
    }

    /// Set the speed clamp range
    #[inline]
    pub fn with_speed_range(mut self, min: f64, max: f64) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Set the speed increment
    #[inline]
    pub fn with_speed_increment(mut self, increment: f64) -> Self {
        self.speed_increment = increment;
        self
    }

    /// Set the maximum timeline position
    #[inline]
    pub fn with_max_elapsed_ms(mut self, max_elapsed_ms: f64) -> Self {
        self.max_elapsed_ms = max_elapsed_ms;
        self
    }

    /// Set the scrub distances
    #[inline]
    pub fn with_scrub_distances(mut self, step_ms: f64, skip_ms: f64) -> Self {
        self.step_ms = step_ms;
        self.skip_ms = skip_ms;
        self
    }

    /// Set the fast-forward/rewind per-tick magnitude
    #[inline]
    pub fn with_fast_forward_ms(mut self, fast_forward_ms: f64) -> Self {
        self.fast_forward_ms = fast_forward_ms;
        self
    }
}

/// Configuration for the fixed-cadence draw dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Repaint cadence in frames per second
    pub target_fps: f64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self { target_fps: 60.0 }
    }
}

impl RendererConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.target_fps <= 0.0 || !self.target_fps.is_finite() {
            return Err(TimelineError::invalid_config(
                "Target FPS must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Repaint period in milliseconds
    #[inline]
    pub fn frame_period_ms(&self) -> f64 {
        1_000.0 / self.target_fps
    }

    /// Set the repaint cadence
    #[inline]
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        self.target_fps = fps;
        self
    }
}

/// Top-level configuration combining both clocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Timeline scheduler configuration
    pub timeline: TimelineConfig,
    /// Draw dispatcher configuration
    pub renderer: RendererConfig,
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields fall back to their
    /// defaults; the result is validated before being returned.
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TimelineError> {
        self.timeline.validate()?;
        self.renderer.validate()
    }

    /// Set the timeline scheduler configuration
    #[inline]
    pub fn with_timeline(mut self, timeline: TimelineConfig) -> Self {
        self.timeline = timeline;
        self
    }

    /// Set the draw dispatcher configuration
    #[inline]
    pub fn with_renderer(mut self, renderer: RendererConfig) -> Self {
        self.renderer = renderer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimelineConfig::default();
        assert_eq!(config.min_speed, 0.1);
        assert_eq!(config.max_speed, 5.0);
        assert_eq!(config.speed_increment, 0.1);
        assert_eq!(config.max_elapsed_ms, 300_000.0);
        assert_eq!(config.step_ms, 20.0);
        assert_eq!(config.skip_ms, 1_000.0);
        assert_eq!(config.fast_forward_ms, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = TimelineConfig::default()
            .with_speed_range(0.5, 2.0)
            .with_speed_increment(0.25)
            .with_max_elapsed_ms(60_000.0)
            .with_scrub_distances(10.0, 500.0)
            .with_fast_forward_ms(50.0);

        assert_eq!(config.min_speed, 0.5);
        assert_eq!(config.max_speed, 2.0);
        assert_eq!(config.speed_increment, 0.25);
        assert_eq!(config.max_elapsed_ms, 60_000.0);
        assert_eq!(config.step_ms, 10.0);
        assert_eq!(config.skip_ms, 500.0);
        assert_eq!(config.fast_forward_ms, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TimelineConfig::default();
        assert!(config.validate().is_ok());

        config.min_speed = 0.0;
        assert!(config.validate().is_err());

        config.min_speed = 2.0;
        config.max_speed = 1.0; // below the minimum
        assert!(config.validate().is_err());

        let mut config = TimelineConfig::default();
        config.max_elapsed_ms = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = TimelineConfig::default();
        config.step_ms = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamping_helpers() {
        let config = TimelineConfig::default();
        assert_eq!(config.clamp_speed(10.0), 5.0);
        assert_eq!(config.clamp_speed(0.01), 0.1);
        assert_eq!(config.clamp_speed(1.0), 1.0);

        assert_eq!(config.clamp_elapsed(-5.0), 0.0);
        assert_eq!(config.clamp_elapsed(400_000.0), 300_000.0);
        assert_eq!(config.clamp_elapsed(12.5), 12.5);
    }

    #[test]
    fn test_from_json_partial() {
        let config = TimelineConfig::from_json(r#"{ "max_speed": 3.0 }"#).unwrap();
        assert_eq!(config.max_speed, 3.0);
        // Everything else keeps its default
        assert_eq!(config.min_speed, 0.1);
        assert_eq!(config.step_ms, 20.0);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(TimelineConfig::from_json("not json").is_err());
        // Parses but fails validation
        assert!(TimelineConfig::from_json(r#"{ "min_speed": -1.0 }"#).is_err());
    }

    #[test]
    fn test_renderer_config() {
        let config = RendererConfig::default();
        assert_eq!(config.target_fps, 60.0);
        assert!((config.frame_period_ms() - 16.666_666).abs() < 1e-3);
        assert!(config.validate().is_ok());

        let config = config.with_target_fps(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_config() {
        let config = EngineConfig::default();
        assert_eq!(config.timeline, TimelineConfig::default());
        assert_eq!(config.renderer, RendererConfig::default());
        assert!(config.validate().is_ok());

        let config =
            EngineConfig::from_json(r#"{ "renderer": { "target_fps": 30.0 } }"#).unwrap();
        assert_eq!(config.renderer.target_fps, 30.0);
        assert_eq!(config.timeline.max_speed, 5.0);

        let config = EngineConfig::default()
            .with_timeline(TimelineConfig::default().with_speed_range(1.0, 2.0));
        assert_eq!(config.timeline.min_speed, 1.0);
        assert!(
            EngineConfig::from_json(r#"{ "timeline": { "min_speed": -1.0 } }"#).is_err()
        );
    }
}

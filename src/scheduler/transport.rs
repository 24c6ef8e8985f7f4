use serde::{Deserialize, Serialize};

/// Playback direction of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayDirection {
    /// Timeline position grows
    #[default]
    Forward,
    /// Timeline position shrinks
    Reverse,
}

impl PlayDirection {
    /// Get the name of this direction
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    /// Sign applied to per-tick deltas
    #[inline]
    pub fn signum(&self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }

    /// The opposite direction
    #[inline]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Check if this is forward playback
    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

impl From<&str> for PlayDirection {
    fn from(s: &str) -> Self {
        match s {
            "reverse" => Self::Reverse,
            _ => Self::Forward,
        }
    }
}

/// How a tick is converted into a timeline delta.
///
/// The two modes are mutually exclusive by construction: a tick either
/// measures wall-clock time or applies a fixed magnitude, never both.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum StepMode {
    /// Delta is the measured wall-clock time since the previous tick,
    /// scaled by the playback rate
    #[default]
    Measured,
    /// Delta is a constant magnitude in milliseconds, ignoring wall-clock
    /// time and playback rate
    Fixed(f64),
}

impl StepMode {
    /// Get the name of this mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Measured => "measured",
            Self::Fixed(_) => "fixed",
        }
    }

    /// Check if deltas are measured from the wall clock
    #[inline]
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured)
    }

    /// The fixed per-tick magnitude, if any
    #[inline]
    pub fn fixed_ms(&self) -> Option<f64> {
        match self {
            Self::Measured => None,
            Self::Fixed(ms) => Some(*ms),
        }
    }
}

//! System configuration parameters
//!
//! Alarm limits are compile-time constants; there is no runtime path to
//! change them.  Edit [`LIMITS`] and re-flash.  Everything is checked once
//! by [`SystemConfig::validate`] before the first sample is taken.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::measurement::Metric;

/// Alarm window for one metric.  `None` means "no limit on this side".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricLimits {
    pub min: Option<i16>,
    pub max: Option<i16>,
}

impl MetricLimits {
    /// No bound on either side; never alarms.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    pub const fn new(min: Option<i16>, max: Option<i16>) -> Self {
        Self { min, max }
    }

    /// `false` only when both bounds are set and the window is inverted.
    pub fn is_consistent(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Limits for both metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmLimits {
    pub temperature: MetricLimits,
    pub humidity: MetricLimits,
}

impl AlarmLimits {
    pub const fn for_metric(&self, metric: Metric) -> MetricLimits {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }
}

/// How the warning tone interacts with the tick handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneMode {
    /// `emit_tone` runs to completion inside the tick; display and
    /// animation stall for the tone duration.
    Blocking,
    /// The tone is switched on and a countdown switches it off on a later tick.
    Timed,
}

/// Cadence and presentation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Period of the display/animation tick (milliseconds).  One animation
    /// frame is drawn per tick.
    pub tick_interval_ms: u32,
    /// Ticks a screen stays up before the display step advances.
    pub display_dwell_ticks: u32,
    /// Pause between two sensor reads (milliseconds).
    pub sample_interval_ms: u32,
    /// Length of the alarm tone played with every warning screen.
    pub warning_tone_ms: u32,
    pub tone_mode: ToneMode,
    /// Full load-in/shift-out passes per animation cycle.
    pub animation_repetitions: u8,
    /// Matrix brightness, 0 (dim) – 15 (full).
    pub matrix_intensity: u8,
}

/// Core system configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub limits: AlarmLimits,
    pub timing: TimingConfig,
}

// --- Alarm limits (edit and re-flash) ---

pub const LIMITS: AlarmLimits = AlarmLimits {
    temperature: MetricLimits::new(Some(20), Some(30)), // °C
    humidity: MetricLimits::new(Some(20), Some(50)),    // %RH
};

// --- Timing ---

pub const TIMING: TimingConfig = TimingConfig {
    tick_interval_ms: 120,    // one matrix frame
    display_dwell_ticks: 35,  // ~4.2 s per screen
    sample_interval_ms: 2000, // DHT11 needs >= 1 s between reads
    warning_tone_ms: 2000,
    tone_mode: ToneMode::Timed,
    animation_repetitions: 1,
    matrix_intensity: 15,
};

pub const CONFIG: SystemConfig = SystemConfig {
    limits: LIMITS,
    timing: TIMING,
};

impl SystemConfig {
    /// Fail-fast check run once before sampling starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for metric in Metric::ALL {
            if !self.limits.for_metric(metric).is_consistent() {
                return Err(ConfigError::MinAboveMax(metric));
            }
        }
        if self.timing.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming("tick_interval_ms"));
        }
        if self.timing.display_dwell_ticks == 0 {
            return Err(ConfigError::InvalidTiming("display_dwell_ticks"));
        }
        if self.timing.animation_repetitions == 0 {
            return Err(ConfigError::InvalidTiming("animation_repetitions"));
        }
        if self.timing.matrix_intensity > 15 {
            return Err(ConfigError::InvalidTiming("matrix_intensity"));
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        CONFIG
    }
}

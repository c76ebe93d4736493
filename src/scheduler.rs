//! Display step scheduler.
//!
//! Cycles the LCD through five steps.  Alarm warnings take over the first
//! two slots; the rest show current values and lifetime extremes.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  step 0  TemperatureWarning ──(temp nominal)──▶ CurrentValues │
//! │  step 1  HumidityWarning    ──(hum nominal)───▶ CurrentValues │
//! │  step 2  CurrentValues                                        │
//! │  step 3  TemperatureHistory                                   │
//! │  step 4  HumidityHistory                                      │
//! │              │                                                │
//! │              └──── step = (step + 1) % 5 ────▶ step 0         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sensor and configuration faults override every step; the step counter
//! still advances underneath them.
//!
//! The scheduler only decides *what* to show.  The controller renders the
//! returned [`Screen`] and plays the tone.

use crate::alarm::{AlarmDirection, AlarmStatus, AnimationKind};
use crate::config::AlarmLimits;
use crate::error::ConfigError;
use crate::history::HistoryTracker;
use crate::measurement::{Measurement, Metric};
use crate::screens::Screen;

// ═══════════════════════════════════════════════════════════════
//  Snapshot of classified state
// ═══════════════════════════════════════════════════════════════

/// Immutable copy of everything the tick needs, taken inside one critical
/// section so both metrics are always from the same committed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub latest: Option<Measurement>,
    pub status: AlarmStatus,
    pub history: HistoryTracker,
    pub limits: AlarmLimits,
    /// Latched by a failed read, cleared by the next accepted one.
    pub sensor_fault: bool,
    /// Set when startup validation failed; never cleared.
    pub config_fault: Option<ConfigError>,
}

impl Snapshot {
    /// Bitmap the next animation cycle should use.
    pub fn animation(&self) -> AnimationKind {
        if self.config_fault.is_some() || self.sensor_fault {
            AnimationKind::Warning
        } else {
            self.status.animation()
        }
    }

    fn warning(&self, metric: Metric) -> Option<Screen> {
        let direction = self.status.direction(metric);
        let limits = self.limits.for_metric(metric);
        let limit = match direction {
            AlarmDirection::Nominal => return None,
            AlarmDirection::AboveMax => limits.max,
            AlarmDirection::BelowMin => limits.min,
        };
        Some(Screen::Warning {
            metric,
            direction,
            limit,
        })
    }
}

// ═══════════════════════════════════════════════════════════════
//  Display steps
// ═══════════════════════════════════════════════════════════════

/// Number of display steps in one rotation.
pub const DISPLAY_STEPS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStep {
    TemperatureWarning,
    HumidityWarning,
    CurrentValues,
    TemperatureHistory,
    HumidityHistory,
}

impl DisplayStep {
    pub const fn from_index(index: u8) -> Self {
        match index % DISPLAY_STEPS {
            0 => Self::TemperatureWarning,
            1 => Self::HumidityWarning,
            2 => Self::CurrentValues,
            3 => Self::TemperatureHistory,
            _ => Self::HumidityHistory,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct DisplayScheduler {
    step: u8,
}

impl DisplayScheduler {
    pub const fn new() -> Self {
        Self { step: 0 }
    }

    /// Step the next call to [`next_screen`](Self::next_screen) will evaluate.
    pub fn step(&self) -> DisplayStep {
        DisplayStep::from_index(self.step)
    }

    /// Pick the screen for the current step, then advance the step.
    pub fn next_screen(&mut self, snapshot: &Snapshot) -> Screen {
        let screen = Self::select(self.step(), snapshot);
        self.step = (self.step + 1) % DISPLAY_STEPS;
        screen
    }

    fn select(step: DisplayStep, s: &Snapshot) -> Screen {
        if let Some(err) = s.config_fault {
            return Screen::ConfigFault(err);
        }
        if s.sensor_fault {
            return Screen::SensorFault;
        }
        let warning = match step {
            DisplayStep::TemperatureWarning => s.warning(Metric::Temperature),
            DisplayStep::HumidityWarning => s.warning(Metric::Humidity),
            _ => None,
        };
        if let Some(screen) = warning {
            return screen;
        }
        match step {
            DisplayStep::TemperatureHistory => Screen::History {
                metric: Metric::Temperature,
                extremes: s.history.extremes(Metric::Temperature),
            },
            DisplayStep::HumidityHistory => Screen::History {
                metric: Metric::Humidity,
                extremes: s.history.extremes(Metric::Humidity),
            },
            _ => Screen::CurrentValues(s.latest),
        }
    }
}

impl Default for DisplayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

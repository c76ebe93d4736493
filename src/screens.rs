//! LCD screen contents.
//!
//! A [`Screen`] is what the display scheduler decided to show; [`Screen::render`]
//! turns it into two fixed-width lines.  Rendering is pure so the exact
//! text can be asserted on the host.

use core::fmt::{self, Write};

use crate::alarm::AlarmDirection;
use crate::app::ports::TEXT_COLUMNS;
use crate::error::ConfigError;
use crate::history::Extremes;
use crate::measurement::{Measurement, Metric};

/// One display line.  Writes past [`TEXT_COLUMNS`] are dropped, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line(heapless::String<TEXT_COLUMNS>);

impl Line {
    pub fn new() -> Self {
        Self(heapless::String::new())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Write for Line {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        let mut line = Self::new();
        let _ = line.write_str(s);
        line
    }
}

/// Integer that prints as `--` when absent.  Honors width/alignment.
struct Reading(Option<i16>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(&v, f),
            None => f.pad("--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Latest accepted temperature and humidity.
    CurrentValues(Option<Measurement>),
    /// Lifetime extremes of one metric.
    History {
        metric: Metric,
        extremes: Option<Extremes>,
    },
    /// A metric is outside its window; `limit` is the breached bound.
    Warning {
        metric: Metric,
        direction: AlarmDirection,
        limit: Option<i16>,
    },
    /// The last sensor read failed.
    SensorFault,
    /// Startup validation failed; the controller is halted.
    ConfigFault(ConfigError),
}

impl Screen {
    /// Warning screens sound the alarm tone when shown.
    pub fn sounds_alarm(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }

    pub fn render(&self) -> [Line; 2] {
        let mut top = Line::new();
        let mut bottom = Line::new();
        // Line never fails a write; results are ignored.
        match *self {
            Self::CurrentValues(m) => {
                let _ = write!(
                    top,
                    "Temperature:{:>3}C",
                    Reading(m.map(|m| m.temperature))
                );
                let _ = write!(bottom, "Humidity:{:>6}%", Reading(m.map(|m| m.humidity)));
            }
            Self::History { metric, extremes } => {
                let _ = top.write_str(match metric {
                    Metric::Temperature => "Temp. history:",
                    Metric::Humidity => "Hum. history:",
                });
                let unit = metric.unit();
                let _ = write!(
                    bottom,
                    "Min {}{unit} Max {}{unit}",
                    Reading(extremes.map(|e| e.min)),
                    Reading(extremes.map(|e| e.max)),
                );
            }
            Self::Warning {
                metric,
                direction,
                limit,
            } => {
                let (word, side) = match direction {
                    AlarmDirection::BelowMin => ("LOW", "Under"),
                    _ => ("HIGH", "Over"),
                };
                let _ = write!(top, "{word} {}", metric.label());
                // Wide limits fall back to a shorter suffix.
                for suffix in [" limit!", " lim!", "!"] {
                    let mut line = Line::new();
                    let _ = write!(line, "{side} {}{}{suffix}", Reading(limit), metric.unit());
                    if line.as_str().ends_with(suffix) {
                        bottom = line;
                        break;
                    }
                }
            }
            Self::SensorFault => {
                let _ = top.write_str("Input Error:");
                let _ = bottom.write_str("Bad sensor data.");
            }
            Self::ConfigFault(err) => {
                let _ = top.write_str("Config error:");
                let _ = bottom.write_str(match err {
                    ConfigError::MinAboveMax(_) => "Limit MIN > MAX",
                    ConfigError::InvalidTiming(_) => "Bad timing value",
                });
            }
        }
        [top, bottom]
    }
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, stderr in simulation).
//! One line per event, prefixed with a fixed tag so the serial stream can
//! be grepped.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | sampling");
            }
            AppEvent::ConfigRejected(err) => {
                error!("CONFIG | rejected: {err} | halted");
            }
            AppEvent::MeasurementAccepted(m) => {
                info!("SAMPLE | T={}\u{00b0}C | RH={}%", m.temperature, m.humidity);
            }
            AppEvent::MeasurementRejected {
                candidate,
                reference,
            } => match reference {
                Some(r) => debug!(
                    "REJECT | T={} RH={} | ref T={} RH={}",
                    candidate.temperature, candidate.humidity, r.temperature, r.humidity
                ),
                None => debug!(
                    "REJECT | T={} RH={}",
                    candidate.temperature, candidate.humidity
                ),
            },
            AppEvent::AlarmChanged(t) => {
                if t.to.is_alarm() {
                    warn!("ALARM | {} {:?} -> {:?}", t.metric, t.from, t.to);
                } else {
                    info!("ALARM | {} cleared", t.metric);
                }
            }
            AppEvent::SensorFault(err) => {
                warn!("SENSOR | read failed: {err}");
            }
            AppEvent::SensorRecovered => {
                info!("SENSOR | recovered");
            }
        }
    }
}

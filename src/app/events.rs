//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They never reach the
//! display; the LCD is driven by the tick handler alone.

use crate::alarm::AlarmTransition;
use crate::error::{ConfigError, SensorError};
use crate::measurement::Measurement;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Configuration passed validation; sampling is about to start.
    Started,

    /// Configuration failed validation; the controller is halted.
    ConfigRejected(ConfigError),

    /// A sample passed the plausibility filter and was classified.
    MeasurementAccepted(Measurement),

    /// A sample was dropped by the plausibility filter.
    MeasurementRejected {
        candidate: Measurement,
        reference: Option<Measurement>,
    },

    /// A metric entered, left, or switched its alarm state.
    AlarmChanged(AlarmTransition),

    /// The sensor could not be read; the error screen is latched.
    SensorFault(SensorError),

    /// The first accepted sample after a sensor fault.
    SensorRecovered,
}

//! Threshold classification and alarm status.
//!
//! [`classify`] is a pure function of one value and one limit window.
//! [`AlarmStatus`] holds the latest direction for each metric and derives
//! the matrix animation from them.  It runs once per accepted measurement,
//! inside the same critical section as the validator and history update,
//! so the tick handler never sees one metric classified and the other not.
//!
//! ## Alarm lifecycle
//!
//! 1. An accepted sample leaves the window for a metric.
//! 2. That metric's direction flips to `AboveMax`/`BelowMin`; the change is
//!    reported to the caller so it can be logged once.
//! 3. The animation selection becomes [`AnimationKind::Warning`].
//! 4. When every metric is back inside its window the selection returns
//!    to [`AnimationKind::Check`].

use crate::config::{AlarmLimits, MetricLimits};
use crate::measurement::{Measurement, Metric};

/// Where a value sits relative to its configured window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmDirection {
    #[default]
    Nominal,
    AboveMax,
    BelowMin,
}

impl AlarmDirection {
    pub const fn is_alarm(self) -> bool {
        !matches!(self, Self::Nominal)
    }
}

/// Classify `value` against `limits`.  Max is checked first.
pub fn classify(value: i16, limits: MetricLimits) -> AlarmDirection {
    match (limits.min, limits.max) {
        (_, Some(max)) if value > max => AlarmDirection::AboveMax,
        (Some(min), _) if value < min => AlarmDirection::BelowMin,
        _ => AlarmDirection::Nominal,
    }
}

/// Bitmap families the matrix can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// All metrics inside their windows.
    Check,
    /// A metric is out of bounds, the sensor is failing, or the config is bad.
    Warning,
    /// Nothing has been classified yet.
    Heart,
}

/// A direction change produced by [`AlarmStatus::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmTransition {
    pub metric: Metric,
    pub from: AlarmDirection,
    pub to: AlarmDirection,
}

/// Latest classification of both metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmStatus {
    temperature: AlarmDirection,
    humidity: AlarmDirection,
    classified: bool,
}

impl AlarmStatus {
    pub const fn new() -> Self {
        Self {
            temperature: AlarmDirection::Nominal,
            humidity: AlarmDirection::Nominal,
            classified: false,
        }
    }

    /// Re-classify both metrics from an accepted measurement.
    ///
    /// Returns the transitions (at most one per metric) so the caller can
    /// report alarms being raised or cleared.
    pub fn update(
        &mut self,
        m: &Measurement,
        limits: &AlarmLimits,
    ) -> heapless::Vec<AlarmTransition, 2> {
        let mut transitions = heapless::Vec::new();
        for metric in Metric::ALL {
            let to = classify(m.get(metric), limits.for_metric(metric));
            let slot = self.slot_mut(metric);
            let from = *slot;
            *slot = to;
            if from != to {
                // Capacity equals Metric::ALL.len(); push cannot fail.
                let _ = transitions.push(AlarmTransition { metric, from, to });
            }
        }
        self.classified = true;
        transitions
    }

    pub fn direction(&self, metric: Metric) -> AlarmDirection {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }

    /// True if **any** metric is outside its window.
    pub fn any_alarm(&self) -> bool {
        self.temperature.is_alarm() || self.humidity.is_alarm()
    }

    /// True once at least one measurement has been classified.
    pub fn is_classified(&self) -> bool {
        self.classified
    }

    /// Animation implied by the classification alone.
    pub fn animation(&self) -> AnimationKind {
        if !self.classified {
            AnimationKind::Heart
        } else if self.any_alarm() {
            AnimationKind::Warning
        } else {
            AnimationKind::Check
        }
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut AlarmDirection {
        match metric {
            Metric::Temperature => &mut self.temperature,
            Metric::Humidity => &mut self.humidity,
        }
    }
}

impl Default for AlarmStatus {
    fn default() -> Self {
        Self::new()
    }
}

//! Lifetime minimum/maximum per metric.

use crate::measurement::{Measurement, Metric};

/// Observed extremes of one metric.  Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes {
    pub min: i16,
    pub max: i16,
}

/// Running min/max that only ever widens.
///
/// Empty until the first accepted sample; the display shows `--` for an
/// empty record instead of a made-up sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryTracker {
    temperature: Option<Extremes>,
    humidity: Option<Extremes>,
}

impl HistoryTracker {
    pub const fn new() -> Self {
        Self {
            temperature: None,
            humidity: None,
        }
    }

    /// Widen the record for `metric` so it includes `value`.
    pub fn update(&mut self, metric: Metric, value: i16) {
        let slot = match metric {
            Metric::Temperature => &mut self.temperature,
            Metric::Humidity => &mut self.humidity,
        };
        *slot = Some(match *slot {
            None => Extremes {
                min: value,
                max: value,
            },
            Some(e) => Extremes {
                min: e.min.min(value),
                max: e.max.max(value),
            },
        });
    }

    /// Widen both metrics from an accepted measurement.
    pub fn record(&mut self, m: &Measurement) {
        for metric in Metric::ALL {
            self.update(metric, m.get(metric));
        }
    }

    pub fn extremes(&self, metric: Metric) -> Option<Extremes> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }
}

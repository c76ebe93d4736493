//! Plausibility filter for fresh sensor samples.
//!
//! Single-wire humidity sensors occasionally deliver a frame that passes
//! the checksum but carries garbage.  A real room cannot swing more than a
//! few units between two reads, so any sample whose temperature *or*
//! humidity moved by more than [`MAX_SAMPLE_DELTA`] from the last accepted
//! sample is dropped.  The very first sample has nothing to compare
//! against and is always taken as the reference.

use crate::measurement::{Measurement, Metric};

/// Largest accepted change per metric between two consecutive accepted samples.
pub const MAX_SAMPLE_DELTA: i32 = 5;

/// Number of samples accepted unconditionally after power-on.
const WARM_UP_SAMPLES: u32 = 1;

/// Delta filter with a one-sample warm-up.
#[derive(Debug, Clone)]
pub struct MeasurementValidator {
    previous_accepted: Option<Measurement>,
    sample_count: u32,
}

impl MeasurementValidator {
    pub const fn new() -> Self {
        Self {
            previous_accepted: None,
            sample_count: 0,
        }
    }

    /// Decide whether `candidate` is plausible.
    ///
    /// On acceptance both metric references are replaced together.  On
    /// rejection nothing changes.
    pub fn accept(&mut self, candidate: Measurement) -> bool {
        let previous = match self.previous_accepted {
            Some(prev) if self.sample_count >= WARM_UP_SAMPLES => prev,
            _ => {
                self.commit(candidate);
                return true;
            }
        };

        let plausible = Metric::ALL.iter().all(|&metric| {
            let delta = i32::from(candidate.get(metric)) - i32::from(previous.get(metric));
            delta.abs() <= MAX_SAMPLE_DELTA
        });

        if plausible {
            self.commit(candidate);
        }
        plausible
    }

    /// Last sample that passed the filter.
    pub fn reference(&self) -> Option<Measurement> {
        self.previous_accepted
    }

    /// How many samples have been accepted since power-on.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    fn commit(&mut self, candidate: Measurement) {
        self.previous_accepted = Some(candidate);
        self.sample_count = self.sample_count.saturating_add(1);
    }
}

impl Default for MeasurementValidator {
    fn default() -> Self {
        Self::new()
    }
}

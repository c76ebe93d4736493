//! Measurement value types shared by the validator, classifier, and history.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the two environmental quantities the controller watches.
///
/// Validator, classifier and history treat both metrics symmetrically;
/// only the display text and unit differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Air temperature in whole degrees Celsius.
    Temperature,
    /// Relative humidity in whole percent.
    Humidity,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Temperature, Metric::Humidity];

    /// Unit suffix shown on the character display.
    pub const fn unit(self) -> char {
        match self {
            Self::Temperature => 'C',
            Self::Humidity => '%',
        }
    }

    /// Upper-case name used on warning screens.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "TEMPERATURE",
            Self::Humidity => "HUMIDITY",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
        }
    }
}

/// A single successful sensor read.  Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Degrees Celsius.
    pub temperature: i16,
    /// Percent relative humidity.
    pub humidity: i16,
}

impl Measurement {
    pub const fn new(temperature: i16, humidity: i16) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    /// Value of the given metric.
    pub const fn get(&self, metric: Metric) -> i16 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }
}

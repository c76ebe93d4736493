//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (sensor, character LCD, LED matrix, buzzer, event sinks)
//! implement these traits.  The [`Controller`](super::service::Controller)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Output ports are infallible at the trait level: a display glitch must
//! not stop the alarm logic, so adapters log driver errors and carry on.

use crate::error::SensorError;
use crate::measurement::Measurement;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the sampling loop calls this once per iteration.
pub trait SensorPort {
    /// Acquire one temperature/humidity pair.  May block for the bus
    /// transaction (a few milliseconds for a DHT11).
    fn read_measurement(&mut self) -> Result<Measurement, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Text display port (driven adapter: domain → 16x2 LCD)
// ───────────────────────────────────────────────────────────────

/// Line on the two-line character display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Top,
    Bottom,
}

/// Characters per display line.
pub const TEXT_COLUMNS: usize = 16;

/// Two-line, fixed-width character output.
pub trait TextDisplayPort {
    /// Replace the whole line with `text`, padded or truncated to the
    /// display width.
    fn write_line(&mut self, row: Row, text: &str);

    /// Blank both lines.
    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Matrix port (driven adapter: domain → 8x8 LED matrix)
// ───────────────────────────────────────────────────────────────

/// Rows on the matrix; bit 7 is the leftmost column.
pub const MATRIX_ROWS: u8 = 8;

/// Single-bit-per-cell 8x8 matrix.
pub trait MatrixPort {
    /// Power up, disable digit decoding, set brightness (0–15) and blank
    /// every row.  Test mode is untouched.
    fn init(&mut self, intensity: u8);

    /// Light the bits of `bits` on row `row` (0–7).
    fn set_row(&mut self, row: u8, bits: u8);

    /// Bits currently shown on row `row`.
    fn get_row(&self, row: u8) -> u8;

    /// Enable or disable the all-LEDs-on lamp test.
    fn set_test_mode(&mut self, on: bool);

    /// Blank every row.
    fn clear(&mut self) {
        for row in 0..MATRIX_ROWS {
            self.set_row(row, 0);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tone port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

/// Fixed-frequency audible alarm.
pub trait TonePort {
    /// Sound the tone for `duration_ms` and return only when it has stopped.
    fn emit_tone(&mut self, duration_ms: u32);

    /// Start sounding until [`tone_off`](Self::tone_off).
    fn tone_on(&mut self);

    fn tone_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

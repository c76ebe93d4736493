//! Hardware adapter: binds the concrete drivers to the domain port traits.
//!
//! This is the only module that knows which chip sits behind each port.
//! Output drivers report [`DriverError`](crate::error::DriverError)s; the
//! ports are infallible, so failures are logged here as firmware
//! [`Error`]s and the controller carries on with its next tick.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{MatrixPort, Row, SensorPort, TextDisplayPort, TonePort};
use crate::drivers::lcd::Hd44780;
use crate::drivers::max7219::Max7219;
use crate::drivers::tone::Buzzer;
use crate::error::{Error, SensorError};
use crate::measurement::Measurement;
use crate::sensors::dht11::Dht11;

fn log_err<E: Into<Error>>(device: &str, res: Result<(), E>) {
    if let Err(e) = res {
        warn!("{device}: {}", e.into());
    }
}

// ── SensorPort ────────────────────────────────────────────────

impl<P, D> SensorPort for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        self.read()
    }
}

// ── TextDisplayPort ───────────────────────────────────────────

impl<P: OutputPin, D: DelayNs> TextDisplayPort for Hd44780<P, D> {
    fn write_line(&mut self, row: Row, text: &str) {
        log_err("lcd", Hd44780::write_line(self, row, text));
    }

    fn clear(&mut self) {
        log_err("lcd", Hd44780::clear(self));
    }
}

// ── MatrixPort ────────────────────────────────────────────────

impl<P: OutputPin> MatrixPort for Max7219<P> {
    fn init(&mut self, intensity: u8) {
        log_err("matrix", Max7219::init(self, intensity));
    }

    fn set_row(&mut self, row: u8, bits: u8) {
        log_err("matrix", Max7219::set_row(self, row, bits));
    }

    fn get_row(&self, row: u8) -> u8 {
        self.row(row)
    }

    fn set_test_mode(&mut self, on: bool) {
        log_err("matrix", self.display_test(on));
    }

    fn clear(&mut self) {
        log_err("matrix", Max7219::clear(self));
    }
}

// ── TonePort ──────────────────────────────────────────────────

impl<P: SetDutyCycle, D: DelayNs> TonePort for Buzzer<P, D> {
    fn emit_tone(&mut self, duration_ms: u32) {
        log_err("buzzer", self.beep(duration_ms));
    }

    fn tone_on(&mut self) {
        log_err("buzzer", self.start());
    }

    fn tone_off(&mut self) {
        log_err("buzzer", self.stop());
    }
}

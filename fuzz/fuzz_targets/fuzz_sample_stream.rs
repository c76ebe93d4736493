//! Fuzz target: `Controller::sample` / `Controller::tick`
//!
//! Interprets the input as a script of sensor reads and ticks and checks
//! after every step:
//! - No panics
//! - History extremes bracket every accepted value, `min <= max`
//! - The LCD never receives a line wider than 16 columns
//! - Matrix writes stay within rows 0..8
//!
//! cargo fuzz run fuzz_sample_stream

#![no_main]

use climawatch::app::events::AppEvent;
use climawatch::app::ports::{EventSink, MatrixPort, Row, SensorPort, TextDisplayPort, TonePort};
use climawatch::app::service::{Controller, SampleOutcome};
use climawatch::config::CONFIG;
use climawatch::error::SensorError;
use climawatch::measurement::{Measurement, Metric};
use libfuzzer_sys::fuzz_target;

struct Lcd;
impl TextDisplayPort for Lcd {
    fn write_line(&mut self, _row: Row, text: &str) {
        assert!(text.chars().count() <= 16);
    }
    fn clear(&mut self) {}
}

struct Matrix([u8; 8]);
impl MatrixPort for Matrix {
    fn init(&mut self, intensity: u8) {
        assert!(intensity <= 15);
    }
    fn set_row(&mut self, row: u8, bits: u8) {
        self.0[usize::from(row)] = bits;
    }
    fn get_row(&self, row: u8) -> u8 {
        self.0[usize::from(row)]
    }
    fn set_test_mode(&mut self, _on: bool) {}
}

struct Tone;
impl TonePort for Tone {
    fn emit_tone(&mut self, _duration_ms: u32) {}
    fn tone_on(&mut self) {}
    fn tone_off(&mut self) {}
}

struct Sink;
impl EventSink for Sink {
    fn emit(&mut self, _event: &AppEvent) {}
}

struct OneShot(Result<Measurement, SensorError>);
impl SensorPort for OneShot {
    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        self.0
    }
}

fuzz_target!(|data: &[u8]| {
    let controller = Controller::new(CONFIG);
    let mut matrix = Matrix([0; 8]);
    if controller.start(&mut Lcd, &mut matrix, &mut Sink).is_err() {
        return;
    }

    let mut accepted: Vec<Measurement> = Vec::new();
    for chunk in data.chunks(3) {
        match chunk {
            [0, ticks, ..] => {
                for _ in 0..*ticks {
                    controller.tick(&mut Lcd, &mut matrix, &mut Tone);
                }
            }
            [1, ..] => {
                let mut sensor = OneShot(Err(SensorError::Timeout));
                controller.sample(&mut sensor, &mut Sink);
            }
            [_, t, h] => {
                let m = Measurement::new(i16::from(*t as i8), i16::from(*h));
                let mut sensor = OneShot(Ok(m));
                if controller.sample(&mut sensor, &mut Sink) == SampleOutcome::Accepted {
                    accepted.push(m);
                }
            }
            _ => {}
        }

        let snap = controller.snapshot();
        for metric in Metric::ALL {
            match snap.history.extremes(metric) {
                None => assert!(accepted.is_empty()),
                Some(e) => {
                    assert!(e.min <= e.max);
                    for m in &accepted {
                        assert!(e.min <= m.get(metric) && m.get(metric) <= e.max);
                    }
                }
            }
        }
    }
});

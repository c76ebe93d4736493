//! Mock hardware adapters for integration tests.
//!
//! Records every port call so tests can assert on the full output history
//! without touching real GPIO/PWM registers.

use std::collections::VecDeque;

use climawatch::app::events::AppEvent;
use climawatch::app::ports::{
    EventSink, MatrixPort, Row, SensorPort, TextDisplayPort, TonePort,
};
use climawatch::error::SensorError;
use climawatch::measurement::Measurement;

// ── Sensor ────────────────────────────────────────────────────

/// Replays a scripted sequence of reads; fails with `Timeout` once empty.
pub struct ScriptedSensor {
    script: VecDeque<Result<Measurement, SensorError>>,
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            reads: 0,
        }
    }

    pub fn ok(mut self, temperature: i16, humidity: i16) -> Self {
        self.script
            .push_back(Ok(Measurement::new(temperature, humidity)));
        self
    }

    pub fn err(mut self, e: SensorError) -> Self {
        self.script.push_back(Err(e));
        self
    }
}

impl SensorPort for ScriptedSensor {
    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        self.reads += 1;
        self.script.pop_front().unwrap_or(Err(SensorError::Timeout))
    }
}

// ── LCD ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLcd {
    pub lines: [String; 2],
    pub writes: usize,
    pub clears: usize,
}

#[allow(dead_code)]
impl MockLcd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> &str {
        &self.lines[0]
    }

    pub fn bottom(&self) -> &str {
        &self.lines[1]
    }
}

impl TextDisplayPort for MockLcd {
    fn write_line(&mut self, row: Row, text: &str) {
        let idx = match row {
            Row::Top => 0,
            Row::Bottom => 1,
        };
        self.lines[idx] = text.to_string();
        self.writes += 1;
    }

    fn clear(&mut self) {
        self.lines = Default::default();
        self.clears += 1;
    }
}

// ── Matrix ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockMatrix {
    pub rows: [u8; 8],
    pub intensity: Option<u8>,
    /// `None` until the controller sets it.
    pub test_mode: Option<bool>,
    /// Snapshot of all rows after every completed 8-row write burst.
    pub frames: Vec<[u8; 8]>,
    pending_writes: usize,
}

#[allow(dead_code)]
impl MockMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }
}

impl MatrixPort for MockMatrix {
    fn init(&mut self, intensity: u8) {
        self.intensity = Some(intensity);
        self.rows = [0; 8];
    }

    fn set_row(&mut self, row: u8, bits: u8) {
        self.rows[row as usize] = bits;
        self.pending_writes += 1;
        if self.pending_writes == 8 {
            self.frames.push(self.rows);
            self.pending_writes = 0;
        }
    }

    fn get_row(&self, row: u8) -> u8 {
        self.rows[row as usize]
    }

    fn set_test_mode(&mut self, on: bool) {
        self.test_mode = Some(on);
    }
}

// ── Buzzer ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    Emit(u32),
    On,
    Off,
}

#[derive(Default)]
pub struct MockTone {
    pub calls: Vec<ToneCall>,
}

#[allow(dead_code)]
impl MockTone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ToneCall::On => Some(true),
                ToneCall::Off => Some(false),
                ToneCall::Emit(_) => None,
            })
            .unwrap_or(false)
    }
}

impl TonePort for MockTone {
    fn emit_tone(&mut self, duration_ms: u32) {
        self.calls.push(ToneCall::Emit(duration_ms));
    }

    fn tone_on(&mut self) {
        self.calls.push(ToneCall::On);
    }

    fn tone_off(&mut self) {
        self.calls.push(ToneCall::Off);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Bundle ────────────────────────────────────────────────────

/// All output devices the tick drives.
#[derive(Default)]
pub struct Rig {
    pub lcd: MockLcd,
    pub matrix: MockMatrix,
    pub tone: MockTone,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::default()
    }
}

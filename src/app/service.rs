//! Application service, the hexagonal core.
//!
//! [`Controller`] owns all classified state and the display/animation
//! state machines.  Two execution contexts share it:
//!
//! * the **sampling loop** calls [`Controller::sample`] forever;
//! * a **periodic timer** calls [`Controller::tick`] every
//!   `tick_interval_ms`.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │         Controller           │
//!                 │  sampling: validator · alarm │
//!                 │            history · faults  │
//!                 │  tick:     scheduler · anim  │ ──▶ TextDisplayPort
//!                 │            alarm sound       │ ──▶ MatrixPort / TonePort
//!                 └─────────────────────────────┘
//! ```
//!
//! Each context's state sits behind its own critical-section mutex.  A
//! whole sample (validation, both classifications, both history updates)
//! is committed in one critical section, and the tick copies a
//! [`Snapshot`] out in another, so the tick never sees half a sample.
//! Device I/O always happens outside the critical sections.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;
use log::{debug, info};

use crate::alarm::{AlarmStatus, AnimationKind};
use crate::config::SystemConfig;
use crate::drivers::animation::AnimationEngine;
use crate::drivers::tone::AlarmSound;
use crate::error::{ConfigError, SensorError};
use crate::history::HistoryTracker;
use crate::measurement::Measurement;
use crate::scheduler::{DisplayScheduler, DisplayStep, Snapshot};
use crate::screens::Screen;
use crate::validator::MeasurementValidator;

use super::events::AppEvent;
use super::ports::{EventSink, MatrixPort, Row, SensorPort, TextDisplayPort, TonePort};

// ───────────────────────────────────────────────────────────────
// Shared state
// ───────────────────────────────────────────────────────────────

/// Written by the sampling loop, read by the tick.
#[derive(Debug, Clone)]
struct SamplingState {
    validator: MeasurementValidator,
    status: AlarmStatus,
    history: HistoryTracker,
    latest: Option<Measurement>,
    sensor_fault: bool,
    config_fault: Option<ConfigError>,
}

impl SamplingState {
    const fn new() -> Self {
        Self {
            validator: MeasurementValidator::new(),
            status: AlarmStatus::new(),
            history: HistoryTracker::new(),
            latest: None,
            sensor_fault: false,
            config_fault: None,
        }
    }
}

/// Owned by the tick.  Only the tick writes it.
#[derive(Debug, Clone)]
struct TickState {
    scheduler: DisplayScheduler,
    animation: AnimationEngine,
    sound: AlarmSound,
    ticks: u32,
}

/// Result of one [`Controller::sample`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Passed the plausibility filter and updated the classified state.
    Accepted,
    /// Dropped by the plausibility filter; nothing changed.
    Rejected,
    /// The sensor read failed; the fault screen is latched.
    SensorFault(SensorError),
    /// Configuration is invalid; the sensor was not read.
    Halted,
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller {
    config: SystemConfig,
    sampling: CriticalSectionMutex<RefCell<SamplingState>>,
    tick_state: CriticalSectionMutex<RefCell<TickState>>,
}

impl Controller {
    /// Build an idle controller.  `const` so it can live in a `static`.
    ///
    /// Nothing is validated here; call [`start`](Self::start) next.
    pub const fn new(config: SystemConfig) -> Self {
        Self {
            config,
            sampling: CriticalSectionMutex::new(RefCell::new(SamplingState::new())),
            tick_state: CriticalSectionMutex::new(RefCell::new(TickState {
                scheduler: DisplayScheduler::new(),
                animation: AnimationEngine::new(),
                sound: AlarmSound::new(config.timing.tone_mode, config.timing.warning_tone_ms),
                ticks: 0,
            })),
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring up the displays and validate the configuration.
    ///
    /// On an invalid configuration the controller halts: the error screen
    /// is shown, [`sample`](Self::sample) never touches the sensor again,
    /// and [`tick`](Self::tick) keeps the warning animation running.
    pub fn start(
        &self,
        text: &mut impl TextDisplayPort,
        matrix: &mut impl MatrixPort,
        sink: &mut impl EventSink,
    ) -> Result<(), ConfigError> {
        text.clear();
        matrix.set_test_mode(false);
        matrix.init(self.config.timing.matrix_intensity.min(15));

        if let Err(err) = self.config.validate() {
            self.sampling.lock(|s| s.borrow_mut().config_fault = Some(err));
            render(text, &Screen::ConfigFault(err));
            sink.emit(&AppEvent::ConfigRejected(err));
            return Err(err);
        }

        info!(
            "Controller started (tick {} ms, dwell {} ticks, tone {:?})",
            self.config.timing.tick_interval_ms,
            self.config.timing.display_dwell_ticks,
            self.config.timing.tone_mode,
        );
        sink.emit(&AppEvent::Started);
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.sampling.lock(|s| s.borrow().config_fault.is_some())
    }

    // ── Sampling loop ─────────────────────────────────────────

    /// Read the sensor once and commit the result.
    pub fn sample(&self, sensor: &mut impl SensorPort, sink: &mut impl EventSink) -> SampleOutcome {
        if self.is_halted() {
            return SampleOutcome::Halted;
        }

        let candidate = match sensor.read_measurement() {
            Ok(m) => m,
            Err(err) => {
                self.sampling.lock(|s| s.borrow_mut().sensor_fault = true);
                sink.emit(&AppEvent::SensorFault(err));
                return SampleOutcome::SensorFault(err);
            }
        };

        let limits = self.config.limits;
        let committed = self.sampling.lock(|s| {
            let s = &mut *s.borrow_mut();
            if !s.validator.accept(candidate) {
                return Err(s.validator.reference());
            }
            let transitions = s.status.update(&candidate, &limits);
            s.history.record(&candidate);
            s.latest = Some(candidate);
            let recovered = core::mem::replace(&mut s.sensor_fault, false);
            Ok((transitions, recovered))
        });

        match committed {
            Ok((transitions, recovered)) => {
                if recovered {
                    sink.emit(&AppEvent::SensorRecovered);
                }
                sink.emit(&AppEvent::MeasurementAccepted(candidate));
                for t in transitions {
                    sink.emit(&AppEvent::AlarmChanged(t));
                }
                SampleOutcome::Accepted
            }
            Err(reference) => {
                sink.emit(&AppEvent::MeasurementRejected {
                    candidate,
                    reference,
                });
                SampleOutcome::Rejected
            }
        }
    }

    /// Copy of the committed classified state.
    pub fn snapshot(&self) -> Snapshot {
        self.sampling.lock(|s| {
            let s = s.borrow();
            Snapshot {
                latest: s.latest,
                status: s.status,
                history: s.history,
                limits: self.config.limits,
                sensor_fault: s.sensor_fault,
                config_fault: s.config_fault,
            }
        })
    }

    // ── Tick ──────────────────────────────────────────────────

    /// One periodic tick: tone countdown, a display step every
    /// `display_dwell_ticks` ticks, and one animation frame.
    ///
    /// With a `Blocking` tone this may take the full tone duration.
    pub fn tick(
        &self,
        text: &mut impl TextDisplayPort,
        matrix: &mut impl MatrixPort,
        tone: &mut impl TonePort,
    ) {
        let timing = self.config.timing;
        let snapshot = self.snapshot();
        let mut st = self.tick_state.lock(|t| t.borrow().clone());

        st.sound.on_tick(timing.tick_interval_ms, tone);

        if st.ticks % timing.display_dwell_ticks.max(1) == 0 {
            let screen = st.scheduler.next_screen(&snapshot);
            render(text, &screen);
            if screen.sounds_alarm() {
                st.sound.trigger(tone);
            }
        }
        st.ticks = st.ticks.wrapping_add(1);

        let wanted = snapshot.animation();
        if st.animation.start(wanted, timing.animation_repetitions) {
            debug!("Animation cycle: {wanted:?}");
        }
        st.animation.advance_frame(matrix);

        self.tick_state.lock(|t| *t.borrow_mut() = st);
    }

    // ── Introspection ─────────────────────────────────────────

    /// Step the next display update will evaluate.
    pub fn display_step(&self) -> DisplayStep {
        self.tick_state.lock(|t| t.borrow().scheduler.step())
    }

    /// Bitmap of the running (or last) animation cycle.
    pub fn animation(&self) -> AnimationKind {
        self.tick_state.lock(|t| t.borrow().animation.current())
    }

    pub fn animation_cycle_complete(&self) -> bool {
        self.tick_state.lock(|t| t.borrow().animation.is_cycle_complete())
    }

    pub fn is_tone_sounding(&self) -> bool {
        self.tick_state.lock(|t| t.borrow().sound.is_sounding())
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_state.lock(|t| t.borrow().ticks)
    }
}

fn render(text: &mut impl TextDisplayPort, screen: &Screen) {
    let [top, bottom] = screen.render();
    text.write_line(Row::Top, top.as_str());
    text.write_line(Row::Bottom, bottom.as_str());
}

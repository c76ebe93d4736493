//! Piezo buzzer driver and the alarm-tone timer.
//!
//! The PWM channel is configured for the tone frequency by the caller
//! (LEDC at 2 kHz on the device); this driver only gates it by setting the
//! duty cycle.  Duty is ~39 % (100/255).
//!
//! [`AlarmSound`] sits on top of any [`TonePort`] and implements both tone
//! modes: a blocking `emit_tone`, or a tick-counted on/off that never
//! stalls the tick handler.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::app::ports::TonePort;
use crate::config::ToneMode;
use crate::error::DriverError;

const DUTY_NUM: u16 = 100;
const DUTY_DENOM: u16 = 255;

/// Buzzer on a PWM output.
pub struct Buzzer<P, D> {
    pwm: P,
    delay: D,
    sounding: bool,
}

impl<P: SetDutyCycle, D: DelayNs> Buzzer<P, D> {
    pub fn new(pwm: P, delay: D) -> Self {
        Self {
            pwm,
            delay,
            sounding: false,
        }
    }

    pub fn start(&mut self) -> Result<(), DriverError> {
        self.pwm
            .set_duty_cycle_fraction(DUTY_NUM, DUTY_DENOM)
            .map_err(|_| DriverError::PwmWriteFailed)?;
        self.sounding = true;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), DriverError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| DriverError::PwmWriteFailed)?;
        self.sounding = false;
        Ok(())
    }

    /// Sound for `duration_ms`, returning once the tone has stopped.
    pub fn beep(&mut self, duration_ms: u32) -> Result<(), DriverError> {
        self.start()?;
        self.delay.delay_ms(duration_ms);
        self.stop()
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}

// ═══════════════════════════════════════════════════════════════
//  AlarmSound
// ═══════════════════════════════════════════════════════════════

/// Plays the warning tone in the configured [`ToneMode`].
///
/// In `Timed` mode the remaining time is counted down by one tick interval
/// on every [`on_tick`](Self::on_tick); a retrigger while sounding restarts
/// the countdown.
#[derive(Debug, Clone)]
pub struct AlarmSound {
    mode: ToneMode,
    duration_ms: u32,
    remaining_ms: u32,
}

impl AlarmSound {
    pub const fn new(mode: ToneMode, duration_ms: u32) -> Self {
        Self {
            mode,
            duration_ms,
            remaining_ms: 0,
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.remaining_ms > 0
    }

    /// Start the warning tone.  Blocks for the full duration in
    /// `Blocking` mode.
    pub fn trigger(&mut self, tone: &mut impl TonePort) {
        if self.duration_ms == 0 {
            return;
        }
        match self.mode {
            ToneMode::Blocking => tone.emit_tone(self.duration_ms),
            ToneMode::Timed => {
                if !self.is_sounding() {
                    tone.tone_on();
                }
                debug!("tone: {} ms", self.duration_ms);
                self.remaining_ms = self.duration_ms;
            }
        }
    }

    /// Count one tick of `elapsed_ms` off a running timed tone.
    pub fn on_tick(&mut self, elapsed_ms: u32, tone: &mut impl TonePort) {
        if !self.is_sounding() {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            tone.tone_off();
        }
    }
}

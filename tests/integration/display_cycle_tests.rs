//! Integration tests: tick → display scheduler → animation → tone.

use climawatch::alarm::AnimationKind;
use climawatch::app::service::Controller;
use climawatch::config::{
    AlarmLimits, CONFIG, LIMITS, MetricLimits, SystemConfig, TIMING, TimingConfig, ToneMode,
};
use climawatch::drivers::animation::{BITMAP_CHECK, BITMAP_WARNING, FRAMES_PER_PASS};
use climawatch::error::SensorError;
use climawatch::scheduler::DisplayStep;

use super::mock_hw::{Rig, ScriptedSensor, ToneCall};

/// One display step per tick.
fn fast(tone_mode: ToneMode) -> SystemConfig {
    SystemConfig {
        timing: TimingConfig {
            display_dwell_ticks: 1,
            tone_mode,
            ..TIMING
        },
        ..CONFIG
    }
}

fn started(config: SystemConfig) -> (Controller, Rig) {
    let c = Controller::new(config);
    let mut rig = Rig::new();
    let _ = c.start(&mut rig.lcd, &mut rig.matrix, &mut rig.sink);
    (c, rig)
}

fn feed(c: &Controller, rig: &mut Rig, sensor: &mut ScriptedSensor) {
    c.sample(sensor, &mut rig.sink);
}

fn tick(c: &Controller, rig: &mut Rig) -> [String; 2] {
    c.tick(&mut rig.lcd, &mut rig.matrix, &mut rig.tone);
    rig.lcd.lines.clone()
}

// ── Display precedence ────────────────────────────────────────

#[test]
fn temperature_alarm_shows_on_step_zero_only() {
    let (c, mut rig) = started(fast(ToneMode::Timed));
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(35, 40));

    let screens: Vec<[String; 2]> = (0..5).map(|_| tick(&c, &mut rig)).collect();
    assert_eq!(screens[0], ["HIGH TEMPERATURE", "Over 30C limit!"]);
    assert_eq!(screens[1], ["Temperature: 35C", "Humidity:    40%"]);
    assert_eq!(screens[2], ["Temperature: 35C", "Humidity:    40%"]);
    assert_eq!(screens[3], ["Temp. history:", "Min 35C Max 35C"]);
    assert_eq!(screens[4], ["Hum. history:", "Min 40% Max 40%"]);
}

#[test]
fn both_alarms_take_both_warning_slots() {
    let (c, mut rig) = started(fast(ToneMode::Timed));
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(15, 55));
    assert_eq!(tick(&c, &mut rig), ["LOW TEMPERATURE", "Under 20C limit!"]);
    assert_eq!(tick(&c, &mut rig), ["HIGH HUMIDITY", "Over 50% limit!"]);
    assert_eq!(c.display_step(), DisplayStep::CurrentValues);
}

#[test]
fn values_show_dashes_before_first_sample() {
    let (c, mut rig) = started(fast(ToneMode::Timed));
    assert_eq!(tick(&c, &mut rig), ["Temperature: --C", "Humidity:    --%"]);
    tick(&c, &mut rig);
    tick(&c, &mut rig);
    assert_eq!(tick(&c, &mut rig), ["Temp. history:", "Min --C Max --C"]);
}

#[test]
fn sensor_fault_screen_until_next_accepted_read() {
    let (c, mut rig) = started(fast(ToneMode::Timed));
    let mut sensor = ScriptedSensor::new()
        .ok(25, 40)
        .err(SensorError::Timeout)
        .ok(26, 41);
    feed(&c, &mut rig, &mut sensor);
    feed(&c, &mut rig, &mut sensor);

    for _ in 0..7 {
        assert_eq!(tick(&c, &mut rig), ["Input Error:", "Bad sensor data."]);
    }
    assert_eq!(c.display_step(), DisplayStep::CurrentValues, "step kept cycling");

    feed(&c, &mut rig, &mut sensor);
    assert_eq!(tick(&c, &mut rig), ["Temperature: 26C", "Humidity:    41%"]);
}

#[test]
fn dwell_holds_a_screen_for_several_ticks() {
    let (c, mut rig) = started(CONFIG);
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(25, 40));
    for _ in 0..TIMING.display_dwell_ticks {
        tick(&c, &mut rig);
    }
    assert_eq!(rig.lcd.writes, 2, "one two-line render per dwell");
    assert_eq!(c.display_step(), DisplayStep::HumidityWarning);
    tick(&c, &mut rig);
    assert_eq!(c.display_step(), DisplayStep::CurrentValues);
}

// ── Animation ─────────────────────────────────────────────────

#[test]
fn heart_plays_until_first_classification() {
    let (c, mut rig) = started(CONFIG);
    tick(&c, &mut rig);
    assert_eq!(c.animation(), AnimationKind::Heart);
}

#[test]
fn alarm_does_not_interrupt_running_cycle() {
    let (c, mut rig) = started(CONFIG);
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(25, 40));
    for _ in 0..5 {
        tick(&c, &mut rig);
    }
    assert_eq!(c.animation(), AnimationKind::Check);

    // Two steps so the delta filter lets the rise through.
    let mut sensor = ScriptedSensor::new().ok(30, 40).ok(33, 40);
    feed(&c, &mut rig, &mut sensor);
    feed(&c, &mut rig, &mut sensor);
    assert!(c.snapshot().status.any_alarm());

    for _ in 5..FRAMES_PER_PASS {
        tick(&c, &mut rig);
        assert_eq!(c.animation(), AnimationKind::Check);
    }
    assert!(c.animation_cycle_complete());
    tick(&c, &mut rig);
    assert_eq!(c.animation(), AnimationKind::Warning);
}

#[test]
fn one_frame_per_tick_and_image_fully_loaded_after_eight() {
    let (c, mut rig) = started(CONFIG);
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(25, 40));
    rig.matrix.frames.clear();
    for _ in 0..8 {
        tick(&c, &mut rig);
    }
    assert_eq!(rig.matrix.frames.len(), 8);
    assert_eq!(rig.matrix.rows, BITMAP_CHECK);
}

#[test]
fn halted_controller_keeps_warning_animation_running() {
    let config = SystemConfig {
        limits: AlarmLimits {
            temperature: MetricLimits::new(Some(30), Some(20)),
            ..LIMITS
        },
        ..CONFIG
    };
    let (c, mut rig) = started(config);
    for _ in 0..8 {
        assert_eq!(tick(&c, &mut rig), ["Config error:", "Limit MIN > MAX"]);
    }
    assert_eq!(c.animation(), AnimationKind::Warning);
    assert_eq!(rig.matrix.rows, BITMAP_WARNING);
    assert!(rig.tone.calls.is_empty(), "config error is silent");
}

// ── Tone ──────────────────────────────────────────────────────

#[test]
fn timed_tone_does_not_stall_ticks() {
    let (c, mut rig) = started(fast(ToneMode::Timed));
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(35, 40));
    tick(&c, &mut rig);
    assert_eq!(rig.tone.calls, [ToneCall::On]);
    assert!(!rig.tone.calls.iter().any(|t| matches!(t, ToneCall::Emit(_))));
}

#[test]
fn blocking_tone_emits_full_duration_per_warning() {
    let (c, mut rig) = started(fast(ToneMode::Blocking));
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(35, 40));
    for _ in 0..10 {
        tick(&c, &mut rig);
    }
    // Two rotations, one temperature warning each.
    assert_eq!(rig.tone.calls, [ToneCall::Emit(2000), ToneCall::Emit(2000)]);
}

#[test]
fn timed_tone_stops_after_duration() {
    let (c, mut rig) = started(CONFIG);
    feed(&c, &mut rig, &mut ScriptedSensor::new().ok(35, 40));
    tick(&c, &mut rig);
    assert!(rig.tone.is_on());
    let ticks = TIMING.warning_tone_ms.div_ceil(TIMING.tick_interval_ms);
    for _ in 0..ticks {
        tick(&c, &mut rig);
    }
    assert!(!rig.tone.is_on());
    assert!(!c.is_tone_sounding());
}

//! Integration tests: sampling loop → validator → classifier → history.

use climawatch::alarm::{AlarmDirection, AlarmTransition, AnimationKind};
use climawatch::app::events::AppEvent;
use climawatch::app::service::{Controller, SampleOutcome};
use climawatch::config::{AlarmLimits, CONFIG, LIMITS, MetricLimits, SystemConfig};
use climawatch::error::{ConfigError, SensorError};
use climawatch::history::Extremes;
use climawatch::measurement::{Measurement, Metric};

use super::mock_hw::{Rig, ScriptedSensor};

fn started(config: SystemConfig) -> (Controller, Rig) {
    let c = Controller::new(config);
    let mut rig = Rig::new();
    let _ = c.start(&mut rig.lcd, &mut rig.matrix, &mut rig.sink);
    (c, rig)
}

fn run(c: &Controller, rig: &mut Rig, sensor: &mut ScriptedSensor, n: usize) -> Vec<SampleOutcome> {
    (0..n).map(|_| c.sample(sensor, &mut rig.sink)).collect()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn boot_clears_lcd_and_initialises_matrix() {
    let (c, rig) = started(CONFIG);
    assert!(!c.is_halted());
    assert_eq!(rig.lcd.clears, 1);
    assert_eq!(rig.matrix.intensity, Some(15));
    assert_eq!(rig.matrix.test_mode, Some(false), "lamp test switched off");
    assert!(rig.matrix.is_blank());
    assert!(matches!(rig.sink.events[..], [AppEvent::Started]));
}

#[test]
fn inverted_limits_halt_before_any_sensor_read() {
    let config = SystemConfig {
        limits: AlarmLimits {
            temperature: MetricLimits::new(Some(30), Some(20)),
            ..LIMITS
        },
        ..CONFIG
    };
    let c = Controller::new(config);
    let mut rig = Rig::new();
    let result = c.start(&mut rig.lcd, &mut rig.matrix, &mut rig.sink);
    assert_eq!(result, Err(ConfigError::MinAboveMax(Metric::Temperature)));

    assert_eq!(rig.lcd.top(), "Config error:");
    assert_eq!(rig.lcd.bottom(), "Limit MIN > MAX");

    let mut sensor = ScriptedSensor::new().ok(25, 40);
    let outcomes = run(&c, &mut rig, &mut sensor, 3);
    assert!(outcomes.iter().all(|o| *o == SampleOutcome::Halted));
    assert_eq!(sensor.reads, 0);
    assert!(c.snapshot().latest.is_none());
}

#[test]
fn inverted_humidity_limits_also_halt() {
    let config = SystemConfig {
        limits: AlarmLimits {
            humidity: MetricLimits::new(Some(80), Some(10)),
            ..LIMITS
        },
        ..CONFIG
    };
    let (c, rig) = started(config);
    assert!(c.is_halted());
    assert!(matches!(
        rig.sink.events[..],
        [AppEvent::ConfigRejected(ConfigError::MinAboveMax(Metric::Humidity))]
    ));
}

// ── Validator path ────────────────────────────────────────────

#[test]
fn first_reading_always_accepted() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new().ok(99, 99);
    assert_eq!(run(&c, &mut rig, &mut sensor, 1), [SampleOutcome::Accepted]);
    assert_eq!(c.snapshot().latest, Some(Measurement::new(99, 99)));
}

#[test]
fn delta_of_six_rejected_five_accepted() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new().ok(20, 40).ok(26, 40).ok(25, 40);
    let outcomes = run(&c, &mut rig, &mut sensor, 3);
    assert_eq!(
        outcomes,
        [
            SampleOutcome::Accepted,
            SampleOutcome::Rejected,
            SampleOutcome::Accepted
        ]
    );
    let rejected = rig.sink.count(|e| {
        matches!(
            e,
            AppEvent::MeasurementRejected {
                reference: Some(r),
                ..
            } if *r == Measurement::new(20, 40)
        )
    });
    assert_eq!(rejected, 1);
}

#[test]
fn rejected_sample_leaves_history_alone() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new().ok(22, 40).ok(22, 60);
    run(&c, &mut rig, &mut sensor, 2);
    let snap = c.snapshot();
    assert_eq!(
        snap.history.extremes(Metric::Humidity),
        Some(Extremes { min: 40, max: 40 })
    );
    assert_eq!(snap.status.direction(Metric::Humidity), AlarmDirection::Nominal);
}

// ── Classification and history ────────────────────────────────

#[test]
fn history_widens_over_accepted_samples() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new()
        .ok(22, 40)
        .ok(18, 44)
        .ok(21, 45)
        .ok(25, 41);
    run(&c, &mut rig, &mut sensor, 4);
    let snap = c.snapshot();
    assert_eq!(
        snap.history.extremes(Metric::Temperature),
        Some(Extremes { min: 18, max: 25 })
    );
    assert_eq!(
        snap.history.extremes(Metric::Humidity),
        Some(Extremes { min: 40, max: 45 })
    );
}

#[test]
fn alarm_transitions_reported_once_each_way() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new()
        .ok(28, 40)
        .ok(31, 40)
        .ok(32, 40)
        .ok(29, 40);
    run(&c, &mut rig, &mut sensor, 4);

    let transitions: Vec<AlarmTransition> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::AlarmChanged(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        [
            AlarmTransition {
                metric: Metric::Temperature,
                from: AlarmDirection::Nominal,
                to: AlarmDirection::AboveMax,
            },
            AlarmTransition {
                metric: Metric::Temperature,
                from: AlarmDirection::AboveMax,
                to: AlarmDirection::Nominal,
            },
        ]
    );
}

#[test]
fn same_sample_twice_is_idempotent() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new().ok(35, 10).ok(35, 10);
    run(&c, &mut rig, &mut sensor, 1);
    let first = c.snapshot();
    run(&c, &mut rig, &mut sensor, 1);
    let second = c.snapshot();
    assert_eq!(first.history, second.history);
    assert_eq!(first.status, second.status);
}

#[test]
fn unbounded_limits_never_alarm() {
    let config = SystemConfig {
        limits: AlarmLimits {
            temperature: MetricLimits::UNBOUNDED,
            humidity: MetricLimits::UNBOUNDED,
        },
        ..CONFIG
    };
    let (c, mut rig) = started(config);
    let mut sensor = ScriptedSensor::new().ok(-40, 0);
    run(&c, &mut rig, &mut sensor, 1);
    assert!(!c.snapshot().status.any_alarm());
    assert_eq!(c.snapshot().animation(), AnimationKind::Check);
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn sensor_error_keeps_classification_and_latches_fault() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new().ok(35, 40).err(SensorError::Checksum);
    let outcomes = run(&c, &mut rig, &mut sensor, 2);
    assert_eq!(outcomes[1], SampleOutcome::SensorFault(SensorError::Checksum));

    let snap = c.snapshot();
    assert!(snap.sensor_fault);
    assert_eq!(snap.latest, Some(Measurement::new(35, 40)));
    assert_eq!(snap.status.direction(Metric::Temperature), AlarmDirection::AboveMax);
}

#[test]
fn rejected_read_does_not_clear_fault() {
    let (c, mut rig) = started(CONFIG);
    let mut sensor = ScriptedSensor::new()
        .ok(20, 40)
        .err(SensorError::Timeout)
        .ok(40, 40)
        .ok(21, 40);
    run(&c, &mut rig, &mut sensor, 3);
    assert!(c.snapshot().sensor_fault, "implausible read keeps the fault");

    run(&c, &mut rig, &mut sensor, 1);
    assert!(!c.snapshot().sensor_fault);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SensorRecovered)), 1);
}

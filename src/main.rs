//! ClimaWatch Firmware, main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Dht11          Hd44780        Max7219        Buzzer           │
//! │  (SensorPort)   (TextDisplay)  (MatrixPort)   (TonePort)       │
//! │  LogEventSink (EventSink)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Validator · Alarm · History · Scheduler · Animation   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  main task: sample() loop      esp_timer task: tick()          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver, Pull};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::FromValueType;

use climawatch::adapters::log_sink::LogEventSink;
use climawatch::app::service::Controller;
use climawatch::config::CONFIG;
use climawatch::error::Error;
use climawatch::drivers::hw_timer;
use climawatch::drivers::lcd::{DataPins, Hd44780};
use climawatch::drivers::max7219::Max7219;
use climawatch::drivers::tone::Buzzer;
use climawatch::pins;
use climawatch::sensors::dht11::Dht11;

/// Shared between the sampling loop (main task) and the tick (timer task).
static CONTROLLER: Controller = Controller::new(CONFIG);

type Out = PinDriver<'static, AnyOutputPin, Output>;

fn output(pin: impl OutputPin) -> Result<Out> {
    Ok(PinDriver::output(pin.downgrade_output())?)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ClimaWatch v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Config: {}", serde_json::to_string(&CONFIG)?);
    info!("GPIOs in use: {:?}", pins::ALL_GPIOS);

    let peripherals = Peripherals::take()?;
    let io = peripherals.pins;

    // ── 2. Drivers (pin numbers must match pins.rs) ───────────
    let mut lcd = Hd44780::new(
        output(io.gpio5)?,
        output(io.gpio6)?,
        DataPins {
            d4: output(io.gpio7)?,
            d5: output(io.gpio15)?,
            d6: output(io.gpio16)?,
            d7: output(io.gpio17)?,
        },
        Ets,
    )
    .map_err(Error::from)?;

    let mut matrix = Max7219::new(output(io.gpio11)?, output(io.gpio12)?, output(io.gpio10)?)
        .map_err(Error::from)?;

    let tone_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::BUZZER_FREQ_HZ.Hz())
            .resolution(Resolution::Bits8),
    )?;
    let pwm = LedcDriver::new(peripherals.ledc.channel0, tone_timer, io.gpio18)?;
    let mut buzzer = Buzzer::new(pwm, FreeRtos);

    let mut dht_pin = PinDriver::input_output_od(io.gpio4)?;
    dht_pin.set_pull(Pull::Up)?;
    let mut dht = Dht11::new(dht_pin, Ets).map_err(Error::from)?;

    let mut log_sink = LogEventSink::new();

    // ── 3. Validate config, bring up displays ─────────────────
    let started = CONTROLLER.start(&mut lcd, &mut matrix, &mut log_sink);

    // ── 4. Tick timer (display step + animation frame + tone) ─
    let _tick = hw_timer::start(CONFIG.timing.tick_interval_ms, move || {
        CONTROLLER.tick(&mut lcd, &mut matrix, &mut buzzer);
    })?;

    if started.is_err() {
        warn!("Halted on invalid configuration; fix config.rs and re-flash");
        loop {
            FreeRtos::delay_ms(1000);
        }
    }

    // ── 5. Sampling loop ──────────────────────────────────────
    info!("System ready. Entering sampling loop.");
    loop {
        CONTROLLER.sample(&mut dht, &mut log_sink);
        FreeRtos::delay_ms(CONFIG.timing.sample_interval_ms);
    }
}

//! GPIO / peripheral pin assignments for the ClimaWatch board (ESP32-S3).
//!
//! Single source of truth for the wiring.  `main.rs` takes the matching
//! typed pins from `Peripherals`; keep both in step when rewiring.

// ---------------------------------------------------------------------------
// DHT11 temperature / humidity sensor
// ---------------------------------------------------------------------------

/// Open-drain data line with a 10 kΩ pull-up to 3V3.
pub const DHT_DATA_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// HD44780 16x2 character LCD (4-bit mode, R/W tied to GND)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 5;
pub const LCD_EN_GPIO: i32 = 6;
pub const LCD_D4_GPIO: i32 = 7;
pub const LCD_D5_GPIO: i32 = 15;
pub const LCD_D6_GPIO: i32 = 16;
pub const LCD_D7_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// MAX7219 8x8 LED matrix (bit-banged serial)
// ---------------------------------------------------------------------------

pub const MATRIX_DIN_GPIO: i32 = 11;
pub const MATRIX_CLK_GPIO: i32 = 12;
pub const MATRIX_CS_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Piezo buzzer
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the buzzer through an NPN transistor.
pub const BUZZER_GPIO: i32 = 18;
/// Alarm tone pitch.
pub const BUZZER_FREQ_HZ: u32 = 2_000;

/// Every GPIO in use, for the boot banner and the overlap check.
pub const ALL_GPIOS: [i32; 11] = [
    DHT_DATA_GPIO,
    LCD_RS_GPIO,
    LCD_EN_GPIO,
    LCD_D4_GPIO,
    LCD_D5_GPIO,
    LCD_D6_GPIO,
    LCD_D7_GPIO,
    MATRIX_DIN_GPIO,
    MATRIX_CLK_GPIO,
    MATRIX_CS_GPIO,
    BUZZER_GPIO,
];

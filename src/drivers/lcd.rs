//! HD44780 16x2 character LCD, 4-bit parallel mode.
//!
//! Write-only wiring (R/W tied to ground), so every command is followed by
//! a fixed delay instead of polling the busy flag.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::{Row, TEXT_COLUMNS};
use crate::error::DriverError;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const LINE_ADDR: [u8; 2] = [0x00, 0x40];

/// Data pins D4..D7, least significant first.
pub struct DataPins<P> {
    pub d4: P,
    pub d5: P,
    pub d6: P,
    pub d7: P,
}

pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    data: DataPins<P>,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Run the power-on reset sequence and clear the screen.
    pub fn new(rs: P, en: P, data: DataPins<P>, delay: D) -> Result<Self, DriverError> {
        let mut lcd = Self {
            rs,
            en,
            data,
            delay,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<(), DriverError> {
        self.delay.delay_ms(50);
        set(&mut self.rs, false)?;

        // Force 8-bit mode three times, then drop to 4-bit.
        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)
    }

    pub fn clear(&mut self) -> Result<(), DriverError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    /// Overwrite a whole line.  Short text is padded with spaces, long
    /// text truncated; non-ASCII characters show as `?`.
    pub fn write_line(&mut self, row: Row, text: &str) -> Result<(), DriverError> {
        let addr = match row {
            Row::Top => LINE_ADDR[0],
            Row::Bottom => LINE_ADDR[1],
        };
        self.command(CMD_SET_DDRAM | addr)?;

        let mut chars = text.chars();
        for _ in 0..TEXT_COLUMNS {
            let c = match chars.next() {
                Some(c) if c.is_ascii() && !c.is_ascii_control() => c as u8,
                Some(_) => b'?',
                None => b' ',
            };
            self.write_data(c)?;
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), DriverError> {
        set(&mut self.rs, false)?;
        self.write_byte(cmd)
    }

    fn write_data(&mut self, byte: u8) -> Result<(), DriverError> {
        set(&mut self.rs, true)?;
        self.write_byte(byte)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), DriverError> {
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DriverError> {
        set(&mut self.data.d4, nibble & 0x01 != 0)?;
        set(&mut self.data.d5, nibble & 0x02 != 0)?;
        set(&mut self.data.d6, nibble & 0x04 != 0)?;
        set(&mut self.data.d7, nibble & 0x08 != 0)?;
        set(&mut self.en, true)?;
        self.delay.delay_us(1);
        set(&mut self.en, false)?;
        self.delay.delay_us(1);
        Ok(())
    }
}

fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), DriverError> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| DriverError::GpioWriteFailed)
}

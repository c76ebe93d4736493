//! MAX7219 LED driver for a single 8x8 matrix.
//!
//! Serial interface is bit-banged over three GPIOs (DIN, CLK, CS/LOAD);
//! each 16-bit frame is `register << 8 | data`, MSB first, latched on the
//! rising edge of CS.  The chip has no read-back, so a shadow copy of
//! every row is kept for [`Max7219::row`].

use embedded_hal::digital::OutputPin;

use crate::error::DriverError;

/// Rows map to digit registers 1..=8.
pub const REG_DIGIT0: u8 = 0x01;
pub const REG_DECODE_MODE: u8 = 0x09;
pub const REG_INTENSITY: u8 = 0x0A;
pub const REG_SCAN_LIMIT: u8 = 0x0B;
pub const REG_SHUTDOWN: u8 = 0x0C;
pub const REG_DISPLAY_TEST: u8 = 0x0F;

pub const ROWS: usize = 8;

pub struct Max7219<P> {
    din: P,
    clk: P,
    cs: P,
    shadow: [u8; ROWS],
}

impl<P: OutputPin> Max7219<P> {
    pub fn new(mut din: P, mut clk: P, mut cs: P) -> Result<Self, DriverError> {
        set(&mut din, false)?;
        set(&mut clk, false)?;
        set(&mut cs, true)?;
        Ok(Self {
            din,
            clk,
            cs,
            shadow: [0; ROWS],
        })
    }

    /// Power up into matrix mode: shutdown off, no BCD decode,
    /// `intensity` (0..=15), all eight rows scanned, every row blank.
    ///
    /// Display-test mode is left as it is; see [`display_test`](Self::display_test).
    pub fn init(&mut self, intensity: u8) -> Result<(), DriverError> {
        self.shutdown(false)?;
        self.write_reg(REG_DECODE_MODE, 0x00)?;
        self.set_intensity(intensity)?;
        self.write_reg(REG_SCAN_LIMIT, 0x07)?;
        self.clear()
    }

    pub fn shutdown(&mut self, off: bool) -> Result<(), DriverError> {
        self.write_reg(REG_SHUTDOWN, u8::from(!off))
    }

    pub fn display_test(&mut self, on: bool) -> Result<(), DriverError> {
        self.write_reg(REG_DISPLAY_TEST, u8::from(on))
    }

    pub fn set_intensity(&mut self, intensity: u8) -> Result<(), DriverError> {
        self.write_reg(REG_INTENSITY, intensity.min(0x0F))
    }

    pub fn set_row(&mut self, row: u8, bits: u8) -> Result<(), DriverError> {
        let idx = usize::from(row);
        if idx >= ROWS {
            return Err(DriverError::RowOutOfRange(row));
        }
        self.write_reg(REG_DIGIT0 + row, bits)?;
        self.shadow[idx] = bits;
        Ok(())
    }

    /// Last value written to `row`; 0 for an out-of-range row.
    pub fn row(&self, row: u8) -> u8 {
        self.shadow.get(usize::from(row)).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) -> Result<(), DriverError> {
        for row in 0..ROWS as u8 {
            self.set_row(row, 0)?;
        }
        Ok(())
    }

    fn write_reg(&mut self, reg: u8, data: u8) -> Result<(), DriverError> {
        set(&mut self.cs, false)?;
        let frame = (u16::from(reg) << 8) | u16::from(data);
        for bit in (0..16).rev() {
            set(&mut self.clk, false)?;
            set(&mut self.din, frame & (1 << bit) != 0)?;
            set(&mut self.clk, true)?;
        }
        set(&mut self.clk, false)?;
        set(&mut self.cs, true)
    }
}

fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), DriverError> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| DriverError::GpioWriteFailed)
}

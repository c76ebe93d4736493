//! DHT11 single-wire temperature/humidity sensor driver.
//!
//! ## Protocol
//!
//! ```text
//!  host  ▔▔▔▔╲______18ms______╱▔▔ release
//!  dht                            ╲_80us_╱▔80us▔╲ 40 bits ...
//!  bit        ╲_50us_╱▔ 26us ▔╲  = 0
//!             ╲_50us_╱▔▔ 70us ▔▔╲ = 1
//! ```
//!
//! A bit is `1` when its high pulse outlasts the low pulse before it.
//! Comparing the two counts keeps the decoder independent of how long
//! one polling iteration really takes.
//!
//! Frame: humidity integer, humidity decimal, temperature integer,
//! temperature decimal, checksum (low byte of the sum of the other four).
//!
//! The data pin must be open-drain with a pull-up, so it can be driven
//! low and read back through the same handle.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;
use crate::measurement::Measurement;

/// Host start pulse.
const START_LOW_MS: u32 = 18;
/// Polling budget per level, in 1 µs steps.  Longest legal level is 80 µs.
const LEVEL_TIMEOUT_US: u32 = 100;
const FRAME_BITS: usize = 40;

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Take ownership of an idle (released, high) data line.
    pub fn new(mut pin: P, delay: D) -> Result<Self, SensorError> {
        pin.set_high().map_err(|_| SensorError::Bus)?;
        Ok(Self { pin, delay })
    }

    /// One full transaction: start pulse, handshake, 40 bits.
    ///
    /// Everything after the start pulse runs inside a critical section
    /// (about 5 ms), so the tick task cannot stretch a pulse.
    pub fn read(&mut self) -> Result<Measurement, SensorError> {
        self.pin.set_low().map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(START_LOW_MS);
        let frame = critical_section::with(|_| self.receive())?;
        decode(frame)
    }

    fn receive(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin.set_high().map_err(|_| SensorError::Bus)?;

        // Sensor answers by pulling low for 80 µs, then high for 80 µs.
        self.wait_while(true)?;
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..FRAME_BITS {
            let low = self.wait_while(false)?;
            let high = self.wait_while(true)?;
            if high > low {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Microseconds spent while the line stays at `level`.
    fn wait_while(&mut self, level: bool) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| SensorError::Bus)? == level {
            if elapsed >= LEVEL_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

/// Validate the checksum and convert a raw 5-byte frame.
///
/// Bit 7 of the temperature decimal byte flags a negative value on the
/// sensor revisions that measure below zero.
pub fn decode(frame: [u8; 5]) -> Result<Measurement, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }
    let humidity = i16::from(frame[0]);
    let mut temperature = i16::from(frame[2]);
    if frame[3] & 0x80 != 0 {
        temperature = -temperature;
    }
    Ok(Measurement::new(temperature, humidity))
}

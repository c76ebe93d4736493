//! Fuzz target: `dht11::decode`
//!
//! Any 5-byte frame either fails the checksum or decodes to values the
//! 8-bit wire format can actually carry.
//!
//! cargo fuzz run fuzz_dht11_frame

#![no_main]

use climawatch::error::SensorError;
use climawatch::sensors::dht11::decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|frame: [u8; 5]| {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    match decode(frame) {
        Ok(m) => {
            assert_eq!(sum, frame[4]);
            assert!((0..=255).contains(&m.humidity));
            assert!((-255..=255).contains(&m.temperature));
            assert_eq!(m.temperature < 0, frame[3] & 0x80 != 0 && frame[2] != 0);
        }
        Err(e) => {
            assert_eq!(e, SensorError::Checksum);
            assert_ne!(sum, frame[4]);
        }
    }
});

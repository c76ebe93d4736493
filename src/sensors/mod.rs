//! Sensor drivers.

pub mod dht11;

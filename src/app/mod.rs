//! Application core: pure domain logic, zero I/O.
//!
//! Sampling (validation, classification, history) and the tick-driven
//! display/animation state machines live in [`service::Controller`].
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;

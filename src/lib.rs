//! ClimaWatch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host
//! simulation.  ESP-IDF-specific code is guarded by the `espidf` feature
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod history;
pub mod measurement;
pub mod pins;
pub mod scheduler;
pub mod screens;
pub mod sensors;
pub mod validator;

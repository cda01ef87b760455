#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod fmt;

mod address;
mod bus;
pub mod calibration;
mod config;
mod driver;
mod quantity;
mod register;
mod result;
pub mod schedule;
mod sink;

pub use address::Address;
pub use bus::{BusTransport, Settled};
pub use calibration::Calibration;
pub use config::SensorConfig;
pub use driver::{CycleStatus, LightState, PollResult, SoilSensor, LIGHT_MEASUREMENT_TIME};
pub use quantity::{DeviceClass, Quantities, Quantity};
pub use register::{Register, RegisterId};
pub use result::{ConfigError, Error};
pub use schedule::Cadence;
pub use sink::{OutputSink, Sinks};

//! Hardware driver implementations
//!
//! This crate provides the device-protocol encoders behind the
//! capability traits defined in nacelle-core:
//!
//! - Quad relay board (addressed bus)
//! - Micropressure sensor, one per bus instance (addressed bus)
//! - APA102 LED chain (serial-push bus)
//!
//! Every driver is generic over the nacelle-hal bus traits, so the tests
//! here run against mock buses on the host.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod led;
pub mod pressure;
pub mod relay;

pub use led::Apa102;
pub use pressure::{Mpr, SensorPair};
pub use relay::QuadRelay;

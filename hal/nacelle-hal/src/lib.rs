//! Nacelle Hardware Abstraction Layer
//!
//! This crate defines the bus abstraction traits that the device drivers
//! are written against. Chip-specific HALs (RP2040 today, others later)
//! implement them, and the driver tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (nacelle-drivers)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nacelle-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nacelle-hal-rp2040 (embassy-rp impls)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Addressed register-style bus (relays, pressure sensor)
//! - [`spi::SpiTx`] - Framed serial-push bus (LED chain)
//! - [`share::SharedBus`] - RefCell handle for drivers sharing one bus

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod share;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use i2c::I2cBus;
pub use share::SharedBus;
pub use spi::SpiTx;

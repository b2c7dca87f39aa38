//! RP2040-specific HAL for Nacelle firmware
//!
//! Implements the `nacelle-hal` bus traits on top of the blocking
//! embassy-rp peripherals:
//!
//! - [`i2c`]: `I2cBus` for `embassy_rp::i2c::I2c`
//! - [`spi`]: `SpiTx` for `embassy_rp::spi::Spi`
//!
//! Both modules also translate the shared config structs into the
//! embassy-rp peripheral configs.

#![no_std]

pub mod i2c;
pub mod spi;

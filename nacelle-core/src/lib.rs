//! Board-agnostic core logic for the Nacelle accessory controller
//!
//! This crate contains the application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device capability traits (relay bank, pressure sensor, light strip)
//! - The command dispatcher and its acknowledgment formatting
//! - The firmware identity reported by the identify command
//!
//! The hardware drivers in `nacelle-drivers` implement the capability
//! traits; the firmware wires them into a [`dispatch::Toolhead`] and
//! feeds it parsed commands.

#![no_std]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod identity;
pub mod traits;

//! Quad relay board driver
//!
//! The relay board holds its own channel state; the firmware never
//! caches it. Setting a channel is therefore a read-modify operation:
//! read the channel's status register, and fire the toggle register only
//! when the observed state differs from the desired one. Repeating a
//! command is free — the second read-back already matches and no toggle
//! is issued.

use nacelle_core::traits::{RelayBank, RelayError};
use nacelle_hal::I2cBus;

/// 7-bit bus address of the relay board
pub const RELAY_ADDR: u8 = 0x6D;

/// Number of relay channels on the board
pub const CHANNEL_COUNT: u8 = 4;

/// Toggle registers for channels 0-3
const REG_TOGGLE_BASE: u8 = 0x01;
/// Status registers for channels 0-3 (non-zero = energized)
const REG_STATUS_BASE: u8 = 0x05;
/// Broadcast command: every channel off
const CMD_ALL_OFF: u8 = 0x0A;

/// Driver for a 4-channel addressed-bus relay board
pub struct QuadRelay<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> QuadRelay<B> {
    /// Create a driver at the board's default address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, RELAY_ADDR)
    }

    /// Create a driver at a non-default address (jumpered boards)
    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }
}

impl<B: I2cBus> RelayBank for QuadRelay<B> {
    fn set_channel(&mut self, channel: u8, on: bool) -> Result<(), RelayError> {
        if channel >= CHANNEL_COUNT {
            return Err(RelayError::InvalidChannel);
        }

        // The board requires the status read to follow the register
        // select without the bus going idle in between
        let mut status = [0u8; 1];
        self.bus
            .write_read(self.address, &[REG_STATUS_BASE + channel], &mut status)
            .map_err(|_| RelayError::Bus)?;

        let currently_on = status[0] != 0;
        if currently_on != on {
            self.bus
                .write(self.address, &[REG_TOGGLE_BASE + channel])
                .map_err(|_| RelayError::Bus)?;
        }
        Ok(())
    }

    fn all_off(&mut self) -> Result<(), RelayError> {
        self.bus
            .write(self.address, &[CMD_ALL_OFF])
            .map_err(|_| RelayError::Bus)
    }
}

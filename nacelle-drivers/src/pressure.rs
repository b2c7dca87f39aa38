//! Micropressure sensor driver
//!
//! The sensor runs a measurement on demand: a 3-byte trigger command
//! starts the conversion, a status byte exposes a busy flag while it
//! runs, and a 4-byte response (status + 3 data bytes) carries the
//! 24-bit reading once the flag clears.
//!
//! The status poll is bounded. A sensor that never clears its busy flag
//! surfaces `PressureError::Timeout` instead of hanging the command
//! loop.

use nacelle_core::traits::{PressureError, PressureSensor};
use nacelle_hal::I2cBus;

/// 7-bit bus address of the sensor
pub const SENSOR_ADDR: u8 = 0x18;

/// Measurement trigger command
const CMD_MEASURE: [u8; 3] = [0xAA, 0x00, 0x00];

/// Busy flag in the status byte: conversion still running
const STATUS_BUSY: u8 = 0x20;

/// Status poll budget per read
///
/// A conversion completes in about 5 ms; at fast-mode bus speed that is
/// on the order of a hundred single-byte status reads. 1000 leaves an
/// order of magnitude of margin.
pub const MAX_STATUS_POLLS: u32 = 1000;

/// Driver for one micropressure sensor on one bus instance
pub struct Mpr<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> Mpr<B> {
    /// Create a driver at the sensor's fixed address
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            address: SENSOR_ADDR,
        }
    }

    /// Trigger a measurement and return the raw 24-bit reading
    pub fn read_raw(&mut self) -> Result<u32, PressureError> {
        self.bus
            .write(self.address, &CMD_MEASURE)
            .map_err(|_| PressureError::Bus)?;

        let mut status = [0u8; 1];
        for _ in 0..MAX_STATUS_POLLS {
            // A failed status read counts against the budget and reads
            // as still-busy
            let ready = self.bus.read(self.address, &mut status).is_ok()
                && status[0] & STATUS_BUSY == 0;
            if ready {
                let mut response = [0u8; 4];
                self.bus
                    .read(self.address, &mut response)
                    .map_err(|_| PressureError::Bus)?;
                return Ok(u32::from(response[1]) << 16
                    | u32::from(response[2]) << 8
                    | u32::from(response[3]));
            }
        }
        Err(PressureError::Timeout)
    }
}

/// Sensors on two bus instances, selected by index
///
/// The two buses may be different peripheral types; each carries its own
/// sensor at the same fixed address.
pub struct SensorPair<B0, B1> {
    sensor0: Mpr<B0>,
    sensor1: Mpr<B1>,
}

impl<B0: I2cBus, B1: I2cBus> SensorPair<B0, B1> {
    /// Create the pair from the two bus instances
    pub fn new(bus0: B0, bus1: B1) -> Self {
        Self {
            sensor0: Mpr::new(bus0),
            sensor1: Mpr::new(bus1),
        }
    }
}

impl<B0: I2cBus, B1: I2cBus> PressureSensor for SensorPair<B0, B1> {
    fn read(&mut self, bus: u8) -> Result<u32, PressureError> {
        match bus {
            0 => self.sensor0.read_raw(),
            1 => self.sensor1.read_raw(),
            _ => Err(PressureError::InvalidBus),
        }
    }
}

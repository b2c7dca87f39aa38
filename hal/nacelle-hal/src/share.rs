//! Bus sharing for single-task firmware
//!
//! The relay board and one of the pressure sensors sit on the same
//! physical bus. Each driver owns its bus handle, so a shared bus is
//! wrapped in a `RefCell` and handed out as [`SharedBus`] handles.
//!
//! Only one command executes at a time and drivers never nest
//! transactions, so plain `RefCell` borrow discipline is enough.

use core::cell::RefCell;

use crate::i2c::I2cBus;

/// Cloneable handle to a bus owned by a `RefCell`
pub struct SharedBus<'a, B> {
    bus: &'a RefCell<B>,
}

impl<'a, B> SharedBus<'a, B> {
    /// Create a handle to the shared bus
    pub fn new(bus: &'a RefCell<B>) -> Self {
        Self { bus }
    }
}

impl<B> Clone for SharedBus<'_, B> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<B: I2cBus> I2cBus for SharedBus<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_read(address, write_data, read_buf)
    }
}

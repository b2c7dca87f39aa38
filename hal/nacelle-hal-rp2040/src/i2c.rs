//! I2C bus implementation for embassy-rp
//!
//! The blocking embassy-rp I2C master maps directly onto the
//! [`I2cBus`] operations; `write_read` keeps the bus between the write
//! and the read (repeated start), which the relay board depends on.

use embassy_rp::i2c::{Error, I2c, Mode};

use nacelle_hal::i2c::{I2cBus, I2cConfig};

impl<M: Mode> I2cBus for I2c<'_, M> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Error> {
        self.blocking_write(u16::from(address), data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.blocking_read(u16::from(address), buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Error> {
        self.blocking_write_read(u16::from(address), write_data, read_buf)
    }
}

/// Translate the shared bus config into the embassy-rp peripheral config
pub fn config(shared: I2cConfig) -> embassy_rp::i2c::Config {
    let mut config = embassy_rp::i2c::Config::default();
    config.frequency = shared.frequency;
    config
}

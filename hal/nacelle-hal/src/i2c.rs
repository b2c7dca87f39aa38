//! Addressed bus abstraction
//!
//! The relay board and the pressure sensor both sit on shared two-wire
//! buses and are driven with discrete read/write byte sequences targeted
//! at a 7-bit device address.

/// I2C bus master
///
/// All operations are blocking: they return once the transaction has
/// completed on the wire, or with an error if the device did not
/// transfer the expected number of bytes.
pub trait I2cBus {
    /// Error type for bus operations
    type Error;

    /// Write data to a device, terminating with a stop condition
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `buf` - Buffer to fill; its length is the number of bytes clocked in
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read without releasing the bus in between
    ///
    /// The write is issued without a terminating stop condition; the read
    /// follows under a repeated start. Used for register-style reads where
    /// the device must not see the bus go idle between the address byte
    /// and the read-back.
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `write_data` - Bytes to write (typically a register selector)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// I2C bus configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        // The accessory boards all run fast mode
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

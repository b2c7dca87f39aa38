//! Pressure sensor capability

/// Errors from pressure sensor reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureError {
    /// Bus index outside the populated sensors
    InvalidBus,
    /// Bus transaction transferred an unexpected byte count
    Bus,
    /// Sensor never cleared its busy flag within the poll budget
    Timeout,
}

/// A pressure sensor reachable on one of several bus instances
pub trait PressureSensor {
    /// Trigger a measurement and return the raw 24-bit reading
    fn read(&mut self, bus: u8) -> Result<u32, PressureError>;
}

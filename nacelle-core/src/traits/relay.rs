//! Relay bank capability

/// Errors from relay operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayError {
    /// Channel index outside the bank
    InvalidChannel,
    /// Bus transaction transferred an unexpected byte count
    Bus,
}

/// A bank of relay channels
///
/// Channel state lives in the relay hardware, not in firmware: drivers
/// read it back over the bus rather than caching it.
pub trait RelayBank {
    /// Drive one channel to the desired state
    ///
    /// Idempotent: if the channel already reads back in the desired
    /// state, no state-changing traffic is issued.
    fn set_channel(&mut self, channel: u8, on: bool) -> Result<(), RelayError>;

    /// Switch every channel off with a single broadcast
    ///
    /// Fire-and-forget: no read-back, no per-channel verification.
    fn all_off(&mut self) -> Result<(), RelayError>;
}

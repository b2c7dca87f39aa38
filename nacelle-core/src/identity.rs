//! Firmware identity
//!
//! The identify command reports a fixed single-line description of the
//! running firmware. Hosts key on the field names, so the layout is
//! load-bearing.

/// Identity fields reported by the identify command
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// Firmware name, including the board flavor
    pub firmware_name: &'static str,
    /// Firmware version
    pub firmware_version: &'static str,
    /// Electronics platform tag
    pub electronics: &'static str,
    /// Build date tag
    pub firmware_date: &'static str,
}

impl Identity {
    /// Render the identity as the single-line identify response
    pub(crate) fn write_to<W: core::fmt::Write>(&self, out: &mut W) {
        let _ = write!(
            out,
            "FIRMWARE_NAME: {} FIRMWARE_VERSION: {} ELECTRONICS: {} FIRMWARE_DATE: {}\r\n",
            self.firmware_name, self.firmware_version, self.electronics, self.firmware_date,
        );
    }
}

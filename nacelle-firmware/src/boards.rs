//! Board flavor descriptors
//!
//! One binary crate serves every accessory board; a cargo feature picks
//! which devices get brought up and what the identify command reports.
//! When more than one flavor feature is enabled (the combo default plus
//! an explicit selection), the richer flavor wins.

use nacelle_core::identity::Identity;

#[cfg(not(any(
    feature = "board-combo",
    feature = "board-ring",
    feature = "board-vac"
)))]
compile_error!("select a board flavor: board-combo, board-ring, or board-vac");

#[cfg(feature = "board-combo")]
const FIRMWARE_NAME: &str = "Nacelle Combo Controller";
#[cfg(all(feature = "board-ring", not(feature = "board-combo")))]
const FIRMWARE_NAME: &str = "Nacelle Ring Controller";
#[cfg(all(
    feature = "board-vac",
    not(any(feature = "board-combo", feature = "board-ring"))
))]
const FIRMWARE_NAME: &str = "Nacelle Vac Controller";

/// Identity reported by the identify command
pub const IDENTITY: Identity = Identity {
    firmware_name: FIRMWARE_NAME,
    firmware_version: env!("CARGO_PKG_VERSION"),
    electronics: "Nacelle",
    firmware_date: "2025-06-02",
};

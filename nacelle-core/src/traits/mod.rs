//! Device capability traits
//!
//! These traits define the interface between the command dispatcher and
//! the hardware drivers. A board exposes whichever subset its hardware
//! actually carries.

pub mod light;
pub mod pressure;
pub mod relay;

pub use light::{LightError, LightStrip};
pub use pressure::{PressureError, PressureSensor};
pub use relay::{RelayBank, RelayError};

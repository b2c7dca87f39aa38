//! Command dispatch
//!
//! Maps parsed commands onto whichever devices the board carries. The
//! contract: a dispatched command performs exactly one hardware action
//! (with an optional printed acknowledgment) or performs nothing — never
//! a partial application.
//!
//! Acknowledgments go to the caller-supplied writer; errors come back
//! typed. The firmware drops errors silently (nothing is ever printed
//! for a failed command), but logs them on the debug probe.

use core::fmt;

use nacelle_protocol::{CommandClass, GcodeCommand};

use crate::identity::Identity;
use crate::traits::{LightError, LightStrip, PressureError, PressureSensor, RelayBank, RelayError};

/// Set-output command ID (relay channel on/off)
pub const M_SET_OUTPUT: u32 = 42;
/// Emergency-stop command ID (lights and relays off)
pub const M_EMERGENCY_STOP: u32 = 112;
/// Identify command ID (firmware identification line)
pub const M_IDENTIFY: u32 = 115;
/// Set-light command ID (intensity plus module selection)
pub const M_SET_LIGHT: u32 = 150;
/// Read-sensor command ID (pressure reading)
pub const M_READ_SENSOR: u32 = 308;

/// Errors surfaced by a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Relay driver failure
    Relay(RelayError),
    /// Pressure sensor failure
    Pressure(PressureError),
    /// Light strip failure
    Light(LightError),
}

impl From<RelayError> for DispatchError {
    fn from(e: RelayError) -> Self {
        Self::Relay(e)
    }
}

impl From<PressureError> for DispatchError {
    fn from(e: PressureError) -> Self {
        Self::Pressure(e)
    }
}

impl From<LightError> for DispatchError {
    fn from(e: LightError) -> Self {
        Self::Light(e)
    }
}

/// The devices one board exposes, plus its identity
///
/// This is the capability descriptor that unifies the board flavors: a
/// command addressing an absent device resolves to a no-op, so a single
/// dispatcher serves every flavor.
pub struct Toolhead<'d> {
    /// Identity reported by the identify command
    pub identity: Identity,
    /// Relay bank, if the board carries one
    pub relays: Option<&'d mut dyn RelayBank>,
    /// Pressure sensor, if the board carries one
    pub sensor: Option<&'d mut dyn PressureSensor>,
    /// Light strip, if the board carries one
    pub light: Option<&'d mut dyn LightStrip>,
}

/// Execute one parsed command against the tool head
///
/// Acknowledgment text (if any) is written to `out` only after the
/// hardware action succeeded. A command with missing required parameters
/// or addressing an absent device returns `Ok` having done nothing.
pub fn dispatch<W: fmt::Write>(
    cmd: &GcodeCommand,
    toolhead: &mut Toolhead<'_>,
    out: &mut W,
) -> Result<(), DispatchError> {
    // G commands decode but never act
    if cmd.class == CommandClass::G {
        return Ok(());
    }

    match cmd.id {
        M_SET_OUTPUT => set_output(cmd, toolhead, out),
        M_EMERGENCY_STOP => emergency_stop(toolhead, out),
        M_IDENTIFY => {
            toolhead.identity.write_to(out);
            Ok(())
        }
        M_SET_LIGHT => set_light(cmd, toolhead),
        M_READ_SENSOR => read_sensor(cmd, toolhead, out),
        _ => Ok(()),
    }
}

/// M42: drive one relay channel, keyed by `P` (pin) and `S` (value)
fn set_output<W: fmt::Write>(
    cmd: &GcodeCommand,
    toolhead: &mut Toolhead<'_>,
    out: &mut W,
) -> Result<(), DispatchError> {
    let Some(relays) = toolhead.relays.as_deref_mut() else {
        return Ok(());
    };
    let (Some(pin), Some(value)) = (cmd.params.get(b'P'), cmd.params.get(b'S')) else {
        return Ok(());
    };
    let Ok(channel) = u8::try_from(pin) else {
        return Err(RelayError::InvalidChannel.into());
    };

    let on = value != 0;
    relays.set_channel(channel, on)?;
    let _ = write!(out, "Relay{}: {}\r\n", channel, if on { "on" } else { "off" });
    Ok(())
}

/// M112: everything off on whatever devices are present
///
/// Both devices are driven even if the first one fails; the first error
/// wins the return value.
fn emergency_stop<W: fmt::Write>(
    toolhead: &mut Toolhead<'_>,
    out: &mut W,
) -> Result<(), DispatchError> {
    let mut first_err: Option<DispatchError> = None;

    if let Some(light) = toolhead.light.as_deref_mut() {
        if let Err(e) = light.set_intensity(0, 0) {
            first_err = Some(e.into());
        }
    }
    if let Some(relays) = toolhead.relays.as_deref_mut() {
        match relays.all_off() {
            Ok(()) => {
                let _ = write!(out, "Relays: off\r\n");
            }
            Err(e) => first_err = first_err.or(Some(e.into())),
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// M150: apply intensity `P` to the modules selected by `Q`
///
/// `Q` is optional; absent or zero means all modules. Only the low 8
/// bits of the mask are meaningful.
fn set_light(cmd: &GcodeCommand, toolhead: &mut Toolhead<'_>) -> Result<(), DispatchError> {
    let Some(light) = toolhead.light.as_deref_mut() else {
        return Ok(());
    };
    let Some(value) = cmd.params.get(b'P') else {
        return Ok(());
    };
    let mask = cmd.params.get(b'Q').unwrap_or(0) as u8;

    light.set_intensity(value, mask)?;
    Ok(())
}

/// M308: read the pressure sensor on bus `S`
fn read_sensor<W: fmt::Write>(
    cmd: &GcodeCommand,
    toolhead: &mut Toolhead<'_>,
    out: &mut W,
) -> Result<(), DispatchError> {
    let Some(sensor) = toolhead.sensor.as_deref_mut() else {
        return Ok(());
    };
    let Some(bus) = cmd.params.get(b'S') else {
        return Ok(());
    };
    let Ok(bus) = u8::try_from(bus) else {
        return Err(PressureError::InvalidBus.into());
    };

    let value = sensor.read(bus)?;
    let _ = write!(out, "Sensor{}: {}\r\n", bus, value);
    Ok(())
}

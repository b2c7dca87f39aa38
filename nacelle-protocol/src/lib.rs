//! G-code console protocol
//!
//! This crate implements the text side of the Nacelle accessory
//! controller: accumulating serial bytes into command lines and parsing
//! those lines into dispatchable commands.
//!
//! # Line grammar
//!
//! ```text
//! [N<line>] <class><id> [<letter><value> ...] [*<checksum>]
//! ```
//!
//! - Lines are ASCII, terminated by CR or LF, at most 254 content bytes.
//! - An optional trailing `*<n>` carries the XOR of every byte before the
//!   asterisk; a mismatch invalidates the whole line.
//! - The class letter is `G` (parsed, never acted on) or `M`.
//! - Parameters are single uppercase letters with a numeric value glued
//!   on: `P382`, `Q255`, `S0`. A value containing a decimal point is a
//!   fraction of full scale and is rescaled by 765.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod line;
pub mod parser;

pub use command::{CommandClass, GcodeCommand, ParamSet, MAX_PARAMS};
pub use line::{LineAccumulator, LineBuffer, MAX_LINE_LEN};
pub use parser::{parse_line, ParseError};

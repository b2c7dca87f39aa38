//! Command line parsing
//!
//! Turns a completed line into a [`GcodeCommand`] or an error. The caller
//! decides what an error means; in the firmware every parse error is a
//! silent drop.
//!
//! Parse order, matching the console grammar:
//! 1. Verify and strip the optional `*<checksum>` suffix.
//! 2. Split on spaces.
//! 3. Drop a leading `N<line>` token.
//! 4. Resolve the class letter and command ID.
//! 5. For `M` commands, decode the remaining tokens as parameters.

use crate::command::{CommandClass, GcodeCommand, ParamSet, FRACTION_SCALE};

/// Errors from command line parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Declared checksum does not match the computed one, or is unreadable
    ChecksumMismatch,
    /// No command token on the line
    Empty,
    /// Leading token is neither `G`, `M`, nor a skippable `N`
    UnknownClass,
}

/// Parse one complete command line (terminator already stripped)
pub fn parse_line(line: &[u8]) -> Result<GcodeCommand, ParseError> {
    let effective = verify_checksum(line)?;

    let mut tokens = effective.split(|&b| b == b' ').filter(|t| !t.is_empty());

    let mut first = tokens.next().ok_or(ParseError::Empty)?;

    // Skip line numbers
    if first[0] == b'N' {
        first = tokens.next().ok_or(ParseError::Empty)?;
    }

    let class = match first[0] {
        b'G' => CommandClass::G,
        b'M' => CommandClass::M,
        _ => return Err(ParseError::UnknownClass),
    };
    let id = dec_prefix(&first[1..]).unwrap_or(0);

    let mut params = ParamSet::new();
    if class == CommandClass::M {
        for token in tokens {
            let letter = token[0];
            if !letter.is_ascii_uppercase() {
                continue;
            }
            if let Some(value) = decode_value(&token[1..]) {
                params.insert(letter, value);
            }
        }
    }

    Ok(GcodeCommand { class, id, params })
}

/// Verify the optional `*<n>` suffix and return the line content before it
///
/// The checksum is the XOR of every byte preceding the asterisk. A line
/// without an asterisk passes through unchanged.
fn verify_checksum(line: &[u8]) -> Result<&[u8], ParseError> {
    let mut checksum = 0u8;
    for (i, &b) in line.iter().enumerate() {
        if b == b'*' {
            let declared =
                checksum_value(&line[i + 1..]).ok_or(ParseError::ChecksumMismatch)?;
            if declared != u32::from(checksum) {
                return Err(ParseError::ChecksumMismatch);
            }
            return Ok(&line[..i]);
        }
        checksum ^= b;
    }
    Ok(line)
}

/// Parse the declared checksum with auto base detection
///
/// Leading spaces are skipped; a `0x`/`0X` prefix selects hexadecimal,
/// anything else is decimal.
fn checksum_value(bytes: &[u8]) -> Option<u32> {
    let start = bytes.iter().position(|&b| b != b' ')?;
    let bytes = &bytes[start..];
    match bytes {
        [b'0', b'x' | b'X', rest @ ..] => hex_prefix(rest),
        _ => dec_prefix(bytes),
    }
}

/// Decode a parameter value
///
/// A value containing a decimal point is a fraction of full scale and is
/// rescaled by 765; anything else is a plain decimal integer. An
/// unreadable value decodes to nothing, so the parameter reads as absent.
fn decode_value(bytes: &[u8]) -> Option<u32> {
    if bytes.contains(&b'.') {
        let end = bytes
            .iter()
            .position(|&b| !(b.is_ascii_digit() || b == b'.'))
            .unwrap_or(bytes.len());
        let text = core::str::from_utf8(&bytes[..end]).ok()?;
        let fraction: f32 = text.parse().ok()?;
        Some((FRACTION_SCALE * fraction) as u32)
    } else {
        dec_prefix(bytes)
    }
}

/// Parse the leading run of decimal digits, saturating on overflow
fn dec_prefix(bytes: &[u8]) -> Option<u32> {
    let mut value: u32 = 0;
    let mut any = false;
    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(b - b'0'));
        any = true;
    }
    any.then_some(value)
}

/// Parse the leading run of hex digits, saturating on overflow
fn hex_prefix(bytes: &[u8]) -> Option<u32> {
    let mut value: u32 = 0;
    let mut any = false;
    for &b in bytes {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => break,
        };
        value = value.saturating_mul(16).saturating_add(digit);
        any = true;
    }
    any.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(s: &str) -> Result<GcodeCommand, ParseError> {
        parse_line(s.as_bytes())
    }

    #[test]
    fn test_basic_m_command() {
        let cmd = parse("M115").unwrap();
        assert_eq!(cmd.class, CommandClass::M);
        assert_eq!(cmd.id, 115);
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn test_g_command_captures_no_params() {
        let cmd = parse("G1 X10").unwrap();
        assert_eq!(cmd.class, CommandClass::G);
        assert_eq!(cmd.id, 1);
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn test_unknown_leading_token_rejected() {
        assert_eq!(parse("T0"), Err(ParseError::UnknownClass));
        assert_eq!(parse("hello"), Err(ParseError::UnknownClass));
    }

    #[test]
    fn test_empty_line_rejected() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_line_number_skipped() {
        let cmd = parse("N7 M115").unwrap();
        assert_eq!(cmd.class, CommandClass::M);
        assert_eq!(cmd.id, 115);
    }

    #[test]
    fn test_bare_line_number_rejected() {
        assert_eq!(parse("N7"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parameters_decoded() {
        let cmd = parse("M150 P382 Q255").unwrap();
        assert_eq!(cmd.params.get(b'P'), Some(382));
        assert_eq!(cmd.params.get(b'Q'), Some(255));
    }

    #[test]
    fn test_fractional_parameter_rescaled() {
        // 0.5 of full scale is 382 (truncating)
        let cmd = parse("M150 P0.5").unwrap();
        assert_eq!(cmd.params.get(b'P'), Some(382));

        let cmd = parse("M150 P1.0").unwrap();
        assert_eq!(cmd.params.get(b'P'), Some(765));

        let cmd = parse("M150 P0.0").unwrap();
        assert_eq!(cmd.params.get(b'P'), Some(0));
    }

    #[test]
    fn test_unreadable_parameter_reads_as_absent() {
        let cmd = parse("M150 Pabc Q255").unwrap();
        assert_eq!(cmd.params.get(b'P'), None);
        assert_eq!(cmd.params.get(b'Q'), Some(255));
    }

    #[test]
    fn test_lowercase_letter_ignored() {
        let cmd = parse("M150 p382").unwrap();
        assert_eq!(cmd.params.get(b'P'), None);
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn test_repeated_spaces_collapse() {
        let cmd = parse("M42   P0  S1").unwrap();
        assert_eq!(cmd.id, 42);
        assert_eq!(cmd.params.get(b'P'), Some(0));
        assert_eq!(cmd.params.get(b'S'), Some(1));
    }

    #[test]
    fn test_trailing_garbage_on_value_ignored() {
        let cmd = parse("M42 P0x S1").unwrap();
        assert_eq!(cmd.params.get(b'P'), Some(0));
        assert_eq!(cmd.params.get(b'S'), Some(1));
    }

    #[test]
    fn test_missing_id_decodes_as_zero() {
        let cmd = parse("M").unwrap();
        assert_eq!(cmd.id, 0);
    }

    #[test]
    fn test_checksum_accepted() {
        let cmd = parse("M150 P382 Q255*115").unwrap();
        assert_eq!(cmd.id, 150);
        assert_eq!(cmd.params.get(b'P'), Some(382));
        assert_eq!(cmd.params.get(b'Q'), Some(255));
    }

    #[test]
    fn test_checksum_hex_accepted() {
        let cmd = parse("M308 S0*0x35").unwrap();
        assert_eq!(cmd.id, 308);
        assert_eq!(cmd.params.get(b'S'), Some(0));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        assert_eq!(
            parse("M150 P382 Q255*116"),
            Err(ParseError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_unreadable_checksum_rejected() {
        assert_eq!(parse("M115*xyz"), Err(ParseError::ChecksumMismatch));
        assert_eq!(parse("M115*"), Err(ParseError::ChecksumMismatch));
    }

    #[test]
    fn test_everything_after_asterisk_excluded_from_command() {
        // The checksum suffix must not leak tokens into the parameter set
        let cmd = parse("M42 P0 S1*73").unwrap();
        assert_eq!(cmd.params.len(), 2);
    }

    proptest! {
        /// A line executes iff the declared checksum equals the XOR of the
        /// bytes before the asterisk.
        #[test]
        fn prop_checksum_gates_execution(
            content in proptest::collection::vec(0x20u8..0x7f, 1..60),
        ) {
            // Asterisks in the content would move the checksum boundary
            let content: std::vec::Vec<u8> =
                content.into_iter().filter(|&b| b != b'*').collect();
            prop_assume!(!content.is_empty());

            let checksum = content.iter().fold(0u8, |acc, &b| acc ^ b);

            let mut good = content.clone();
            good.push(b'*');
            good.extend_from_slice(itoa(checksum).as_bytes());
            prop_assert_eq!(parse_line(&good), parse_line(&content));

            let mut bad = content.clone();
            bad.push(b'*');
            bad.extend_from_slice(itoa(checksum.wrapping_add(1)).as_bytes());
            prop_assert_eq!(parse_line(&bad), Err(ParseError::ChecksumMismatch));
        }

        /// Fractional values never decode above full scale for fractions
        /// in [0, 1].
        #[test]
        fn prop_fraction_decode_bounded(numerator in 0u32..=1000) {
            let text = std::format!("M150 P0.{:03}", numerator.min(999));
            let cmd = parse_line(text.as_bytes()).unwrap();
            let value = cmd.params.get(b'P').unwrap();
            prop_assert!(value <= 765);
        }
    }

    fn itoa(value: u8) -> std::string::String {
        std::format!("{}", value)
    }
}

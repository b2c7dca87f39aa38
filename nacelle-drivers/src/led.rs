//! APA102 LED chain driver
//!
//! One update is one contiguous push: a zero start frame, a 4-byte frame
//! per module, and a run of trailing zeros long enough that the last
//! module in the chain has latched before the clock stops.
//!
//! The single intensity scalar is dithered across the three color lanes:
//! the lanes sum exactly to the input, so the chain resolves 766 levels
//! instead of a single lane's 256.

use heapless::Vec;
use nacelle_core::traits::{LightError, LightStrip};
use nacelle_hal::SpiTx;

/// Number of LED modules in the chain
pub const LED_COUNT: usize = 8;

/// Maximum intensity: three full 8-bit lanes
pub const MAX_INTENSITY: u32 = 765;

/// Brightness-mode byte leading every module frame
const FRAME_HEADER: u8 = 0xF0;

/// Transmit buffer length: 4-byte start frame, one frame per module,
/// trailing zeros to flush the whole chain
const BUF_LEN: usize = LED_COUNT * 4 + LED_COUNT + 8;

/// Split one intensity scalar into three lanes summing exactly to it
///
/// `a` takes the integer third, `b` half the remainder, `c` whatever is
/// left, so `b - c` is 0 or -1. Values above full scale clamp.
pub fn dither(value: u32) -> (u8, u8, u8) {
    let value = value.min(MAX_INTENSITY);
    let a = value / 3;
    let b = (value - a) / 2;
    let c = value - a - b;
    (a as u8, b as u8, c as u8)
}

/// Driver for a chain of APA102 modules on a serial-push bus
pub struct Apa102<S> {
    spi: S,
}

impl<S: SpiTx> Apa102<S> {
    /// Create a driver over the given transmitter
    pub fn new(spi: S) -> Self {
        Self { spi }
    }
}

impl<S: SpiTx> LightStrip for Apa102<S> {
    fn set_intensity(&mut self, value: u32, mask: u8) -> Result<(), LightError> {
        let frames = build_frames(value, mask);
        self.spi.write(&frames).map_err(|_| LightError::Bus)
    }
}

/// Build the full transmit buffer for one update
fn build_frames(value: u32, mask: u8) -> Vec<u8, BUF_LEN> {
    // All-zero mask means all modules selected
    let mask = if mask == 0 { 0xFF } else { mask };
    let (a, b, c) = dither(value);

    let mut buf: Vec<u8, BUF_LEN> = Vec::new();

    // Start frame
    let _ = buf.extend_from_slice(&[0x00; 4]);

    for module in 0..LED_COUNT {
        if mask & (1 << module) != 0 {
            let _ = buf.extend_from_slice(&[FRAME_HEADER, a, b, c]);
        } else {
            let _ = buf.extend_from_slice(&[FRAME_HEADER, 0x00, 0x00, 0x00]);
        }
    }

    // Keep the clock running until every module has latched its frame
    while buf.push(0x00).is_ok() {}

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct RecordingSpi {
        pushes: std::vec::Vec<std::vec::Vec<u8>>,
        fail: bool,
    }

    impl SpiTx for RecordingSpi {
        type Error = ();

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.pushes.push(data.to_vec());
            Ok(())
        }
    }

    /// The module frames of a pushed buffer, as (header, a, b, c) tuples
    fn frames(buf: &[u8]) -> std::vec::Vec<(u8, u8, u8, u8)> {
        assert_eq!(buf.len(), BUF_LEN);
        assert_eq!(&buf[..4], &[0, 0, 0, 0], "start frame must be zero");
        assert!(
            buf[4 + LED_COUNT * 4..].iter().all(|&b| b == 0),
            "trailing flush bytes must be zero"
        );
        buf[4..4 + LED_COUNT * 4]
            .chunks(4)
            .map(|f| (f[0], f[1], f[2], f[3]))
            .collect()
    }

    #[test]
    fn test_dither_examples() {
        assert_eq!(dither(0), (0, 0, 0));
        assert_eq!(dither(1), (0, 0, 1));
        assert_eq!(dither(382), (127, 127, 128));
        assert_eq!(dither(765), (255, 255, 255));
    }

    #[test]
    fn test_dither_clamps_above_full_scale() {
        assert_eq!(dither(1000), (255, 255, 255));
        assert_eq!(dither(u32::MAX), (255, 255, 255));
    }

    #[test]
    fn test_mask_zero_selects_all_modules() {
        let mut strip = Apa102::new(RecordingSpi::default());
        strip.set_intensity(382, 0).unwrap();

        assert_eq!(strip.spi.pushes.len(), 1);
        for frame in frames(&strip.spi.pushes[0]) {
            assert_eq!(frame, (FRAME_HEADER, 127, 127, 128));
        }
    }

    #[test]
    fn test_mask_selects_single_module() {
        let mut strip = Apa102::new(RecordingSpi::default());
        strip.set_intensity(765, 0x01).unwrap();

        let frames = frames(&strip.spi.pushes[0]);
        assert_eq!(frames[0], (FRAME_HEADER, 255, 255, 255));
        for frame in &frames[1..] {
            assert_eq!(*frame, (FRAME_HEADER, 0, 0, 0));
        }
    }

    #[test]
    fn test_mask_selects_high_bit_module() {
        let mut strip = Apa102::new(RecordingSpi::default());
        strip.set_intensity(300, 0x80).unwrap();

        let frames = frames(&strip.spi.pushes[0]);
        assert_eq!(frames[7], (FRAME_HEADER, 100, 100, 100));
        for frame in &frames[..7] {
            assert_eq!(*frame, (FRAME_HEADER, 0, 0, 0));
        }
    }

    #[test]
    fn test_zero_intensity_darkens_selected_modules() {
        let mut strip = Apa102::new(RecordingSpi::default());
        strip.set_intensity(0, 0).unwrap();

        for frame in frames(&strip.spi.pushes[0]) {
            assert_eq!(frame, (FRAME_HEADER, 0, 0, 0));
        }
    }

    #[test]
    fn test_one_push_per_update() {
        let mut strip = Apa102::new(RecordingSpi::default());
        strip.set_intensity(100, 0).unwrap();
        strip.set_intensity(200, 0x0F).unwrap();

        assert_eq!(strip.spi.pushes.len(), 2);
    }

    #[test]
    fn test_failed_push_surfaces_bus_error() {
        let mut strip = Apa102::new(RecordingSpi {
            fail: true,
            ..Default::default()
        });
        assert_eq!(strip.set_intensity(100, 0), Err(LightError::Bus));
    }

    proptest! {
        /// Lanes always sum back to the (clamped) input value, with the
        /// remainder bias on the third lane.
        #[test]
        fn prop_dither_preserves_value(value in 0u32..=765) {
            let (a, b, c) = dither(value);
            let (a, b, c) = (u32::from(a), u32::from(b), u32::from(c));

            prop_assert_eq!(a + b + c, value);
            prop_assert_eq!(a, value / 3);
            prop_assert!(b == c || b + 1 == c);
        }
    }
}

//! SPI transmitter implementation for embassy-rp
//!
//! The LED chain only ever receives, so the firmware opens the SPI
//! peripheral transmit-only and the blocking write maps straight onto
//! [`SpiTx`].

use embassy_rp::spi::{Error, Mode, Spi};

use nacelle_hal::spi::{Phase, Polarity, SpiConfig, SpiTx};

impl<M: Mode> SpiTx for Spi<'_, M> {
    type Error = Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.blocking_write(data)
    }
}

/// Translate the shared bus config into the embassy-rp peripheral config
pub fn config(shared: SpiConfig) -> embassy_rp::spi::Config {
    let mut config = embassy_rp::spi::Config::default();
    config.frequency = shared.frequency;
    config.polarity = match shared.polarity {
        Polarity::IdleLow => embassy_rp::spi::Polarity::IdleLow,
        Polarity::IdleHigh => embassy_rp::spi::Polarity::IdleHigh,
    };
    config.phase = match shared.phase {
        Phase::CaptureOnFirstTransition => embassy_rp::spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => embassy_rp::spi::Phase::CaptureOnSecondTransition,
    };
    config
}

//! Nacelle - Tool-Head Accessory Controller Firmware
//!
//! Main firmware binary for RP2040-based accessory boards. Reads a
//! G-code style command stream from the console UART and drives the
//! board's relays, pressure sensors, and ring light.
//!
//! The command loop is a single task: one byte in, and when a line
//! completes, one synchronous run-to-completion dispatch before the
//! next byte is considered.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartTx, Config as UartConfig, Uart};
use embassy_time::Timer;
use embedded_io_async::{Read, Write};
use heapless::String;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nacelle_core::dispatch::{dispatch, Toolhead};
use nacelle_protocol::{parse_line, LineAccumulator};

#[cfg(any(feature = "board-combo", feature = "board-vac"))]
use core::cell::RefCell;
#[cfg(any(feature = "board-combo", feature = "board-vac"))]
use embassy_rp::i2c::I2c;
#[cfg(any(feature = "board-combo", feature = "board-ring"))]
use embassy_rp::spi::Spi;
#[cfg(any(feature = "board-combo", feature = "board-ring"))]
use nacelle_core::traits::LightStrip;
#[cfg(any(feature = "board-combo", feature = "board-vac"))]
use nacelle_core::traits::RelayBank;
#[cfg(any(feature = "board-combo", feature = "board-ring"))]
use nacelle_drivers::Apa102;
#[cfg(any(feature = "board-combo", feature = "board-vac"))]
use nacelle_drivers::{QuadRelay, SensorPair};
#[cfg(any(feature = "board-combo", feature = "board-ring"))]
use nacelle_hal::SpiConfig;
#[cfg(any(feature = "board-combo", feature = "board-vac"))]
use nacelle_hal::{I2cConfig, SharedBus};

mod boards;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Upper bound on one command's acknowledgment text
const ACK_BUF_SIZE: usize = 160;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Nacelle firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Console UART on GP0/GP1, 115200 8N1 default
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (mut tx, mut rx) = uart.split();
    info!("Console UART initialized");

    // Addressed buses: the relay board and sensor 0 share I2C0,
    // sensor 1 has I2C1 to itself
    #[cfg(any(feature = "board-combo", feature = "board-vac"))]
    let i2c0 = RefCell::new(I2c::new_blocking(
        p.I2C0,
        p.PIN_5,
        p.PIN_4,
        nacelle_hal_rp2040::i2c::config(I2cConfig::FAST),
    ));
    #[cfg(any(feature = "board-combo", feature = "board-vac"))]
    let i2c1 = RefCell::new(I2c::new_blocking(
        p.I2C1,
        p.PIN_7,
        p.PIN_6,
        nacelle_hal_rp2040::i2c::config(I2cConfig::FAST),
    ));
    #[cfg(any(feature = "board-combo", feature = "board-vac"))]
    let mut relays = QuadRelay::new(SharedBus::new(&i2c0));
    #[cfg(any(feature = "board-combo", feature = "board-vac"))]
    let mut sensor = SensorPair::new(SharedBus::new(&i2c0), SharedBus::new(&i2c1));

    // Serial-push bus for the ring light on GP2 (clock) / GP3 (data)
    #[cfg(any(feature = "board-combo", feature = "board-ring"))]
    let mut light = Apa102::new(Spi::new_blocking_txonly(
        p.SPI0,
        p.PIN_2,
        p.PIN_3,
        nacelle_hal_rp2040::spi::config(SpiConfig::default()),
    ));

    // Give the accessory boards time to come up after power-on
    Timer::after_millis(50).await;

    // Known state before the first command: everything off
    #[cfg(any(feature = "board-combo", feature = "board-vac"))]
    match relays.all_off() {
        Ok(()) => {
            let _ = tx.write_all(b"Relays: off\r\n").await;
        }
        Err(e) => warn!("Relay clear failed at startup: {:?}", e),
    }
    #[cfg(any(feature = "board-combo", feature = "board-ring"))]
    if let Err(e) = light.set_intensity(0, 0) {
        warn!("LED clear failed at startup: {:?}", e);
    }

    let mut toolhead = Toolhead {
        identity: boards::IDENTITY,
        relays: None,
        sensor: None,
        light: None,
    };
    #[cfg(any(feature = "board-combo", feature = "board-vac"))]
    {
        toolhead.relays = Some(&mut relays);
        toolhead.sensor = Some(&mut sensor);
    }
    #[cfg(any(feature = "board-combo", feature = "board-ring"))]
    {
        toolhead.light = Some(&mut light);
    }

    info!("Entering command loop");

    let mut accumulator = LineAccumulator::new();
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(n) if n > 0 => {
                if let Some(line) = accumulator.push(byte[0]) {
                    handle_line(&line, &mut toolhead, &mut tx).await;
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Console read error: {:?}", e),
        }
    }
}

/// Parse and dispatch one completed command line
///
/// A malformed line or a failed device never answers on the console;
/// only the debug probe hears about it.
async fn handle_line(line: &[u8], toolhead: &mut Toolhead<'_>, tx: &mut BufferedUartTx) {
    let cmd = match parse_line(line) {
        Ok(cmd) => cmd,
        Err(e) => {
            debug!("Dropped line: {:?}", e);
            return;
        }
    };

    let mut ack: String<ACK_BUF_SIZE> = String::new();
    if let Err(e) = dispatch(&cmd, toolhead, &mut ack) {
        warn!("Command failed: {:?}", e);
    }
    // Whatever acknowledgments the completed actions produced still go out
    if !ack.is_empty() {
        let _ = tx.write_all(ack.as_bytes()).await;
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! The debug port is split in two: [`DiagPort`] is the transmit half every loop writes its
//! diagnostic lines to, [`CommandPort`] the receive half the command loop polls for frames.
//!
//! Note: When using `write!`/`writeln!`, be sure to include `\r` (CR) in the format string to
//! ensure correct line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

use rccar_core::hal::ByteSource;

/// Split a configured serial port into its diagnostic and command halves.
pub fn split<U: Instance, PINS: Pins<U>>(serial: Serial<U, PINS>) -> (DiagPort<U>, CommandPort<U>) {
    let (tx, rx) = serial.split();
    (DiagPort { tx }, CommandPort { rx })
}

pub struct DiagPort<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> DiagPort<U> {
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `DiagPort`.
impl<U: Instance> fmt::Write for DiagPort<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        DiagPort::write_str(self, s);
        Ok(())
    }
}

pub struct CommandPort<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> ByteSource for CommandPort<U> {
    fn read_byte(&mut self) -> Option<u8> {
        match self.rx.read() {
            Ok(b) => Some(b),
            // Framing/overrun errors drop the byte; the parser resyncs on the next start byte.
            Err(nb::Error::Other(_)) | Err(nb::Error::WouldBlock) => None,
        }
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Independent watchdog, used only to force a reset on a fatal error.

use stm32f7xx_hal::pac::IWDG;

use rccar_core::hal::ResetControl;

const KEY_START: u32 = 0xCCCC;
const KEY_UNLOCK: u32 = 0x5555;
const KEY_RELOAD: u32 = 0xAAAA;

/// LSI (~32 kHz) divided by 32: about one reload count per millisecond.
const PRESCALER_DIV32: u32 = 0b011;
const MAX_RELOAD: u32 = 0x0FFF;

pub struct Watchdog {
    iwdg: IWDG,
}

impl Watchdog {
    /// Take the peripheral. The watchdog is not started until it is armed.
    pub fn new(iwdg: IWDG) -> Self {
        Self { iwdg }
    }
}

impl ResetControl for Watchdog {
    fn arm_watchdog(&mut self, timeout_ms: u32) {
        let iwdg = &self.iwdg;

        // Starting the IWDG also starts the LSI.
        iwdg.kr.write(|w| unsafe { w.bits(KEY_START) });
        iwdg.kr.write(|w| unsafe { w.bits(KEY_UNLOCK) });
        iwdg.pr.write(|w| unsafe { w.bits(PRESCALER_DIV32) });
        iwdg.rlr
            .write(|w| unsafe { w.bits(timeout_ms.clamp(1, MAX_RELOAD)) });

        // Wait for both registers to reach the LSI domain
        while iwdg.sr.read().bits() & 0b11 != 0 {}

        iwdg.kr.write(|w| unsafe { w.bits(KEY_RELOAD) });
    }

    fn spin_until_reset(&mut self) -> ! {
        cortex_m::interrupt::disable();
        loop {
            cortex_m::asm::nop();
        }
    }
}

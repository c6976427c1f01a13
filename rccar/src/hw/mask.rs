// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! NVIC line mask for the cells shared with the TIM3 capture handler.

use cortex_m::peripheral::NVIC;
use stm32f7xx_hal::pac::Interrupt;

use rccar_core::sync::IrqMask;

/// Masks only the TIM3 line, so the other interrupts keep their latency while a loop reads the
/// echo cells.
#[derive(Copy, Clone, Debug, Default)]
pub struct Tim3Mask;

impl IrqMask for Tim3Mask {
    /// Whether the line was enabled before masking.
    type Saved = bool;

    #[inline]
    unsafe fn mask(&self) -> bool {
        let was_enabled = NVIC::is_enabled(Interrupt::TIM3);
        NVIC::mask(Interrupt::TIM3);
        cortex_m::asm::dsb();
        cortex_m::asm::isb();
        was_enabled
    }

    #[inline]
    unsafe fn restore(&self, was_enabled: bool) {
        if was_enabled {
            NVIC::unmask(Interrupt::TIM3);
        }
    }
}

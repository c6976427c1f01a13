// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TIM3 channel 1 input capture for the ultrasonic echo line (PA6, AF2).
//!
//! The timer is split the way the serial port is: [`Tim3Setup`] owns the peripheral and is used
//! by the ranging loop to (re)arm the capture, [`Tim3Isr`] is created inside the TIM3 handler and
//! only touches the registers the handler needs.

use cortex_m::peripheral::NVIC;
use stm32f7xx_hal::{
    gpio::{gpioa, Alternate},
    pac::{self, Interrupt, TIM3},
};

use rccar_core::hal::{CaptureSetup, CaptureTimer, Edge};

#[inline]
fn regs() -> &'static pac::tim3::RegisterBlock {
    // SAFETY: the two halves write disjoint bits, and the setup half only runs with TIM3 masked.
    unsafe { &*TIM3::ptr() }
}

#[inline]
fn set_polarity(tim: &pac::tim3::RegisterBlock, edge: Edge) {
    let falling = edge == Edge::Falling;
    tim.ccer
        .modify(|_, w| w.cc1p().bit(falling).cc1np().clear_bit());
}

pub struct Tim3Setup {
    tim: TIM3,
    _echo: gpioa::PA6<Alternate<2>>,
}

impl Tim3Setup {
    /// Power TIM3 and route channel 1 to TI1. Counting starts at the first
    /// [`configure`](CaptureSetup::configure).
    pub fn new(tim3: TIM3, echo: gpioa::PA6<Alternate<2>>) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;
        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.dier.modify(|_, w| w.cc1ie().clear_bit());

        // CH1 as input from TI1, no filter, no input prescaler
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1());

        Self { tim, _echo: echo }
    }

    /// Consume the wrapper and return the timer and the echo pin.
    #[inline]
    pub fn free(self) -> (TIM3, gpioa::PA6<Alternate<2>>) {
        (self.tim, self._echo)
    }
}

impl CaptureSetup for Tim3Setup {
    fn configure(&mut self, prescaler: u16, edge: Edge) {
        let tim = &self.tim;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc
            .write(|w| unsafe { w.bits(prescaler.saturating_sub(1) as u32) });

        // Auto-reload: max 16-bit
        tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

        set_polarity(tim, edge);
        tim.ccer.modify(|_, w| w.cc1e().set_bit());

        // Latch the prescaler now instead of at the next overflow
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    fn clear_capture_flag(&mut self) {
        self.tim
            .sr
            .modify(|_, w| w.cc1if().clear_bit().cc1of().clear_bit());
    }

    fn enable_capture_interrupt(&mut self) {
        self.tim.dier.modify(|_, w| w.cc1ie().set_bit());
        unsafe { NVIC::unmask(Interrupt::TIM3) };
    }
}

/// Interrupt half of the capture timer.
pub struct Tim3Isr {
    _private: (),
}

impl Tim3Isr {
    /// # Safety
    ///
    /// Only call from the TIM3 interrupt handler, and only once [`Tim3Setup`] exists.
    pub unsafe fn conjure() -> Self {
        Self { _private: () }
    }
}

impl CaptureTimer for Tim3Isr {
    #[inline]
    fn count(&mut self) -> u16 {
        // Reading CCR1 also clears CC1IF.
        regs().ccr1().read().bits() as u16
    }

    #[inline]
    fn set_edge(&mut self, edge: Edge) {
        set_polarity(regs(), edge);
    }

    #[inline]
    fn reset_count(&mut self) {
        regs().cnt.write(|w| unsafe { w.bits(0) });
    }
}

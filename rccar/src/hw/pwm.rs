// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 50 Hz servo-style PWM on TIM4.
//!
//! The timer ticks at 1 MHz with a 20 ms period, so a compare value is a pulse width in
//! microseconds. Channel 1 (PD12) drives the ESC, channel 2 (PD13) the steering servo.

use stm32f7xx_hal::{
    gpio::{gpiod, Alternate},
    pac::{self, TIM4},
    rcc::Clocks,
};

const PERIOD_US: u32 = 20_000;

/// Something that emits a pulse of a given width every period.
pub trait PulseOutput {
    fn set_pulse_us(&mut self, us: u16);
}

pub struct Pwm50Hz {
    tim: TIM4,
}

impl Pwm50Hz {
    /// Configure TIM4 channels 1 and 2 in PWM mode 1 at 50 Hz. Outputs stay low until a pulse
    /// width is set.
    pub fn tim4(tim4: TIM4, clocks: &Clocks) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = clocks.timclk1().raw() / 1_000_000 - 1;
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(PERIOD_US - 1) });

        // PWM mode 1 with preload on CH1/CH2
        tim.ccmr1_output().modify(|_, w| unsafe {
            w.oc1m()
                .bits(0b110)
                .oc1pe()
                .set_bit()
                .oc2m()
                .bits(0b110)
                .oc2pe()
                .set_bit()
        });
        tim.ccr1().write(|w| unsafe { w.bits(0) });
        tim.ccr2().write(|w| unsafe { w.bits(0) });
        tim.ccer.modify(|_, w| w.cc1e().set_bit().cc2e().set_bit());

        tim.cr1.modify(|_, w| w.arpe().set_bit());
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Hand out the two channels, taking ownership of their pins.
    pub fn split(
        self,
        ch1: gpiod::PD12<Alternate<2>>,
        ch2: gpiod::PD13<Alternate<2>>,
    ) -> (PwmChannel<1, gpiod::PD12<Alternate<2>>>, PwmChannel<2, gpiod::PD13<Alternate<2>>>) {
        (
            PwmChannel { _pin: ch1 },
            PwmChannel { _pin: ch2 },
        )
    }
}

/// One TIM4 compare channel.
pub struct PwmChannel<const CH: u8, PIN> {
    _pin: PIN,
}

impl<const CH: u8, PIN> PulseOutput for PwmChannel<CH, PIN> {
    fn set_pulse_us(&mut self, us: u16) {
        // SAFETY: each channel only writes its own compare register.
        let tim = unsafe { &*TIM4::ptr() };
        let us = (us as u32).min(PERIOD_US);
        match CH {
            1 => tim.ccr1().write(|w| unsafe { w.bits(us) }),
            _ => tim.ccr2().write(|w| unsafe { w.bits(us) }),
        }
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the RC car on the STM32F767ZI board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiod, Alternate},
    pac,
    prelude::*,
};

use crate::hw::Trigger;

/// All board pins. Construct this once at startup using:
///
/// ```rust,ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub usart3: Usart3Pins,
    pub ranger: RangerPins,
    pub drive: DrivePins,
}

/// Debug/command serial (ST-LINK virtual COM port)
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Ultrasonic sensor
pub struct RangerPins {
    pub echo: gpioa::PA6<Alternate<2>>, // TIM3_CH1
    pub trigger: Trigger<'A', 7>,
}

/// ESC and steering servo
pub struct DrivePins {
    pub esc: gpiod::PD12<Alternate<2>>,   // TIM4_CH1 (PWM)
    pub servo: gpiod::PD13<Alternate<2>>, // TIM4_CH2 (PWM)
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();

        Self {
            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            ranger: RangerPins {
                echo: gpioa.pa6.into_alternate::<2>(),
                trigger: Trigger::new(gpioa.pa7),
            },

            drive: DrivePins {
                esc: gpiod.pd12.into_alternate::<2>(),
                servo: gpiod.pd13.into_alternate::<2>(),
            },
        }
    }
}

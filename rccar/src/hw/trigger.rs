// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Push-pull output for the ultrasonic sensor's trigger input.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Output, PinState, PushPull};

/// Trigger line, generic over any GPIO pin. Starts low.
pub struct Trigger<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> Trigger<P, N> {
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::Low);
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for Trigger<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for Trigger<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}

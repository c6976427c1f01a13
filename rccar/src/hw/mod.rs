// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU Peripherals
//!
//! Thin wrappers that implement the `rccar_core::hal` traits on STM32F767 registers.

pub mod capture;
pub mod mask;
pub mod pins;
pub mod pwm;
pub mod trigger;
pub mod usart;
pub mod watchdog;

pub use capture::{Tim3Isr, Tim3Setup};
pub use mask::Tim3Mask;
pub use pins::BoardPins;
pub use pwm::{PulseOutput, Pwm50Hz, PwmChannel};
pub use trigger::Trigger;
pub use usart::{CommandPort, DiagPort};
pub use watchdog::Watchdog;

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware seams implemented by the board crate (and by mocks in tests).
//!
//! The trigger output is a plain [`embedded_hal::digital::OutputPin`]; everything else the core
//! needs from the MCU is one of the small traits below.

/// Input-capture edge sensitivity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Setup half of the echo capture timer, used from main context with the capture interrupt
/// masked.
pub trait CaptureSetup {
    /// Stop the timer, load `prescaler` (divide ratio, >= 1), select capture on `edge` and restart
    /// counting from zero. Leaves the capture interrupt as it was.
    fn configure(&mut self, prescaler: u16, edge: Edge);

    /// Drop any capture event latched before the timer was (re)configured.
    fn clear_capture_flag(&mut self);

    /// Let capture events reach the interrupt handler.
    fn enable_capture_interrupt(&mut self);
}

/// Interrupt half of the echo capture timer, used only from the capture handler.
pub trait CaptureTimer {
    /// Timer count latched by the capture event that raised the interrupt.
    fn count(&mut self) -> u16;

    /// Reprogram which edge the next capture fires on.
    fn set_edge(&mut self, edge: Edge);

    /// Restart the free-running counter from zero.
    fn reset_count(&mut self);
}

/// An output driven from a signed setpoint (ESC throttle, steering servo).
pub trait Actuator {
    /// One-time output setup, run from the owning loop's initial state.
    fn init(&mut self);

    /// Drive the output for `value`, already clamped to the loop's limits.
    fn apply(&mut self, value: i8);
}

/// Non-blocking byte input for the command loop.
pub trait ByteSource {
    /// Next received byte, or `None` if nothing is pending.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Hard-reset capability used by the fatal-state path.
pub trait ResetControl {
    /// Start the hardware watchdog with the given timeout. It is never fed afterwards.
    fn arm_watchdog(&mut self, timeout_ms: u32);

    /// Wait for the watchdog to reset the device.
    fn spin_until_reset(&mut self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fatal-state handling: report once, then let the watchdog restart the board.
//!
//! There is no recovery path. A restart loses every setpoint; the loops come back up in their
//! setup states with the cells at their initial values.

use core::fmt;

use crate::config::timing::WATCHDOG_TIMEOUT_MS;
use crate::hal::ResetControl;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FatalError {
    /// A loop's state register holds a value its dispatch does not handle.
    IllegalState { task: &'static str, state: u8 },
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::IllegalState { task, state } => {
                write!(f, "Illegal state {} in {}! Resetting", state, task)
            }
        }
    }
}

/// Write one diagnostic line for `err`, arm the watchdog and wait for it to reset the device.
pub fn fail_fast<W, R>(diag: &mut W, reset: &mut R, err: &FatalError) -> !
where
    W: fmt::Write + ?Sized,
    R: ResetControl + ?Sized,
{
    let _ = write!(diag, "{}\r\n", err);
    reset.arm_watchdog(WATCHDOG_TIMEOUT_MS);
    reset.spin_until_reset()
}

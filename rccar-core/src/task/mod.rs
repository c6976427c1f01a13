// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Cooperative Control Loops
//!
//! Every control loop on the car has the same shape: a state register starting at 0 (one-time
//! setup), one dispatch per wake-up, then a delay before the next wake-up. Loops never finish.
//!
//! - [`control_loop`] - [`ControlLoop`], the single concrete loop type, and the [`Dispatch`]
//!   trait each loop body implements.
//! - [`scheduler`] - [`Scheduler`], runs due loops in priority order.
//! - [`fatal`] - [`FatalError`] and [`fail_fast`], the log-then-watchdog-reset path for a state
//!   register holding a value its loop does not know.

pub mod control_loop;
pub mod fatal;
pub mod scheduler;

pub use control_loop::{ControlLoop, Dispatch, LoopState, Task};
pub use fatal::{fail_fast, FatalError};
pub use scheduler::Scheduler;

/// Scheduling priority; larger runs first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Priority(pub u8);

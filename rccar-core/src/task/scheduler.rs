// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-priority scheduler for the control loops.
//!
//! The scheduler does not own a clock. The caller passes the current time in milliseconds to
//! [`Scheduler::poll`], which runs every due loop once, highest priority first, and returns how
//! long the caller may sleep before polling again:
//!
//! ```no_run
//! # use rccar_core::task::{Scheduler, Task};
//! # fn run(mut scheduler: Scheduler<'_, 1>, diag: &mut String,
//! #        wdt: &mut impl rccar_core::hal::ResetControl, sleep: impl Fn(u32)) -> ! {
//! let mut now_ms = 0u32;
//! loop {
//!     let idle = scheduler.poll(now_ms, diag, wdt).max(1);
//!     sleep(idle);
//!     now_ms = now_ms.wrapping_add(idle);
//! }
//! # }
//! ```
//!
//! Loops with equal priority run in registration order.

use core::fmt;

use crate::hal::ResetControl;
use crate::task::{fail_fast, Task};

pub struct Scheduler<'a, const N: usize> {
    tasks: [&'a mut dyn Task; N],
    /// `None` until the loop first runs.
    next_due: [Option<u32>; N],
    order: [usize; N],
}

impl<'a, const N: usize> Scheduler<'a, N> {
    /// Register the loops. All of them are due immediately.
    pub fn new(tasks: [&'a mut dyn Task; N]) -> Self {
        let mut order = [0usize; N];
        for (i, slot) in order.iter_mut().enumerate() {
            *slot = i;
        }

        // Stable insertion sort, highest priority first.
        for i in 1..N {
            let mut j = i;
            while j > 0 && tasks[order[j - 1]].priority() < tasks[order[j]].priority() {
                order.swap(j - 1, j);
                j -= 1;
            }
        }

        Self {
            tasks,
            next_due: [None; N],
            order,
        }
    }

    /// Run every loop due at `now_ms`, in priority order, and return the milliseconds until the
    /// next one is due (0 if one already is).
    ///
    /// A loop reporting a fatal error never returns here: the error goes to [`fail_fast`], which
    /// logs it to `diag` and hands the board to the watchdog via `reset`.
    pub fn poll<W, R>(&mut self, now_ms: u32, diag: &mut W, reset: &mut R) -> u32
    where
        W: fmt::Write,
        R: ResetControl,
    {
        for &i in self.order.iter() {
            if !is_due(now_ms, self.next_due[i]) {
                continue;
            }
            match self.tasks[i].run_once(&mut *diag) {
                Ok(delay) => self.next_due[i] = Some(now_ms.wrapping_add(delay)),
                Err(err) => fail_fast(diag, reset, &err),
            }
        }

        self.idle_ms(now_ms)
    }

    /// Milliseconds from `now_ms` until the earliest loop is due.
    pub fn idle_ms(&self, now_ms: u32) -> u32 {
        self.next_due
            .iter()
            .map(|&due| match due {
                Some(at) if !is_due(now_ms, due) => at.wrapping_sub(now_ms),
                _ => 0,
            })
            .min()
            .unwrap_or(0)
    }

    /// Registered loops in dispatch order.
    pub fn tasks(&self) -> impl Iterator<Item = &(dyn Task + 'a)> + '_ {
        self.order.iter().map(move |&i| &*self.tasks[i])
    }
}

/// Wrapping "has `due` been reached", valid while the two are less than 2^31 ms apart. A loop
/// that never ran is always due.
#[inline]
fn is_due(now_ms: u32, due: Option<u32>) -> bool {
    match due {
        Some(at) => (now_ms.wrapping_sub(at) as i32) >= 0,
        None => true,
    }
}

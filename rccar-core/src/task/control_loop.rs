// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The control-loop contract.
//!
//! A loop body implements [`Dispatch`]: given the current state, do one step's work and return the
//! next state. [`ControlLoop`] owns everything else: the raw state register, the name, priority and
//! period, and the run counter. It decodes the register before every dispatch, and a value that
//! does not decode is reported as [`FatalError::IllegalState`] instead of being skipped.
//!
//! Typical body:
//!
//! ```no_run
//! # use core::fmt;
//! # use rccar_core::task::{Dispatch, LoopState};
//! #[derive(Copy, Clone)]
//! enum Blink { Setup, Run }
//!
//! impl LoopState for Blink {
//!     fn from_raw(raw: u8) -> Option<Self> {
//!         match raw {
//!             0 => Some(Blink::Setup),
//!             1 => Some(Blink::Run),
//!             _ => None,
//!         }
//!     }
//!     fn raw(self) -> u8 {
//!         self as u8
//!     }
//! }
//!
//! struct Blinker { on: bool }
//!
//! impl Dispatch for Blinker {
//!     type State = Blink;
//!     fn dispatch(&mut self, state: Blink, _diag: &mut dyn fmt::Write) -> Blink {
//!         match state {
//!             Blink::Setup => Blink::Run,
//!             Blink::Run => {
//!                 self.on = !self.on;
//!                 Blink::Run
//!             }
//!         }
//!     }
//! }
//! ```

use core::fmt;

use crate::task::{FatalError, Priority};

/// A loop's state enum. Raw value 0 is always the setup state.
pub trait LoopState: Copy {
    fn from_raw(raw: u8) -> Option<Self>;
    fn raw(self) -> u8;
}

/// One loop body.
pub trait Dispatch {
    type State: LoopState;

    /// Run one step in `state` and return the state for the next wake-up.
    fn dispatch(&mut self, state: Self::State, diag: &mut dyn fmt::Write) -> Self::State;

    /// Delay before the next wake-up after entering `next`. Defaults to the loop's fixed period.
    fn delay_ms(&self, _next: Self::State, period_ms: u32) -> u32 {
        period_ms
    }
}

/// Object-safe view of a loop, as held by the [`Scheduler`](crate::task::Scheduler).
pub trait Task {
    fn name(&self) -> &'static str;
    fn priority(&self) -> Priority;

    /// Raw state register.
    fn state(&self) -> u8;

    /// Completed dispatches, wrapping.
    fn runs(&self) -> u32;

    /// Dispatch once and return the delay until the next wake-up.
    fn run_once(&mut self, diag: &mut dyn fmt::Write) -> Result<u32, FatalError>;
}

pub struct ControlLoop<D> {
    name: &'static str,
    priority: Priority,
    period_ms: u32,
    state: u8,
    runs: u32,
    body: D,
}

impl<D: Dispatch> ControlLoop<D> {
    pub fn new(name: &'static str, priority: Priority, period_ms: u32, body: D) -> Self {
        Self {
            name,
            priority,
            period_ms,
            state: 0,
            runs: 0,
            body,
        }
    }

    /// Overwrite the state register. The value is checked at the next dispatch.
    #[inline]
    pub fn transition_to(&mut self, raw: u8) {
        self.state = raw;
    }

    /// Decoded current state, if the register holds a known value.
    #[inline]
    pub fn current(&self) -> Option<D::State> {
        D::State::from_raw(self.state)
    }

    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[inline]
    pub fn body(&self) -> &D {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut D {
        &mut self.body
    }
}

impl<D: Dispatch> Task for ControlLoop<D> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn state(&self) -> u8 {
        self.state
    }

    fn runs(&self) -> u32 {
        self.runs
    }

    fn run_once(&mut self, diag: &mut dyn fmt::Write) -> Result<u32, FatalError> {
        let state = D::State::from_raw(self.state).ok_or(FatalError::IllegalState {
            task: self.name,
            state: self.state,
        })?;

        let next = self.body.dispatch(state, diag);
        self.state = next.raw();
        self.runs = self.runs.wrapping_add(1);

        Ok(self.body.delay_ms(next, self.period_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Phase {
        Setup,
        Count,
        Rest,
    }

    impl LoopState for Phase {
        fn from_raw(raw: u8) -> Option<Self> {
            match raw {
                0 => Some(Phase::Setup),
                1 => Some(Phase::Count),
                2 => Some(Phase::Rest),
                _ => None,
            }
        }

        fn raw(self) -> u8 {
            self as u8
        }
    }

    #[derive(Default)]
    struct Counter {
        setups: u32,
        counts: u32,
    }

    impl Dispatch for Counter {
        type State = Phase;

        fn dispatch(&mut self, state: Phase, _diag: &mut dyn fmt::Write) -> Phase {
            match state {
                Phase::Setup => {
                    self.setups += 1;
                    Phase::Count
                }
                Phase::Count => {
                    self.counts += 1;
                    if self.counts % 3 == 0 {
                        Phase::Rest
                    } else {
                        Phase::Count
                    }
                }
                Phase::Rest => Phase::Count,
            }
        }

        fn delay_ms(&self, next: Phase, period_ms: u32) -> u32 {
            match next {
                Phase::Rest => period_ms * 10,
                _ => period_ms,
            }
        }
    }

    #[test]
    fn starts_in_setup_and_runs_it_once() {
        let mut lp = ControlLoop::new("Counter", Priority(3), 5, Counter::default());
        let mut diag = String::new();

        assert_eq!(lp.state(), 0);
        assert_eq!(lp.run_once(&mut diag), Ok(5));
        assert_eq!(lp.current(), Some(Phase::Count));
        assert_eq!(lp.body().setups, 1);

        lp.run_once(&mut diag).unwrap();
        lp.run_once(&mut diag).unwrap();
        assert_eq!(lp.body().setups, 1);
        assert_eq!(lp.runs(), 3);
    }

    #[test]
    fn delay_can_be_computed_from_next_state() {
        let mut lp = ControlLoop::new("Counter", Priority(3), 5, Counter::default());
        let mut diag = String::new();
        lp.transition_to(Phase::Count.raw());

        assert_eq!(lp.run_once(&mut diag), Ok(5));
        assert_eq!(lp.run_once(&mut diag), Ok(5));
        assert_eq!(lp.run_once(&mut diag), Ok(50));
        assert_eq!(lp.current(), Some(Phase::Rest));
    }

    #[test]
    fn unknown_state_is_reported_not_skipped() {
        let mut lp = ControlLoop::new("Counter", Priority(3), 5, Counter::default());
        let mut diag = String::new();
        lp.transition_to(7);

        let err = lp.run_once(&mut diag).unwrap_err();
        assert_eq!(
            err,
            FatalError::IllegalState {
                task: "Counter",
                state: 7
            }
        );
        assert_eq!(lp.runs(), 0);
        assert_eq!(lp.state(), 7);
        assert_eq!(lp.body().counts, 0);
    }

    #[test]
    fn re_entering_setup_runs_it_again() {
        let mut lp = ControlLoop::new("Counter", Priority(3), 5, Counter::default());
        let mut diag = String::new();
        lp.run_once(&mut diag).unwrap();
        lp.transition_to(0);
        lp.run_once(&mut diag).unwrap();
        assert_eq!(lp.body_mut().setups, 2);
    }
}

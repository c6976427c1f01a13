// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Actuation loops: one setpoint cell in, one [`Actuator`] out.

use core::fmt;

use crate::hal::Actuator;
use crate::sync::{IrqMask, SharedCell};
use crate::task::{Dispatch, LoopState};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActuationState {
    Init = 0,
    Run = 1,
}

impl LoopState for ActuationState {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ActuationState::Init),
            1 => Some(ActuationState::Run),
            _ => None,
        }
    }

    fn raw(self) -> u8 {
        self as u8
    }
}

pub struct ActuationLoop<'a, A, M> {
    actuator: A,
    setpoint: &'a SharedCell<i8, M>,
    min: i8,
    max: i8,
    applied: Option<i8>,
}

impl<'a, A: Actuator, M: IrqMask> ActuationLoop<'a, A, M> {
    /// `limits` is the inclusive `(min, max)` range the setpoint is clamped to.
    pub fn new(actuator: A, setpoint: &'a SharedCell<i8, M>, limits: (i8, i8)) -> Self {
        Self {
            actuator,
            setpoint,
            min: limits.0,
            max: limits.1,
            applied: None,
        }
    }

    /// Value most recently handed to the actuator.
    #[inline]
    pub fn applied(&self) -> Option<i8> {
        self.applied
    }

    #[inline]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

impl<A: Actuator, M: IrqMask> Dispatch for ActuationLoop<'_, A, M> {
    type State = ActuationState;

    fn dispatch(&mut self, state: ActuationState, _diag: &mut dyn fmt::Write) -> ActuationState {
        match state {
            ActuationState::Init => {
                self.actuator.init();
                self.applied = None;
            }
            ActuationState::Run => {
                let value = self.setpoint.get().clamp(self.min, self.max);
                self.actuator.apply(value);
                self.applied = Some(value);
            }
        }
        ActuationState::Run
    }
}

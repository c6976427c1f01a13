// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Car-control arbitration.
//!
//! ```text
//!            Drive            Stop
//!   Init -> Stopped <-------> Driving
//!              ^ |
//!         Stop | | Avoid
//!              | v
//!          ObstacleAvoid
//! ```
//!
//! Every iteration first decides whether to leave the current state, then writes the setpoints of
//! the state it ends up in. An iteration that changes state therefore already emits the new
//! state's outputs.

use core::fmt;

use crate::config::CarConfig;
use crate::protocol::DriveCommand;
use crate::sync::IrqMask;
use crate::task::{Dispatch, LoopState};
use crate::Shares;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CarState {
    Init = 0,
    Driving = 1,
    /// Safe default.
    Stopped = 2,
    ObstacleAvoid = 3,
}

impl LoopState for CarState {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(CarState::Init),
            1 => Some(CarState::Driving),
            2 => Some(CarState::Stopped),
            3 => Some(CarState::ObstacleAvoid),
            _ => None,
        }
    }

    fn raw(self) -> u8 {
        self as u8
    }
}

pub struct CarControl<'a, M> {
    shares: &'a Shares<M>,
    config: CarConfig,
}

impl<'a, M: IrqMask> CarControl<'a, M> {
    pub fn new(shares: &'a Shares<M>, config: CarConfig) -> Self {
        Self { shares, config }
    }

    #[inline]
    pub fn config(&self) -> &CarConfig {
        &self.config
    }

    /// State to run in this iteration, given the state we woke up in.
    fn next_state(state: CarState, cmd: DriveCommand) -> CarState {
        match (state, cmd) {
            (CarState::Init, _) => CarState::Stopped,
            (_, DriveCommand::Stop) => CarState::Stopped,
            (CarState::Stopped, DriveCommand::Drive) => CarState::Driving,
            (CarState::Stopped, DriveCommand::Avoid) => CarState::ObstacleAvoid,
            // Switching between driving and avoiding goes through Stopped.
            (other, _) => other,
        }
    }

    /// Motor and steering setpoints for `state`.
    fn setpoints(&self, state: CarState) -> (i8, i8) {
        let c = &self.config;
        match state {
            CarState::Init | CarState::Stopped => (0, c.neutral_steering),
            CarState::Driving => (c.forward_speed, c.neutral_steering),
            CarState::ObstacleAvoid => {
                if self.shares.echo.pulse_width.get() < c.obstacle_threshold {
                    (c.avoid_close_speed, c.deflection)
                } else {
                    (c.avoid_clear_speed, c.neutral_steering)
                }
            }
        }
    }
}

impl<M: IrqMask> Dispatch for CarControl<'_, M> {
    type State = CarState;

    fn dispatch(&mut self, state: CarState, _diag: &mut dyn fmt::Write) -> CarState {
        let next = Self::next_state(state, self.shares.drive_command.get());
        let (motor, steering) = self.setpoints(next);
        self.shares.motor_velocity.put(motor);
        self.shares.steering_angle.put(steering);
        next
    }
}

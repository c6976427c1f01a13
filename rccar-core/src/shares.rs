// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Shared state of the car, built once at startup and handed to each loop by reference.
//!
//! | Cell | Writer | Readers |
//! | ---- | ------ | ------- |
//! | `motor_velocity` | car control | motor loop, status |
//! | `steering_angle` | car control | steering loop, status |
//! | `drive_command` | command loop | car control |
//! | `echo.*` | capture handler (ranging loop while armed) | car control, ranging loop |
//!
//! The setpoint cells are never touched by an interrupt handler, so they use [`GlobalMask`]. The
//! echo cells take the mask of the capture interrupt line.

use crate::protocol::DriveCommand;
use crate::ranging::EchoCells;
use crate::sync::{GlobalMask, IrqMask, SharedCell};

pub struct Shares<M> {
    pub motor_velocity: SharedCell<i8, GlobalMask>,
    pub steering_angle: SharedCell<i8, GlobalMask>,
    pub drive_command: SharedCell<DriveCommand, GlobalMask>,
    pub echo: EchoCells<M>,
}

impl<M: IrqMask + Copy> Shares<M> {
    /// All cells at their power-on values: stopped, centred, no echo yet.
    pub const fn new(echo_mask: M) -> Self {
        Self {
            motor_velocity: SharedCell::new("Motor_Vel", 0, GlobalMask),
            steering_angle: SharedCell::new("Servo_Pos", 0, GlobalMask),
            drive_command: SharedCell::new("Drive_State", DriveCommand::Stop, GlobalMask),
            echo: EchoCells::new(echo_mask),
        }
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Car Control
//!
//! ## Modules
//!
//! - [`car_control`] - Arbitration between the drive command and the measured echo width, writing
//!   the motor and steering setpoints.
//! - [`actuation`] - Loops that read one setpoint each and drive an
//!   [`Actuator`](crate::hal::Actuator).

pub mod actuation;
pub mod car_control;

pub use actuation::{ActuationLoop, ActuationState};
pub use car_control::{CarControl, CarState};

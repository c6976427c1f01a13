// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Ultrasonic Ranging
//!
//! Distance is measured with one capture timer, one interrupt line and one toggle bit:
//!
//! - [`echo`] - the capture interrupt side. Each capture flips the edge the timer listens for, so
//!   the rising edge of the echo pulse zeroes the counter and the falling edge records the width.
//! - [`ranger`] - the cooperative side. Arms the timer once, then keeps toggling the sensor
//!   trigger. It never times anything itself; only the handler has the latency for that.

pub mod echo;
pub mod ranger;

pub use echo::{EchoCells, EchoIsr, EdgePhase};
pub use ranger::{Ranger, RangingState};

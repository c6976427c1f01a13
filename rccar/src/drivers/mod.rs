// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! control loops.
//!
//! ## Existing drivers
//!
//! - [`esc`] – Hobby ESC on a 50 Hz pulse output
//! - [`servo`] – Steering servo on a 50 Hz pulse output

pub mod esc;
pub mod servo;

pub use esc::Esc;
pub use servo::Servo;

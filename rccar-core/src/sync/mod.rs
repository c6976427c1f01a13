// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Interrupt-Safe Shared State
//!
//! - [`cell`] - [`SharedCell`], a single latest-value-wins slot shared between one interrupt
//!   handler and the control loops.
//! - [`mask`] - [`IrqMask`], the capability a cell uses to keep the handler out while the main
//!   context touches it.
//! - [`context`] - [`IsrCtx`], the token that unlocks the unmasked interrupt-side accessors.

pub mod cell;
pub mod context;
pub mod mask;

pub use cell::SharedCell;
pub use context::IsrCtx;
pub use mask::{GlobalMask, IrqMask};

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # RC Car Control Core
//!
//! Hardware-independent half of the RC car firmware: everything that decides *what* the car does,
//! with the peripherals reached only through small traits. The STM32F7 firmware in the `rccar`
//! crate supplies the implementations and the `main` loop.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`sync`] | Interrupt-safe shared cells and the interrupt-context token |
//! | [`ranging`] | Ultrasonic echo timing (capture ISR) and the trigger loop |
//! | [`task`] | Control-loop contract, priority scheduler and the fatal-state path |
//! | [`control`] | Car-control arbitration and the actuation loops |
//! | [`protocol`] | Framed drive-command protocol and the command input loop |
//! | [`config`] | Tunables, priorities and periods |
//! | [`shares`] | The bundle of shared cells handed to every loop |
//!
//! ## Testing
//!
//! The crate is `no_std` on target and builds against `std` for tests, so everything here runs on
//! the host:
//!
//! ```bash
//! cargo test -p rccar-core
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod hal;
pub mod protocol;
pub mod ranging;
pub mod shares;
pub mod sync;
pub mod task;

pub use shares::Shares;

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # RC Car Firmware
//!
//! Board support for the RC car, written in Rust, targeting an STM32F767 MCU. The control logic
//! lives in `rccar-core`; this crate implements its hardware traits and wires everything up in
//! `main`.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers around USART, timers, watchdog, etc. |
//! | [`drivers`] | Device-level drivers (ESC, steering servo) |
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release -p rccar
//! ```
//!
//! Print the echo width every ranging cycle:
//!
//! ```bash
//! cargo run --release -p rccar --features echo-debug
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

pub mod drivers;
pub mod hw;

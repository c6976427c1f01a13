// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Drive-Command Protocol
//!
//! Frames are three bytes, `START_BYTE, id, checksum`, where the checksum is the wrapping sum of
//! the bytes after the start byte. [`Parser`] turns a byte stream into [`Command`]s one byte at a
//! time; [`CommandLoop`] feeds it from the serial port and publishes the drive command.

pub mod command_loop;
pub mod messages;
pub mod parser;

pub use command_loop::{CommandLoop, CommandState};
pub use messages::{Command, DriveCommand};
pub use parser::Parser;

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command input loop: drains the serial receiver and publishes the drive command.

use core::fmt;

use crate::config::EchoConfig;
use crate::hal::ByteSource;
use crate::protocol::{Command, Parser};
use crate::sync::IrqMask;
use crate::task::{Dispatch, LoopState};
use crate::Shares;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CommandState {
    Init = 0,
    Listen = 1,
}

impl LoopState for CommandState {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(CommandState::Init),
            1 => Some(CommandState::Listen),
            _ => None,
        }
    }

    fn raw(self) -> u8 {
        self as u8
    }
}

pub struct CommandLoop<'a, S, M> {
    source: S,
    parser: Parser,
    shares: &'a Shares<M>,
    echo: EchoConfig,
}

impl<'a, S: ByteSource, M: IrqMask> CommandLoop<'a, S, M> {
    /// `echo` converts the reported width to a range for the status line.
    pub fn new(source: S, shares: &'a Shares<M>, echo: EchoConfig) -> Self {
        Self {
            source,
            parser: Parser::new(),
            shares,
            echo,
        }
    }

    fn handle(&mut self, cmd: Command, diag: &mut dyn fmt::Write) {
        match cmd.drive_command() {
            Some(drive) => {
                self.shares.drive_command.put(drive);
                let _ = write!(diag, "Drive command: {:?}\r\n", drive);
            }
            None => {
                let width = self.shares.echo.pulse_width.get();
                let _ = write!(
                    diag,
                    "Cmd: {:?} Motor: {} Steering: {} Width: {} ({} mm)\r\n",
                    self.shares.drive_command.get(),
                    self.shares.motor_velocity.get(),
                    self.shares.steering_angle.get(),
                    width,
                    self.echo.distance_mm(width),
                );
            }
        }
    }
}

impl<S: ByteSource, M: IrqMask> Dispatch for CommandLoop<'_, S, M> {
    type State = CommandState;

    fn dispatch(&mut self, state: CommandState, diag: &mut dyn fmt::Write) -> CommandState {
        match state {
            CommandState::Init => {
                self.parser = Parser::new();
                let _ = write!(diag, "Ready for commands\r\n");
            }
            CommandState::Listen => {
                while let Some(byte) = self.source.read_byte() {
                    if let Some(cmd) = self.parser.push(byte) {
                        self.handle(cmd, diag);
                    }
                }
            }
        }
        CommandState::Listen
    }
}

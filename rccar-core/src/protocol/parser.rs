// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-wise parser for the drive-command protocol.
//!
//! Anything that is not a well-formed frame is dropped and the parser goes back to hunting for
//! the start byte.

use crate::protocol::messages::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    WaitStart,
    WaitId,
    WaitChecksum { id: u8 },
}

pub struct Parser {
    state: State,
    checksum: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::WaitStart,
            checksum: 0,
        }
    }

    /// Process a single incoming byte. Returns `Some(Command)` if a complete packet is received.
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitId;
                    self.checksum = 0;
                }
            }
            State::WaitId => {
                self.checksum = self.checksum.wrapping_add(byte);

                match byte {
                    MSG_STOP | MSG_DRIVE | MSG_AVOID | MSG_STATUS => {
                        self.state = State::WaitChecksum { id: byte };
                    }
                    START_BYTE => {
                        // A repeated start byte may be the start of the real frame.
                        self.checksum = 0;
                    }
                    _ => self.state = State::WaitStart,
                }
            }
            State::WaitChecksum { id } => {
                let valid = byte == self.checksum;
                self.state = State::WaitStart;

                if valid {
                    return match id {
                        MSG_STOP => Some(Command::Stop),
                        MSG_DRIVE => Some(Command::Drive),
                        MSG_AVOID => Some(Command::Avoid),
                        MSG_STATUS => Some(Command::Status),
                        _ => None,
                    };
                } else if byte == START_BYTE {
                    self.state = State::WaitId;
                    self.checksum = 0;
                }
            }
        }
        None
    }
}

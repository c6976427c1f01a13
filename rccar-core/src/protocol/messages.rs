// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command messages understood by the car.

/// Sync byte for the protocol.
pub const START_BYTE: u8 = 0xA5;

// Message IDs
pub const MSG_STOP: u8 = 0x40;
pub const MSG_DRIVE: u8 = 0x41;
pub const MSG_AVOID: u8 = 0x42;
pub const MSG_STATUS: u8 = 0x43;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Stop,
    Drive,
    Avoid,
    /// Print the current setpoints and echo width.
    Status,
}

impl Command {
    /// Message ID carried in the frame.
    pub fn id(self) -> u8 {
        match self {
            Command::Stop => MSG_STOP,
            Command::Drive => MSG_DRIVE,
            Command::Avoid => MSG_AVOID,
            Command::Status => MSG_STATUS,
        }
    }

    /// Complete frame for this command, as a sender would emit it.
    pub fn frame(self) -> [u8; 3] {
        let id = self.id();
        [START_BYTE, id, id]
    }

    /// Drive command selected by this message, if it selects one.
    pub fn drive_command(self) -> Option<DriveCommand> {
        match self {
            Command::Stop => Some(DriveCommand::Stop),
            Command::Drive => Some(DriveCommand::Drive),
            Command::Avoid => Some(DriveCommand::Avoid),
            Command::Status => None,
        }
    }
}

/// Externally selected car behaviour, read by the car-control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveCommand {
    #[default]
    Stop = 0,
    Drive = 1,
    Avoid = 2,
}

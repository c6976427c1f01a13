// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tunables for the car: loop priorities and periods, arbitration outputs, echo timing.

use crate::task::Priority;

/// Scheduling table. Actuation runs fastest and at the highest priority; stale actuation is worse
/// than a late distance sample.
pub mod timing {
    use super::Priority;

    pub const MOTOR_PRIORITY: Priority = Priority(8);
    pub const MOTOR_PERIOD_MS: u32 = 1;

    pub const RANGING_PRIORITY: Priority = Priority(7);
    pub const RANGING_PERIOD_MS: u32 = 50;

    pub const STEERING_PRIORITY: Priority = Priority(5);
    pub const STEERING_PERIOD_MS: u32 = 1;

    pub const CAR_CONTROL_PRIORITY: Priority = Priority(2);
    pub const CAR_CONTROL_PERIOD_MS: u32 = 1;

    pub const COMMAND_PRIORITY: Priority = Priority(1);
    pub const COMMAND_PERIOD_MS: u32 = 10;

    /// Watchdog timeout armed by the fatal-state path.
    pub const WATCHDOG_TIMEOUT_MS: u32 = 120;
}

/// Motor velocity setpoint range (percent of full throttle, negative is reverse).
pub const MOTOR_LIMITS: (i8, i8) = (-100, 100);

/// Steering angle setpoint range (degrees, 0 is straight ahead).
pub const STEERING_LIMITS: (i8, i8) = (-90, 90);

/// Outputs of the car-control arbitration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarConfig {
    /// Motor setpoint while driving.
    pub forward_speed: i8,
    /// Steering setpoint for "straight ahead".
    pub neutral_steering: i8,
    /// Steering setpoint when an obstacle is closer than the threshold.
    pub deflection: i8,
    /// Echo width (timer ticks) below which an obstacle counts as close. A width exactly at the
    /// threshold is treated as a clear path.
    pub obstacle_threshold: u16,
    /// Motor setpoint in obstacle-avoid mode with an obstacle close.
    pub avoid_close_speed: i8,
    /// Motor setpoint in obstacle-avoid mode with the path clear.
    pub avoid_clear_speed: i8,
}

impl Default for CarConfig {
    /// The tuning the car shipped with. Both avoid speeds are zero, so obstacle-avoid only ever
    /// steers; set them to make the car actually manoeuvre.
    fn default() -> Self {
        Self {
            forward_speed: 25,
            neutral_steering: 0,
            deflection: 90,
            obstacle_threshold: 150,
            avoid_close_speed: 0,
            avoid_clear_speed: 0,
        }
    }
}

impl CarConfig {
    pub fn with_forward_speed(mut self, speed: i8) -> Self {
        self.forward_speed = speed;
        self
    }

    pub fn with_steering(mut self, neutral: i8, deflection: i8) -> Self {
        self.neutral_steering = neutral;
        self.deflection = deflection;
        self
    }

    pub fn with_obstacle_threshold(mut self, ticks: u16) -> Self {
        self.obstacle_threshold = ticks;
        self
    }

    /// Motor setpoints used in obstacle-avoid mode (close, clear).
    pub fn with_avoid_speeds(mut self, close: i8, clear: i8) -> Self {
        self.avoid_close_speed = close;
        self.avoid_clear_speed = clear;
        self
    }
}

/// Edge phase the echo handler starts from after the capture timer is armed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgeSeed {
    /// Expect a rising edge first, matching the rising-edge capture the timer is armed with.
    MatchHardware,
    /// Pretend the rising edge was already seen. The first capture (really a rising edge) is then
    /// recorded as the end of a pulse, giving one bogus width before the toggle lines up.
    RisingAlreadySeen,
}

/// Echo capture timing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EchoConfig {
    /// Timer clock divide ratio. With a 16 MHz timer clock, 256 gives 16 µs ticks and a 1 s
    /// 16-bit range, far above the sensor's ~38 ms no-echo pulse.
    pub prescaler: u16,
    /// Length of one timer tick in nanoseconds, for distance conversion.
    pub tick_ns: u32,
    pub seed: EdgeSeed,
    /// Print the latest width every time the trigger is raised.
    pub report_width: bool,
    /// Consecutive trigger cycles without a new echo before the reading is flagged stale.
    /// 0 disables the check.
    pub stale_after: u16,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            prescaler: 256,
            tick_ns: 16_000,
            seed: EdgeSeed::MatchHardware,
            report_width: false,
            stale_after: 10,
        }
    }
}

impl EchoConfig {
    /// Round-trip time per millimetre of range for an HC-SR04 style sensor.
    const NS_PER_MM: u32 = 5_800;

    pub fn with_seed(mut self, seed: EdgeSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_report_width(mut self, report: bool) -> Self {
        self.report_width = report;
        self
    }

    pub fn with_stale_after(mut self, cycles: u16) -> Self {
        self.stale_after = cycles;
        self
    }

    /// Convert an echo width in timer ticks to range in millimetres.
    pub fn distance_mm(&self, width: u16) -> u32 {
        (width as u64 * self.tick_ns as u64 / Self::NS_PER_MM as u64) as u32
    }
}

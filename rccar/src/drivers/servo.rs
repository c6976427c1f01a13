// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Steering servo: -90..=90 degrees onto 1.0–2.0 ms pulses.

use micromath::F32Ext;

use crate::hw::PulseOutput;
use rccar_core::hal::Actuator;

const CENTER_US: f32 = 1_500.0;
const US_PER_DEGREE: f32 = 500.0 / 90.0;

pub struct Servo<OUT> {
    out: OUT,
}

impl<OUT: PulseOutput> Servo<OUT> {
    pub fn new(out: OUT) -> Self {
        Self { out }
    }

    pub fn pulse_us(angle: i8) -> u16 {
        (CENTER_US + angle as f32 * US_PER_DEGREE).round() as u16
    }

    pub fn free(self) -> OUT {
        self.out
    }
}

impl<OUT: PulseOutput> Actuator for Servo<OUT> {
    fn init(&mut self) {
        self.out.set_pulse_us(Self::pulse_us(0));
    }

    fn apply(&mut self, angle: i8) {
        self.out.set_pulse_us(Self::pulse_us(angle));
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hobby brushed/brushless ESC driven by 50 Hz servo pulses.
//!
//! Throttle maps linearly onto 1.0–2.0 ms around neutral (1.5 ms plus trim): -100 is full reverse,
//! 100 full forward.

use micromath::F32Ext;

use crate::hw::PulseOutput;
use rccar_core::hal::Actuator;

const NEUTRAL_US: i32 = 1_500;
const SPAN_US: f32 = 500.0;
const FULL_SCALE: f32 = 100.0;

pub struct Esc<OUT> {
    out: OUT,
    trim_us: i16,
}

impl<OUT: PulseOutput> Esc<OUT> {
    /// `trim_us` shifts neutral for ESCs that do not centre at exactly 1.5 ms.
    pub fn new(out: OUT, trim_us: i16) -> Self {
        Self { out, trim_us }
    }

    /// Pulse width for a throttle in percent.
    pub fn pulse_us(&self, throttle: i8) -> u16 {
        let offset = (throttle as f32 * SPAN_US / FULL_SCALE).round() as i32;
        (NEUTRAL_US + self.trim_us as i32 + offset).clamp(0, u16::MAX as i32) as u16
    }

    pub fn free(self) -> OUT {
        self.out
    }
}

impl<OUT: PulseOutput> Actuator for Esc<OUT> {
    /// Hold neutral so the ESC arms.
    fn init(&mut self) {
        let us = self.pulse_us(0);
        self.out.set_pulse_us(us);
    }

    fn apply(&mut self, throttle: i8) {
        let us = self.pulse_us(throttle);
        self.out.set_pulse_us(us);
    }
}

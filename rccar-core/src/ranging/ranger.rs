// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ranging loop: arms the echo capture and keeps the sensor triggering.
//!
//! State 0 arms the capture timer and raises the trigger; state 1 flips the trigger once per
//! wake-up, so with the 50 ms period the sensor sees a rising trigger edge every 100 ms. The loop
//! also watches the echo counter and raises the stale flag when the handler stops producing
//! widths (object out of range, sensor unplugged). Stale readings are only reported, never acted
//! on.

use core::fmt;

use embedded_hal::digital::OutputPin;

use crate::config::{EchoConfig, EdgeSeed};
use crate::hal::{CaptureSetup, Edge};
use crate::ranging::{EchoCells, EdgePhase};
use crate::sync::IrqMask;
use crate::task::{Dispatch, LoopState};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RangingState {
    Arm = 0,
    Ping = 1,
}

impl LoopState for RangingState {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(RangingState::Arm),
            1 => Some(RangingState::Ping),
            _ => None,
        }
    }

    fn raw(self) -> u8 {
        self as u8
    }
}

pub struct Ranger<'a, S, P, M> {
    setup: S,
    trigger: P,
    cells: &'a EchoCells<M>,
    config: EchoConfig,
    trigger_high: bool,
    last_echo_count: u16,
    silent_cycles: u16,
    stale: bool,
}

impl<'a, S, P, M> Ranger<'a, S, P, M>
where
    S: CaptureSetup,
    P: OutputPin,
    M: IrqMask,
{
    pub fn new(setup: S, trigger: P, cells: &'a EchoCells<M>, config: EchoConfig) -> Self {
        Self {
            setup,
            trigger,
            cells,
            config,
            trigger_high: false,
            last_echo_count: 0,
            silent_cycles: 0,
            stale: false,
        }
    }

    #[inline]
    pub fn trigger_high(&self) -> bool {
        self.trigger_high
    }

    #[inline]
    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// Reprogram the capture timer and reset the echo session.
    fn arm(&mut self) {
        let seed = match self.config.seed {
            EdgeSeed::MatchHardware => EdgePhase::AwaitingRising,
            EdgeSeed::RisingAlreadySeen => EdgePhase::AwaitingFalling,
        };
        let prescaler = self.config.prescaler;
        let cells = self.cells;
        let setup = &mut self.setup;

        // The handler must not see a half-configured timer or a half-seeded session.
        cells.phase.mask().masked(|| {
            setup.configure(prescaler, Edge::Rising);
            setup.clear_capture_flag();
            cells.phase.put(seed);
            cells.pulse_width.put(0);
            cells.echo_count.put(0);
            cells.stale.put(false);
        });
        self.setup.enable_capture_interrupt();

        self.last_echo_count = 0;
        self.silent_cycles = 0;
        self.stale = false;

        self.trigger.set_high().ok();
        self.trigger_high = true;
    }

    fn ping(&mut self, diag: &mut dyn fmt::Write) {
        if self.trigger_high {
            self.trigger.set_low().ok();
            self.trigger_high = false;
        } else {
            if self.config.report_width {
                let _ = write!(diag, "Width: {}\r\n", self.cells.pulse_width.get());
            }
            self.trigger.set_high().ok();
            self.trigger_high = true;
        }

        self.check_stale(diag);
    }

    fn check_stale(&mut self, diag: &mut dyn fmt::Write) {
        if self.config.stale_after == 0 {
            return;
        }

        let echoes = self.cells.echo_count.get();
        if echoes != self.last_echo_count {
            self.last_echo_count = echoes;
            self.silent_cycles = 0;
            if self.stale {
                self.stale = false;
                self.cells.stale.put(false);
                let _ = write!(diag, "Echo restored\r\n");
            }
            return;
        }

        self.silent_cycles = self.silent_cycles.saturating_add(1);
        if !self.stale && self.silent_cycles >= self.config.stale_after {
            self.stale = true;
            self.cells.stale.put(true);
            let _ = write!(
                diag,
                "No echo for {} cycles, width {} is stale\r\n",
                self.silent_cycles,
                self.cells.pulse_width.get()
            );
        }
    }
}

impl<S, P, M> Dispatch for Ranger<'_, S, P, M>
where
    S: CaptureSetup,
    P: OutputPin,
    M: IrqMask,
{
    type State = RangingState;

    fn dispatch(&mut self, state: RangingState, diag: &mut dyn fmt::Write) -> RangingState {
        match state {
            RangingState::Arm => self.arm(),
            RangingState::Ping => self.ping(diag),
        }
        RangingState::Ping
    }
}

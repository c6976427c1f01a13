// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host stand-ins for the board: a capture timer model, a trigger pin, actuators that record what
//! they were told, a scripted serial port and a watchdog that panics instead of resetting.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use rccar_core::hal::{Actuator, ByteSource, CaptureSetup, CaptureTimer, Edge, ResetControl};
use rccar_core::ranging::EchoIsr;
use rccar_core::sync::{IrqMask, IsrCtx};

/// Register-level model of one capture channel.
#[derive(Debug)]
pub struct TimerModel {
    pub counter: u16,
    pub prescaler: u16,
    pub edge: Edge,
    pub latched: u16,
    pub pending: bool,
    pub irq_enabled: bool,
    pub configures: u32,
}

impl Default for TimerModel {
    fn default() -> Self {
        Self {
            counter: 0,
            prescaler: 1,
            edge: Edge::Rising,
            latched: 0,
            pending: false,
            irq_enabled: false,
            configures: 0,
        }
    }
}

pub type Timer = Rc<RefCell<TimerModel>>;

pub fn timer() -> Timer {
    Rc::new(RefCell::new(TimerModel::default()))
}

pub struct BenchSetup(pub Timer);

impl CaptureSetup for BenchSetup {
    fn configure(&mut self, prescaler: u16, edge: Edge) {
        let mut t = self.0.borrow_mut();
        t.prescaler = prescaler;
        t.edge = edge;
        t.counter = 0;
        t.configures += 1;
    }

    fn clear_capture_flag(&mut self) {
        self.0.borrow_mut().pending = false;
    }

    fn enable_capture_interrupt(&mut self) {
        self.0.borrow_mut().irq_enabled = true;
    }
}

pub struct BenchIsr(pub Timer);

impl CaptureTimer for BenchIsr {
    fn count(&mut self) -> u16 {
        let mut t = self.0.borrow_mut();
        t.pending = false;
        t.latched
    }

    fn set_edge(&mut self, edge: Edge) {
        self.0.borrow_mut().edge = edge;
    }

    fn reset_count(&mut self) {
        self.0.borrow_mut().counter = 0;
    }
}

/// Advance the free-running counter by `ticks`.
pub fn advance(timer: &Timer, ticks: u16) {
    let mut t = timer.borrow_mut();
    t.counter = t.counter.wrapping_add(ticks);
}

/// Drive the echo line through `edge`. If the channel is listening for it, latch the counter and
/// run the handler the way the NVIC would.
pub fn echo_edge<M: IrqMask>(
    timer: &Timer,
    isr: &mut EchoIsr<'_, BenchIsr, M>,
    edge: Edge,
) -> Option<u16> {
    {
        let mut t = timer.borrow_mut();
        if t.edge != edge {
            return None;
        }
        t.latched = t.counter;
        t.pending = true;
        if !t.irq_enabled {
            return None;
        }
    }
    let ctx = unsafe { IsrCtx::new() };
    isr.on_capture(&ctx)
}

#[derive(Default)]
pub struct TriggerPin {
    pub high: bool,
    pub rises: u32,
}

impl ErrorType for TriggerPin {
    type Error = Infallible;
}

impl OutputPin for TriggerPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            self.rises += 1;
        }
        self.high = true;
        Ok(())
    }
}

/// Actuator that records the last value applied, shared so the test can look while the loop
/// owns it.
#[derive(Clone, Default)]
pub struct Output(pub Rc<RefCell<Option<i8>>>);

impl Output {
    pub fn last(&self) -> Option<i8> {
        *self.0.borrow()
    }
}

impl Actuator for Output {
    fn init(&mut self) {
        *self.0.borrow_mut() = Some(0);
    }

    fn apply(&mut self, value: i8) {
        *self.0.borrow_mut() = Some(value);
    }
}

/// Serial receiver fed from the test.
#[derive(Clone, Default)]
pub struct Port(pub Rc<RefCell<VecDeque<u8>>>);

impl Port {
    pub fn send(&self, bytes: &[u8]) {
        self.0.borrow_mut().extend(bytes.iter().copied());
    }
}

impl ByteSource for Port {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.borrow_mut().pop_front()
    }
}

#[derive(Default)]
pub struct FakeWatchdog {
    pub armed: Option<u32>,
}

impl ResetControl for FakeWatchdog {
    fn arm_watchdog(&mut self, timeout_ms: u32) {
        self.armed = Some(timeout_ms);
    }

    fn spin_until_reset(&mut self) -> ! {
        panic!("watchdog reset");
    }
}

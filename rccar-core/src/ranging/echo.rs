// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Echo pulse timing, run from the capture interrupt.

use crate::hal::{CaptureTimer, Edge};
use crate::sync::{IrqMask, IsrCtx, SharedCell};

/// Which edge of the echo pulse the next capture interrupt is.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgePhase {
    /// Next capture is the start of a pulse.
    AwaitingRising,
    /// Next capture is the end of a pulse.
    AwaitingFalling,
}

impl EdgePhase {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            EdgePhase::AwaitingRising => EdgePhase::AwaitingFalling,
            EdgePhase::AwaitingFalling => EdgePhase::AwaitingRising,
        }
    }
}

/// Cells written by the echo handler (and seeded by the ranging loop while it is masked).
pub struct EchoCells<M> {
    /// Edge toggle, persisted across handler invocations.
    pub phase: SharedCell<EdgePhase, M>,
    /// Latest echo width in timer ticks.
    pub pulse_width: SharedCell<u16, M>,
    /// Completed echoes since arming, wrapping. Lets readers tell a fresh width from a stale one.
    pub echo_count: SharedCell<u16, M>,
    /// Set by the ranging loop when echoes stop arriving.
    pub stale: SharedCell<bool, M>,
}

impl<M: IrqMask + Copy> EchoCells<M> {
    pub const fn new(mask: M) -> Self {
        Self {
            phase: SharedCell::new("Edge1", EdgePhase::AwaitingRising, mask),
            pulse_width: SharedCell::new("Width1", 0, mask),
            echo_count: SharedCell::new("Echoes1", 0, mask),
            stale: SharedCell::new("Stale1", false, mask),
        }
    }
}

/// Capture interrupt state machine. Owns the interrupt half of the capture timer.
pub struct EchoIsr<'a, T, M> {
    timer: T,
    cells: &'a EchoCells<M>,
}

impl<'a, T: CaptureTimer, M: IrqMask> EchoIsr<'a, T, M> {
    pub fn new(timer: T, cells: &'a EchoCells<M>) -> Self {
        Self { timer, cells }
    }

    /// Handle one capture event. Returns the recorded width when the event ended a pulse.
    pub fn on_capture(&mut self, ctx: &IsrCtx<'_>) -> Option<u16> {
        let count = self.timer.count();
        let phase = self.cells.phase.get_from_interrupt(ctx);

        let width = match phase {
            EdgePhase::AwaitingRising => {
                self.timer.set_edge(Edge::Falling);
                self.timer.reset_count();
                None
            }
            EdgePhase::AwaitingFalling => {
                self.timer.set_edge(Edge::Rising);
                self.cells.pulse_width.put_from_interrupt(ctx, count);
                let echoes = self.cells.echo_count.get_from_interrupt(ctx);
                self.cells
                    .echo_count
                    .put_from_interrupt(ctx, echoes.wrapping_add(1));
                Some(count)
            }
        };

        self.cells.phase.put_from_interrupt(ctx, phase.toggled());
        width
    }

    /// Give back the timer half.
    pub fn free(self) -> T {
        self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::GlobalMask;

    struct FakeTimer {
        count: u16,
        edge: Edge,
        resets: u32,
    }

    impl CaptureTimer for &mut FakeTimer {
        fn count(&mut self) -> u16 {
            self.count
        }
        fn set_edge(&mut self, edge: Edge) {
            self.edge = edge;
        }
        fn reset_count(&mut self) {
            self.count = 0;
            self.resets += 1;
        }
    }

    fn timer() -> FakeTimer {
        FakeTimer {
            count: 0,
            edge: Edge::Rising,
            resets: 0,
        }
    }

    #[test]
    fn rising_then_falling_records_elapsed_ticks() {
        let cells = EchoCells::new(GlobalMask);
        let mut hw = timer();
        let ctx = unsafe { IsrCtx::new() };

        hw.count = 1234;
        assert_eq!(EchoIsr::new(&mut hw, &cells).on_capture(&ctx), None);
        assert_eq!(hw.edge, Edge::Falling);
        assert_eq!(hw.count, 0);
        assert_eq!(cells.phase.get(), EdgePhase::AwaitingFalling);

        hw.count += 300;
        assert_eq!(EchoIsr::new(&mut hw, &cells).on_capture(&ctx), Some(300));
        assert_eq!(hw.edge, Edge::Rising);
        assert_eq!(cells.pulse_width.get(), 300);
        assert_eq!(cells.echo_count.get(), 1);
        assert_eq!(cells.phase.get(), EdgePhase::AwaitingRising);
    }

    #[test]
    fn rising_edge_leaves_previous_width_alone() {
        let cells = EchoCells::new(GlobalMask);
        cells.pulse_width.put(77);
        let mut hw = timer();
        let ctx = unsafe { IsrCtx::new() };

        EchoIsr::new(&mut hw, &cells).on_capture(&ctx);
        assert_eq!(cells.pulse_width.get(), 77);
        assert_eq!(hw.resets, 1);
    }

    #[test]
    fn echo_count_wraps() {
        let cells = EchoCells::new(GlobalMask);
        cells.echo_count.put(u16::MAX);
        cells.phase.put(EdgePhase::AwaitingFalling);
        let mut hw = timer();
        let ctx = unsafe { IsrCtx::new() };

        EchoIsr::new(&mut hw, &cells).on_capture(&ctx);
        assert_eq!(cells.echo_count.get(), 0);
    }
}

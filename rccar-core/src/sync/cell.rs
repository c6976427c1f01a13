// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-value cell shared between an interrupt handler and the control loops.
//!
//! Semantics are "latest value wins": a write overwrites whatever was there, read or not. There is
//! no queue and no sequence number. Every access is a whole-value volatile copy, and the main
//! context performs it with the handler masked, so a reader never sees half of one write and half
//! of another, whatever the width of `T`.
//!
//! ```no_run
//! use rccar_core::sync::{GlobalMask, IsrCtx, SharedCell};
//!
//! static WIDTH: SharedCell<u16, GlobalMask> = SharedCell::new("Width", 0, GlobalMask);
//!
//! fn capture_handler() {
//!     let ctx = unsafe { IsrCtx::new() };
//!     WIDTH.put_from_interrupt(&ctx, 300);
//! }
//!
//! fn control_loop() -> u16 {
//!     WIDTH.get()
//! }
//! ```
//!
//! One writer per cell is a convention of the callers; the cell itself does not check it.

use core::cell::UnsafeCell;
use core::fmt;
use core::ptr;

use crate::sync::{IrqMask, IsrCtx};

pub struct SharedCell<T, M> {
    name: &'static str,
    value: UnsafeCell<T>,
    mask: M,
}

// SAFETY: main-context access goes through `M`, which keeps the handler out for the duration of
// the copy; handler-side access requires an `IsrCtx`, which only exists while the main context is
// either masked out or not mid-access.
unsafe impl<T: Copy + Send, M: IrqMask + Sync> Sync for SharedCell<T, M> {}

impl<T: Copy, M: IrqMask> SharedCell<T, M> {
    /// Create a cell with a diagnostic `name` and an initial value.
    pub const fn new(name: &'static str, initial: T, mask: M) -> Self {
        Self {
            name,
            value: UnsafeCell::new(initial),
            mask,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the value from main (control-loop) context.
    #[inline]
    pub fn get(&self) -> T {
        // SAFETY: the handler cannot run while masked.
        self.mask.masked(|| unsafe { ptr::read_volatile(self.value.get()) })
    }

    /// Replace the value from main (control-loop) context.
    #[inline]
    pub fn put(&self, value: T) {
        // SAFETY: the handler cannot run while masked.
        self.mask.masked(|| unsafe { ptr::write_volatile(self.value.get(), value) })
    }

    /// Read the value from inside the interrupt handler. Does not touch the mask.
    #[inline]
    pub fn get_from_interrupt(&self, _ctx: &IsrCtx<'_>) -> T {
        // SAFETY: the handler is the only context that can be running.
        unsafe { ptr::read_volatile(self.value.get()) }
    }

    /// Replace the value from inside the interrupt handler. Does not touch the mask.
    #[inline]
    pub fn put_from_interrupt(&self, _ctx: &IsrCtx<'_>, value: T) {
        // SAFETY: the handler is the only context that can be running.
        unsafe { ptr::write_volatile(self.value.get(), value) }
    }

    /// The mask guarding this cell, for callers that need several accesses under one mask.
    #[inline]
    pub fn mask(&self) -> &M {
        &self.mask
    }
}

impl<T: Copy + fmt::Debug, M: IrqMask> fmt::Debug for SharedCell<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCell")
            .field("name", &self.name)
            .field("value", &self.get())
            .finish()
    }
}

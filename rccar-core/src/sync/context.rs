// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt execution-context marker.

use core::marker::PhantomData;

/// Proof that the current code runs inside the interrupt handler that owns a set of cells.
///
/// Holding a reference to this token is what allows [`SharedCell::get_from_interrupt`] and
/// [`SharedCell::put_from_interrupt`] to skip masking. The token is neither `Send` nor `Sync`, so
/// it cannot leak out of the handler invocation that created it.
///
/// [`SharedCell::get_from_interrupt`]: crate::sync::SharedCell::get_from_interrupt
/// [`SharedCell::put_from_interrupt`]: crate::sync::SharedCell::put_from_interrupt
pub struct IsrCtx<'a> {
    _not_send: PhantomData<*const ()>,
    _lifetime: PhantomData<&'a ()>,
}

impl IsrCtx<'_> {
    /// Create the token at the top of an interrupt handler.
    ///
    /// # Safety
    ///
    /// Must only be called from the interrupt handler whose source the cells' [`IrqMask`] masks,
    /// and the token must not outlive that invocation. While the handler runs, the same source
    /// cannot fire again, so unmasked access from it cannot race with itself.
    ///
    /// [`IrqMask`]: crate::sync::IrqMask
    #[inline]
    pub unsafe fn new() -> Self {
        Self {
            _not_send: PhantomData,
            _lifetime: PhantomData,
        }
    }
}

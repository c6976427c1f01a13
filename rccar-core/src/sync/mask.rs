// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt masking capability used by [`SharedCell`](crate::sync::SharedCell).
//!
//! A mask keeps one interrupt source (or all of them) from running while the main context reads or
//! writes a cell, and afterwards puts the mask back exactly the way it found it. Restoring the
//! saved state instead of unconditionally re-enabling keeps nested masked regions masked.

/// Something that can temporarily hold off the interrupt handler sharing a cell.
pub trait IrqMask {
    /// Mask state captured by [`mask`](IrqMask::mask), handed back to
    /// [`restore`](IrqMask::restore).
    type Saved;

    /// Mask the interrupt source and return the state it was in before.
    ///
    /// # Safety
    ///
    /// Every call must be paired with exactly one [`restore`](IrqMask::restore) of the returned
    /// value, in LIFO order with any other mask/restore pairs.
    unsafe fn mask(&self) -> Self::Saved;

    /// Put the interrupt source back into the state captured by [`mask`](IrqMask::mask).
    ///
    /// # Safety
    ///
    /// `saved` must come from the matching, most recent unrestored call to `mask`.
    unsafe fn restore(&self, saved: Self::Saved);

    /// Run `f` with the interrupt source masked.
    #[inline]
    fn masked<R>(&self, f: impl FnOnce() -> R) -> R {
        // SAFETY: the pair is strictly nested around `f`.
        let saved = unsafe { self.mask() };
        let result = f();
        unsafe { self.restore(saved) };
        result
    }
}

/// Masks every interrupt through the `critical-section` implementation linked into the binary.
///
/// On Cortex-M this is `cortex-m`'s single-core implementation (PRIMASK save/restore); on the host
/// it is the `std` implementation. Use it for cells the interrupt handler never touches, or when
/// a source-specific mask is not available.
#[derive(Copy, Clone, Debug, Default)]
pub struct GlobalMask;

impl IrqMask for GlobalMask {
    type Saved = critical_section::RestoreState;

    #[inline]
    unsafe fn mask(&self) -> Self::Saved {
        critical_section::acquire()
    }

    #[inline]
    unsafe fn restore(&self, saved: Self::Saved) {
        critical_section::release(saved)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;

    /// Models a single NVIC line: `enabled` is the live enable bit, `masks` counts mask calls.
    pub struct LineMask {
        pub enabled: Cell<bool>,
        pub masks: Cell<u32>,
    }

    impl LineMask {
        pub fn new(enabled: bool) -> Self {
            Self {
                enabled: Cell::new(enabled),
                masks: Cell::new(0),
            }
        }
    }

    impl IrqMask for LineMask {
        type Saved = bool;

        unsafe fn mask(&self) -> bool {
            self.masks.set(self.masks.get() + 1);
            self.enabled.replace(false)
        }

        unsafe fn restore(&self, was_enabled: bool) {
            if was_enabled {
                self.enabled.set(true);
            }
        }
    }

    #[test]
    fn masked_region_disables_then_restores() {
        let line = LineMask::new(true);
        let seen = line.masked(|| line.enabled.get());
        assert!(!seen);
        assert!(line.enabled.get());
        assert_eq!(line.masks.get(), 1);
    }

    #[test]
    fn nested_region_stays_masked_after_inner_restore() {
        let line = LineMask::new(true);
        line.masked(|| {
            line.masked(|| ());
            assert!(!line.enabled.get(), "inner restore must not re-enable the line");
        });
        assert!(line.enabled.get());
    }

    #[test]
    fn disabled_line_is_not_enabled_by_restore() {
        let line = LineMask::new(false);
        line.masked(|| ());
        assert!(!line.enabled.get());
    }

    #[test]
    fn global_mask_nests() {
        let value = GlobalMask.masked(|| GlobalMask.masked(|| 7));
        assert_eq!(value, 7);
    }
}

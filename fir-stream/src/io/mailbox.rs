//! Lock-free single-slot mailbox carrying a [`Half`].
//!
//! Hands the identity of a completed half from the completion handler to
//! the processing task without locks or blocking.
//!
//! # Contract
//!
//! - Only ONE context may call [`post()`](Mailbox::post) or
//!   [`replace()`](Mailbox::replace) (the handler).
//! - Only ONE context may call [`take()`](Mailbox::take) (the processing task).
//! - The two may run concurrently, including from interrupt context.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::block::Half;

const EMPTY: u8 = u8::MAX;

/// A single-slot, non-blocking mailbox.
pub struct Mailbox {
    slot: AtomicU8,
}

impl Mailbox {
    pub const fn new() -> Self {
        Mailbox {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Post `half` (producer side).
    ///
    /// Returns `Err(half)` if the previous post has not been taken yet; the
    /// pending value is left in place.
    pub fn post(&self, half: Half) -> Result<(), Half> {
        // Release pairs with the consumer's Acquire in `take()` so every block
        // write that preceded the completion is visible to the task.
        self.slot
            .compare_exchange(EMPTY, half as u8, Ordering::Release, Ordering::Relaxed)
            .map(|_| ())
            .map_err(|_| half)
    }

    /// Post `half` unconditionally (producer side), returning the value it
    /// displaced, if the consumer had not taken it yet.
    pub fn replace(&self, half: Half) -> Option<Half> {
        Half::from_index(self.slot.swap(half as u8, Ordering::AcqRel))
    }

    /// Take the pending half, if any (consumer side).
    pub fn take(&self) -> Option<Half> {
        Half::from_index(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    /// Look at the pending half without taking it.
    pub fn peek(&self) -> Option<Half> {
        Half::from_index(self.slot.load(Ordering::Acquire))
    }

    pub fn is_empty(&self) -> bool {
        self.slot.load(Ordering::Acquire) == EMPTY
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

//! Completion bookkeeping for the double-buffered transfer.
//!
//! ```text
//!  input done ──┐
//!               ├─► both set? ──► clear flags, post half, flip half ──► Mailbox
//! output done ──┘
//! ```
//!
//! The two completion events may arrive in either order and from different
//! interrupt contexts. The flags live in one atomic byte and are updated in a
//! single read-modify-write, so exactly one event observes the pair complete
//! and fires the trigger.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::block::{Direction, Half};
use crate::io::Mailbox;

const BOTH_DONE: u8 = (1 << Direction::Input as u8) | (1 << Direction::Output as u8);

const fn done_bit(direction: Direction) -> u8 {
    1 << direction as u8
}

/// Shared pipeline bookkeeping: completion flags, the half identifier and
/// the handoff mailbox.
///
/// One instance is shared by reference between the completion handler
/// ([`complete`](Self::complete)) and the processing task.
pub struct PipelineState {
    /// Bit per [`Direction`]: set once that direction finished the current half.
    done: AtomicU8,
    /// Half reported by the next trigger.
    next: AtomicU8,
    mailbox: Mailbox,
    triggers: AtomicU32,
    overruns: AtomicU32,
}

impl PipelineState {
    pub const fn new() -> Self {
        PipelineState {
            done: AtomicU8::new(0),
            next: AtomicU8::new(Half::A as u8),
            mailbox: Mailbox::new(),
            triggers: AtomicU32::new(0),
            overruns: AtomicU32::new(0),
        }
    }

    /// Completion event from the transfer mechanism.
    ///
    /// Sets the flag for `direction`. When this event completes the pair,
    /// both flags are cleared, the current half is posted to the mailbox and
    /// the half identifier flips. Returns the posted half.
    ///
    /// If the task has not taken the previous half yet, that half is
    /// discarded and counted as an overrun: the transfer side is already
    /// reusing it, so only the newest half stays pending.
    ///
    /// Never blocks; safe to call from interrupt context.
    pub fn complete(&self, direction: Direction) -> Option<Half> {
        let bit = done_bit(direction);
        let prev = match self.done.fetch_update(Ordering::AcqRel, Ordering::Acquire, |flags| {
            let flags = flags | bit;
            Some(if flags == BOTH_DONE { 0 } else { flags })
        }) {
            Ok(prev) | Err(prev) => prev,
        };

        if prev | bit != BOTH_DONE {
            return None;
        }

        let half = match Half::from_index(self.next.fetch_xor(1, Ordering::AcqRel)) {
            Some(half) => half,
            None => return None,
        };
        self.triggers.fetch_add(1, Ordering::Relaxed);

        if let Err(half) = self.mailbox.post(half) {
            // The pending half is the one the transfer side has just moved
            // back onto; it must never reach the task.
            if let Some(stale) = self.mailbox.replace(half) {
                let count = self.overruns.fetch_add(1, Ordering::Relaxed) + 1;
                log::warn!("processing overrun: half {:?} dropped ({} total)", stale, count);
            }
        }
        Some(half)
    }

    /// Handoff mailbox read by the processing task.
    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Whether `direction` has reported the current half done.
    pub fn is_done(&self, direction: Direction) -> bool {
        self.done.load(Ordering::Acquire) & done_bit(direction) != 0
    }

    /// Half the next trigger will report.
    pub fn next_half(&self) -> Half {
        match Half::from_index(self.next.load(Ordering::Acquire)) {
            Some(half) => half,
            None => Half::A,
        }
    }

    /// Number of completed pairs seen so far.
    pub fn triggers(&self) -> u32 {
        self.triggers.load(Ordering::Relaxed)
    }

    /// Triggers refused because the previous half was still pending.
    pub fn overruns(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_direction_does_not_trigger() {
        let state = PipelineState::new();
        assert_eq!(state.complete(Direction::Input), None);
        assert!(state.is_done(Direction::Input));
        assert!(!state.is_done(Direction::Output));
        assert!(state.mailbox().is_empty());
    }

    #[test]
    fn repeated_event_same_direction_does_not_trigger() {
        let state = PipelineState::new();
        assert_eq!(state.complete(Direction::Output), None);
        assert_eq!(state.complete(Direction::Output), None);
        assert_eq!(state.triggers(), 0);
    }

    #[test]
    fn pair_triggers_and_clears_flags() {
        let state = PipelineState::new();
        assert_eq!(state.complete(Direction::Input), None);
        assert_eq!(state.complete(Direction::Output), Some(Half::A));

        assert!(!state.is_done(Direction::Input));
        assert!(!state.is_done(Direction::Output));
        assert_eq!(state.mailbox().take(), Some(Half::A));
        assert_eq!(state.next_half(), Half::B);
    }

    #[test]
    fn either_order_triggers() {
        let state = PipelineState::new();
        assert_eq!(state.complete(Direction::Output), None);
        assert_eq!(state.complete(Direction::Input), Some(Half::A));
    }

    #[test]
    fn halves_strictly_alternate() {
        let state = PipelineState::new();
        let mut expected = Half::A;
        for cycle in 0..64 {
            let (first, second) = if cycle % 3 == 0 {
                (Direction::Output, Direction::Input)
            } else {
                (Direction::Input, Direction::Output)
            };
            assert_eq!(state.complete(first), None);
            assert_eq!(state.complete(second), Some(expected), "cycle {cycle}");
            assert_eq!(state.mailbox().take(), Some(expected));
            expected = expected.other();
        }
        assert_eq!(state.triggers(), 64);
        assert_eq!(state.overruns(), 0);
    }

    #[test]
    fn untaken_half_counts_overrun() {
        let state = PipelineState::new();
        state.complete(Direction::Input);
        assert_eq!(state.complete(Direction::Output), Some(Half::A));

        // Task never took A; B completes while the transfer side is back on A.
        state.complete(Direction::Input);
        assert_eq!(state.complete(Direction::Output), Some(Half::B));
        assert_eq!(state.overruns(), 1);
        assert_eq!(state.triggers(), 2);

        // A is being refilled, so only B may be handed to the task.
        let filling = state.next_half();
        assert_eq!(filling, Half::A);
        let pending = state.mailbox().take();
        assert_eq!(pending, Some(Half::B));
        assert_ne!(pending, Some(filling));
        assert!(state.mailbox().is_empty());
    }

    #[test]
    fn repeated_overruns_keep_newest_half() {
        let state = PipelineState::new();
        let mut last = Half::A;
        for _ in 0..5 {
            state.complete(Direction::Output);
            last = match state.complete(Direction::Input) {
                Some(half) => half,
                None => panic!("pair did not trigger"),
            };
        }
        assert_eq!(state.overruns(), 4);
        assert_eq!(last, Half::A);
        assert_ne!(state.mailbox().peek(), Some(state.next_half()));
        assert_eq!(state.mailbox().take(), Some(last));
    }

    #[test]
    fn concurrent_completions_trigger_once_per_pair() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;
        use std::thread;

        const PAIRS: u32 = 1_000;
        let state = Arc::new(PipelineState::new());
        let go = Arc::new(AtomicBool::new(false));

        // Each direction raises its event once per pair, but never runs more
        // than one pair ahead of the trigger count.
        let spawn = |direction: Direction| {
            let state = Arc::clone(&state);
            let go = Arc::clone(&go);
            thread::spawn(move || {
                while !go.load(Ordering::Acquire) {
                    thread::yield_now();
                }
                for pair in 0..PAIRS {
                    while state.triggers() < pair {
                        let _ = state.mailbox().take();
                        thread::yield_now();
                    }
                    state.complete(direction);
                }
            })
        };
        let rx = spawn(Direction::Input);
        let tx = spawn(Direction::Output);
        go.store(true, Ordering::Release);
        rx.join().unwrap();
        tx.join().unwrap();

        assert_eq!(state.triggers(), PAIRS);
        assert!(!state.is_done(Direction::Input));
        assert!(!state.is_done(Direction::Output));
    }
}

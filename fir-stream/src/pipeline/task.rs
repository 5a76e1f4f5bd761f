//! The single processing task.
//!
//! Woken once per completed half, [`PipelineTask::poll`] takes the half from
//! the mailbox, selects the filter for the current mode, filters the standby
//! input block into the standby output block and updates the band-power
//! envelope. It runs to completion and never blocks.
//!
//! ## Boundary history
//!
//! The block preceding the standby input is the other input half, which the
//! transfer mechanism is already overwriting. The task therefore keeps its
//! own copy of the last input block it processed and uses that as history.
//! Halves strictly alternate, so the copy always holds the block the
//! transfer mechanism delivered just before the current one.

use crate::block::{BlockArena, BlockData, Half};
use crate::dsp::convolve::{bypass, convolve, silence};
use crate::dsp::{EnvelopeDetector, EnvelopeState, FilterBank, FilterSelector, FilterState, Mode, Selection};

use super::state::PipelineState;

/// Per-block processing stage.
pub struct PipelineTask {
    selector: FilterSelector,
    detector: EnvelopeDetector,
    /// Copy of the previously processed input block.
    history: BlockData,
    mode: Option<Mode>,
    processed: u32,
}

impl PipelineTask {
    pub const fn new(bank: &'static FilterBank) -> Self {
        PipelineTask {
            selector: FilterSelector::new(bank),
            detector: EnvelopeDetector::new(bank),
            history: BlockData::zeroed(),
            mode: None,
            processed: 0,
        }
    }

    /// Process the pending half, if any. Returns the half processed.
    pub fn poll(
        &mut self,
        state: &PipelineState,
        arena: &BlockArena,
        mode: Mode,
        envelope: &EnvelopeState,
    ) -> Option<Half> {
        let half = state.mailbox().take()?;

        // SAFETY: The mailbox only carries a half after both transfer
        // directions reported it complete; they are now working on the other
        // half, and this task is the mailbox's only consumer.
        let standby = unsafe { arena.standby(half) };
        self.process(mode, standby.input, standby.output, envelope);
        Some(half)
    }

    /// Filter one input block into `output` and update `envelope`.
    pub fn process(
        &mut self,
        mode: Mode,
        input: &BlockData,
        output: &mut BlockData,
        envelope: &EnvelopeState,
    ) -> FilterState {
        if self.mode != Some(mode) {
            log::debug!("mode {} -> {:?}", mode.code(), mode.state());
            self.mode = Some(mode);
        }

        let selection = self.selector.select(mode);
        let outcome = selection.state();
        match selection {
            Selection::Silence => silence(output),
            Selection::Bypass => bypass(input, output),
            Selection::Combine {
                flags,
                coefficients,
            } => {
                convolve(input, &self.history, coefficients, output);
                self.detector.update(input, flags, envelope);
            }
        }

        self.history.samples.copy_from_slice(&input.samples);
        self.processed = self.processed.wrapping_add(1);
        outcome
    }

    /// Blocks processed since start-up.
    pub fn processed(&self) -> u32 {
        self.processed
    }

    /// Input block that supplies history for the next pass.
    pub fn history(&self) -> &BlockData {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Direction;
    use crate::constants::{BLOCK_SAMPLES, FIR_TAPS};
    use crate::dsp::coefficients::LOW_PASS;
    use crate::dsp::Band;

    const N: usize = BLOCK_SAMPLES;
    static BANK: FilterBank = FilterBank::STANDARD;

    fn noise_block(seed: u32) -> BlockData {
        let mut x = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        let mut block = BlockData::zeroed();
        for s in block.iter_mut() {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *s = (x >> 16) as i16 / 2;
        }
        block
    }

    #[test]
    fn silence_zeroes_output() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let input = noise_block(1);
        let mut output = noise_block(2);

        assert_eq!(task.process(Mode::SILENCE, &input, &mut output, &env), FilterState::Silence);
        assert!(output.iter().all(|&s| s == 0));
    }

    #[test]
    fn bypass_copies_input() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let input = noise_block(3);
        let mut output = BlockData::zeroed();

        for code in [8u8, 11, 15, 16, 200] {
            output.fill(1);
            assert_eq!(task.process(Mode::new(code), &input, &mut output, &env), FilterState::Bypass);
            assert_eq!(output, input, "code {code}");
        }
    }

    #[test]
    fn silence_and_bypass_are_idempotent() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let input = noise_block(4);

        for mode in [Mode::SILENCE, Mode::BYPASS] {
            let mut first = BlockData::zeroed();
            let mut second = BlockData::zeroed();
            task.process(mode, &input, &mut first, &env);
            task.process(mode, &input, &mut second, &env);
            assert_eq!(first, second, "{mode:?}");
        }
        assert_eq!(env.snapshot(), [0.0; 3]);
    }

    #[test]
    fn impulse_at_block_start_yields_low_pass_taps() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let mut input = BlockData::zeroed();
        input[0] = i16::MAX;
        let mut output = BlockData::zeroed();

        task.process(Mode::new(1), &input, &mut output, &env);

        for t in 0..FIR_TAPS {
            assert_eq!(output[2 * t], (LOW_PASS[t] * i16::MAX as f32) as i16, "tap {t}");
        }
        assert!(output[2 * FIR_TAPS..].iter().all(|&s| s == 0));
    }

    #[test]
    fn history_carries_into_next_block() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let mut first = BlockData::zeroed();
        first[N - 2] = 10_000;
        let mut out = BlockData::zeroed();

        task.process(Mode::new(1), &first, &mut out, &env);
        assert_eq!(task.history(), &first);

        let second = BlockData::zeroed();
        task.process(Mode::new(1), &second, &mut out, &env);
        assert_eq!(out[0], (LOW_PASS[1] * 10_000.0) as i16);
        assert_ne!(out[0], 0);
    }

    #[test]
    fn history_tracks_input_in_every_mode() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let input = noise_block(9);
        let mut out = BlockData::zeroed();

        task.process(Mode::SILENCE, &input, &mut out, &env);
        assert_eq!(task.history(), &input);
        assert_eq!(task.processed(), 1);
    }

    #[test]
    fn envelope_follows_enabled_bands() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let input = noise_block(5);
        let mut out = BlockData::zeroed();

        // Band-pass only.
        task.process(Mode::new(2), &input, &mut out, &env);
        assert!(env.power(Band::Mid) > 0.0);
        assert_eq!(env.power(Band::Low), 0.0);
        assert_eq!(env.power(Band::High), 0.0);

        // Switching to low leaves the band-pass reading stale.
        let mid = env.power(Band::Mid);
        task.process(Mode::new(1), &noise_block(6), &mut out, &env);
        assert_eq!(env.power(Band::Mid), mid);
        assert!(env.power(Band::Low) > 0.0);
    }

    #[test]
    fn silent_block_after_loud_block_clears_envelope() {
        let mut task = PipelineTask::new(&BANK);
        let env = EnvelopeState::new();
        let mut out = BlockData::zeroed();

        let mut loud = BlockData::zeroed();
        loud.fill(20_000);
        task.process(Mode::new(1), &loud, &mut out, &env);
        assert!(env.power(Band::Low) > crate::constants::LOW_BAND_THRESHOLD);

        task.process(Mode::new(1), &BlockData::zeroed(), &mut out, &env);
        assert_eq!(env.power(Band::Low), 0.0);
        // The program filter still rings out from the loud history.
        assert_ne!(out[0], 0);
    }

    #[test]
    fn poll_processes_pending_half() {
        let arena = BlockArena::new();
        let state = PipelineState::new();
        let env = EnvelopeState::new();
        let mut task = PipelineTask::new(&BANK);

        assert_eq!(task.poll(&state, &arena, Mode::BYPASS, &env), None);

        unsafe { arena.transfer(Half::A).input.fill(321) };
        state.complete(Direction::Input);
        state.complete(Direction::Output);

        assert_eq!(task.poll(&state, &arena, Mode::BYPASS, &env), Some(Half::A));
        assert_eq!(task.poll(&state, &arena, Mode::BYPASS, &env), None);

        let transfer = unsafe { arena.transfer(Half::A) };
        assert!(transfer.output.iter().all(|&s| s == 321));
    }
}

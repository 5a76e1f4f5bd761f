//! # fir-stream
//!
//! A `no_std`, zero-allocation streaming stereo FIR filter. Interleaved
//! 16-bit stereo blocks arrive from a double-buffered transfer mechanism
//! (DMA ping-pong), are filtered by a selectable combination of low-pass,
//! band-pass and high-pass FIR filters (or bypassed, or silenced), and are
//! handed back for transmission one block period later. A short per-band
//! envelope filter tracks band power to drive three level indicators.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Memory | [`block`] | Fixed A/B block pairs for input and output |
//! | Handoff | [`io`] | Lock-free mailbox from completion handler to task |
//! | DSP | [`dsp`] | Filter bank, mode selection, convolution, envelope |
//! | Pipeline | [`pipeline`] | Completion bookkeeping and the processing task |
//! | Control | [`control`] | Mode input and indicator outputs |
//!
//! ## Quick start
//!
//! ```ignore
//! use fir_stream::block::{BlockArena, Direction};
//! use fir_stream::control::{IndicatorPolicy, ModeCell};
//! use fir_stream::dsp::{EnvelopeState, FilterBank, Mode};
//! use fir_stream::pipeline::{PipelineState, PipelineTask};
//!
//! static ARENA: BlockArena = BlockArena::new();
//! static STATE: PipelineState = PipelineState::new();
//! static ENVELOPE: EnvelopeState = EnvelopeState::new();
//! static MODE: ModeCell = ModeCell::new(Mode::BYPASS);
//! static BANK: FilterBank = FilterBank::STANDARD;
//!
//! // Transfer completion ISRs:
//! STATE.complete(Direction::Input);
//! STATE.complete(Direction::Output);
//!
//! // Processing task, pended by the ISR:
//! let mut task = PipelineTask::new(&BANK);
//! task.poll(&STATE, &ARENA, MODE.get(), &ENVELOPE);
//!
//! // Periodic indicator update:
//! let lit = IndicatorPolicy::STANDARD.evaluate(&ENVELOPE);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `dsp` | yes | Filters, pipeline and control modules |
//! | `hal` | yes | `embedded-hal` switch and indicator adapters |
//!
//! ## Stream parameters
//!
//! - **Block size:** 1024 interleaved samples ([`constants::BLOCK_SAMPLES`])
//! - **Sample format:** `i16`, right channel first
//! - **Program filters:** 101 taps ([`constants::FIR_TAPS`])
//! - **Envelope filters:** 13 taps ([`constants::ENVELOPE_TAPS`])

#![no_std]

#[cfg(test)]
extern crate std;

pub mod block;
pub mod constants;
pub mod io;

#[cfg(feature = "dsp")]
pub mod dsp;

#[cfg(feature = "dsp")]
pub mod pipeline;

#[cfg(feature = "dsp")]
pub mod control;

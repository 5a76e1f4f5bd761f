//! Double-buffered streaming pipeline.
//!
//! ## Concurrency model
//!
//! | Context | Priority | Calls |
//! |---------|----------|-------|
//! | Transfer completion ISR(s) | high | [`PipelineState::complete`] |
//! | Processing task | low | [`PipelineTask::poll`] |
//! | Indicator / switch poller | lowest | [`crate::control`] |
//!
//! The task cycles through three states:
//!
//! ```text
//! WaitingForCompletion ──(both directions done)──► ReadyToProcess
//!          ▲                                             │ mailbox.take()
//!          └───────────────── Processing ◄───────────────┘
//! ```
//!
//! The handler never waits and the task runs each pass to completion. No
//! lock is taken anywhere: the transfer side and the task always own
//! opposite halves of the [`BlockArena`](crate::block::BlockArena). A pass
//! must finish within one block period; a miss is reported through
//! [`PipelineState::overruns`] but not recovered.
//!
//! ## Wiring
//!
//! ```ignore
//! static ARENA: BlockArena = BlockArena::new();
//! static STATE: PipelineState = PipelineState::new();
//! static ENVELOPE: EnvelopeState = EnvelopeState::new();
//! static MODE: ModeCell = ModeCell::new(Mode::BYPASS);
//! static BANK: FilterBank = FilterBank::STANDARD;
//!
//! // Receive DMA complete ISR:
//! if STATE.complete(Direction::Input).is_some() { /* pend the task */ }
//! // Transmit DMA complete ISR:
//! if STATE.complete(Direction::Output).is_some() { /* pend the task */ }
//!
//! // Task:
//! task.poll(&STATE, &ARENA, MODE.get(), &ENVELOPE);
//! ```

pub mod state;
pub mod task;

pub use state::PipelineState;
pub use task::PipelineTask;

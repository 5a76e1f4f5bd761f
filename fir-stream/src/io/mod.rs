//! Handoff primitives between the transfer side and the processing task.
//!
//! ## Components
//!
//! - [`mailbox`] — lock-free single-slot mailbox carrying a [`Half`](crate::block::Half)
//!
//! ## Transfer model
//!
//! The transfer mechanism (DMA or equivalent) runs two linked channels, one
//! per [`Direction`](crate::block::Direction). Each channel ping-pongs between
//! the A and B block of its direction and raises a completion event when a
//! block is done. Completion events go to
//! [`PipelineState::complete`](crate::pipeline::PipelineState::complete), which
//! posts the finished half into the mailbox once both directions report it.

pub mod mailbox;

pub use mailbox::Mailbox;

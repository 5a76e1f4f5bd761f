//! Fixed block storage shared by the transfer mechanism and the processing stage.
//!
//! Four blocks exist for the whole life of the program: an A/B pair on the
//! input side and an A/B pair on the output side. While the transfer
//! mechanism fills input A and drains output A, the processing stage reads
//! input B and writes output B, and vice versa.
//!
//! ```text
//!              ┌──────────┬──────────┐
//!  Input       │ input A  │ input B  │   ◄── transfer writes active half
//!              ├──────────┼──────────┤
//!  Output      │ output A │ output B │   ──► transfer reads active half
//!              └──────────┴──────────┘
//!                 active     standby (processing)
//! ```

pub mod arena;

pub use arena::{BlockArena, BlockData, Direction, Half, Standby, Transfer};

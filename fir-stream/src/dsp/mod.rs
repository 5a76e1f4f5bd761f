//! Filtering and band-power analysis.
//!
//! - [`coefficients`] — the fixed [`FilterBank`]
//! - [`selector`] — mode codes → [`Selection`]
//! - [`convolve`] — boundary-aware FIR over interleaved blocks
//! - [`envelope`] — per-band averaged power

pub mod coefficients;
pub mod convolve;
pub mod envelope;
pub mod selector;

pub use coefficients::{Band, BandFlags, FilterBank};
pub use envelope::{EnvelopeDetector, EnvelopeState};
pub use selector::{FilterSelector, FilterState, Mode, Selection};

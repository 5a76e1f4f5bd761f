//! Slow-rate collaborators: mode input and band-power indicators.
//!
//! These run from a periodic scheduler, not from the block path. The
//! hardware adapters (`DipSwitches`, `IndicatorLeds`) are generic over
//! `embedded-hal` digital pins and require the `hal` feature.

pub mod indicators;
pub mod mode;

pub use indicators::IndicatorPolicy;
pub use mode::ModeCell;

#[cfg(feature = "hal")]
pub use indicators::IndicatorLeds;
#[cfg(feature = "hal")]
pub use mode::DipSwitches;

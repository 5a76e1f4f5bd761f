//! Mode decoding and filter selection.
//!
//! A mode code picks one of three outcomes:
//!
//! | Code | Outcome | Bands |
//! |------|---------|-------|
//! | 0 | silence | none |
//! | 1–7 | combine | bit 0 = low, bit 1 = band-pass, bit 2 = high |
//! | anything else | bypass | none |

use crate::constants::FIR_TAPS;

use super::coefficients::{BandFlags, FilterBank};

const LOW_BIT: u8 = 0b001;
const MID_BIT: u8 = 0b010;
const HIGH_BIT: u8 = 0b100;
const COMBINE_MASK: u8 = LOW_BIT | MID_BIT | HIGH_BIT;

/// Raw mode code as read from the mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode(u8);

impl Mode {
    pub const SILENCE: Mode = Mode(0);
    pub const ALL_BANDS: Mode = Mode(COMBINE_MASK);
    /// First code of the bypass range.
    pub const BYPASS: Mode = Mode(8);

    pub const fn new(code: u8) -> Self {
        Mode(code)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// Outcome of this mode without resolving coefficients.
    pub const fn state(self) -> FilterState {
        match self.0 {
            0 => FilterState::Silence,
            1..=7 => FilterState::Combine,
            _ => FilterState::Bypass,
        }
    }

    /// Bands enabled by this mode. Empty outside the combine range.
    pub const fn bands(self) -> BandFlags {
        match self.state() {
            FilterState::Combine => BandFlags {
                low: self.0 & LOW_BIT != 0,
                mid: self.0 & MID_BIT != 0,
                high: self.0 & HIGH_BIT != 0,
            },
            _ => BandFlags::NONE,
        }
    }
}

impl From<u8> for Mode {
    fn from(code: u8) -> Self {
        Mode(code)
    }
}

/// The three mutually exclusive filter outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// Output is all zeros.
    Silence,
    /// Output is an exact copy of the input.
    Bypass,
    /// Output is the input convolved with the combined coefficients.
    Combine,
}

/// Result of [`FilterSelector::select`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Silence,
    Bypass,
    Combine {
        flags: BandFlags,
        coefficients: &'a [f32; FIR_TAPS],
    },
}

impl Selection<'_> {
    /// Envelope bands to recompute for this selection.
    pub fn flags(&self) -> BandFlags {
        match self {
            Selection::Combine { flags, .. } => *flags,
            _ => BandFlags::NONE,
        }
    }

    pub fn state(&self) -> FilterState {
        match self {
            Selection::Silence => FilterState::Silence,
            Selection::Bypass => FilterState::Bypass,
            Selection::Combine { .. } => FilterState::Combine,
        }
    }
}

/// Resolves a mode code to the active combined coefficient vector.
///
/// The combined vector lives inside the selector and is rebuilt only when
/// the mode changes, so steady-state selection is a comparison.
pub struct FilterSelector {
    bank: &'static FilterBank,
    combined: [f32; FIR_TAPS],
    /// Mode the combined vector was built for.
    built_for: Option<Mode>,
}

impl FilterSelector {
    pub const fn new(bank: &'static FilterBank) -> Self {
        FilterSelector {
            bank,
            combined: [0.0; FIR_TAPS],
            built_for: None,
        }
    }

    pub fn bank(&self) -> &'static FilterBank {
        self.bank
    }

    /// Select the filter for `mode`. Total: every code maps to an outcome.
    pub fn select(&mut self, mode: Mode) -> Selection<'_> {
        match mode.state() {
            FilterState::Silence => Selection::Silence,
            FilterState::Bypass => Selection::Bypass,
            FilterState::Combine => {
                let flags = mode.bands();
                if self.built_for != Some(mode) {
                    self.bank.combine(flags, &mut self.combined);
                    self.built_for = Some(mode);
                }
                Selection::Combine {
                    flags,
                    coefficients: &self.combined,
                }
            }
        }
    }
}

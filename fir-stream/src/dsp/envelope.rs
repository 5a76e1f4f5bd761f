//! Per-band power envelope.
//!
//! Each enabled band runs its short envelope filter over the block just
//! processed (same interleaved kernel as the program filter), sums the
//! squared outputs and divides by the block length. The result overwrites
//! the band's averaged power. Disabled bands keep their last value.
//!
//! The envelope sees only the current block: history before its first
//! sample reads as zero, so a silent block always measures zero power.
//!
//! [`EnvelopeState`] is written by the processing task and read (and
//! cleared) by the indicator driver at its own cadence. Values are stored
//! as `f32` bits in atomics so a reader always sees a whole value.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::constants::BLOCK_SAMPLES;

use super::coefficients::{Band, BandFlags, FilterBank};
use super::convolve::{fir_at, Samples};

/// History seen by the envelope filters.
static NO_HISTORY: Samples = [0; BLOCK_SAMPLES];

/// Band-power values shared between the processing task and the indicators.
pub struct EnvelopeState {
    /// Sum of squared envelope-filter outputs over the last computed block.
    energy: [AtomicU32; 3],
    /// `energy / BLOCK_SAMPLES`, cleared by the indicator driver on a trip.
    power: [AtomicU32; 3],
}

impl EnvelopeState {
    #[allow(clippy::declare_interior_mut_const)]
    pub const fn new() -> Self {
        const ZERO: AtomicU32 = AtomicU32::new(0);
        EnvelopeState {
            energy: [ZERO; 3],
            power: [ZERO; 3],
        }
    }

    /// Averaged power of `band`.
    pub fn power(&self, band: Band) -> f32 {
        f32::from_bits(self.power[band.index()].load(Ordering::Acquire))
    }

    /// Unaveraged energy of `band` from its last computed block.
    pub fn energy(&self, band: Band) -> f32 {
        f32::from_bits(self.energy[band.index()].load(Ordering::Acquire))
    }

    /// Averaged power of every band, indexed by [`Band::index`].
    pub fn snapshot(&self) -> [f32; 3] {
        Band::ALL.map(|band| self.power(band))
    }

    /// Reset the averaged power of `band` to zero.
    pub fn clear(&self, band: Band) {
        self.power[band.index()].store(0, Ordering::Release);
    }

    fn publish(&self, band: Band, energy: f32) {
        let i = band.index();
        self.energy[i].store(energy.to_bits(), Ordering::Release);
        self.power[i].store((energy / BLOCK_SAMPLES as f32).to_bits(), Ordering::Release);
    }
}

impl Default for EnvelopeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes band power from the envelope filters of a [`FilterBank`].
pub struct EnvelopeDetector {
    bank: &'static FilterBank,
}

impl EnvelopeDetector {
    pub const fn new(bank: &'static FilterBank) -> Self {
        EnvelopeDetector { bank }
    }

    /// Recompute every band enabled in `flags` and publish it into `state`.
    pub fn update(&self, current: &Samples, flags: BandFlags, state: &EnvelopeState) {
        for band in Band::ALL {
            if flags.is_set(band) {
                let energy = block_energy(current, self.bank.envelope(band));
                state.publish(band, energy);
            }
        }
    }
}

/// Sum of squared filter outputs over every position of `current`.
pub fn block_energy(current: &Samples, coeffs: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for pos in 0..BLOCK_SAMPLES {
        let y = fir_at(current, &NO_HISTORY, coeffs, pos);
        sum += y * y;
    }
    sum
}

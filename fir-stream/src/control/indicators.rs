//! Band-power indicators.
//!
//! Evaluated periodically, slower than the block rate. A band's indicator is
//! lit when its averaged power exceeds the band threshold, and the averaged
//! value is cleared on that trip so the next evaluation waits for fresh data.

use crate::constants::{HIGH_BAND_THRESHOLD, LOW_BAND_THRESHOLD, MID_BAND_THRESHOLD};
use crate::dsp::{Band, EnvelopeState};

/// Threshold-and-reset rule for the three indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPolicy {
    /// Indexed by [`Band::index`].
    pub thresholds: [f32; 3],
}

impl IndicatorPolicy {
    pub const STANDARD: IndicatorPolicy = IndicatorPolicy {
        thresholds: [LOW_BAND_THRESHOLD, MID_BAND_THRESHOLD, HIGH_BAND_THRESHOLD],
    };

    pub fn threshold(&self, band: Band) -> f32 {
        self.thresholds[band.index()]
    }

    /// Evaluate every band; lit bands are cleared in `envelope`.
    pub fn evaluate(&self, envelope: &EnvelopeState) -> [bool; 3] {
        Band::ALL.map(|band| {
            let lit = envelope.power(band) > self.threshold(band);
            if lit {
                envelope.clear(band);
            }
            lit
        })
    }
}

impl Default for IndicatorPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(feature = "hal")]
pub use leds::IndicatorLeds;

#[cfg(feature = "hal")]
mod leds {
    use embedded_hal::digital::{OutputPin, PinState};

    use super::IndicatorPolicy;
    use crate::dsp::EnvelopeState;

    /// Three indicator outputs (low, band-pass, high), active high.
    pub struct IndicatorLeds<P> {
        pins: [P; 3],
        policy: IndicatorPolicy,
        lit: [bool; 3],
    }

    impl<P: OutputPin> IndicatorLeds<P> {
        pub fn new(pins: [P; 3], policy: IndicatorPolicy) -> Self {
            IndicatorLeds {
                pins,
                policy,
                lit: [false; 3],
            }
        }

        /// Evaluate the envelope and drive the pins. Returns the lit state.
        pub fn update(&mut self, envelope: &EnvelopeState) -> Result<[bool; 3], P::Error> {
            let lit = self.policy.evaluate(envelope);
            for (pin, &on) in self.pins.iter_mut().zip(lit.iter()) {
                pin.set_state(PinState::from(on))?;
            }
            self.lit = lit;
            Ok(lit)
        }

        /// State written by the last successful update.
        pub fn lit(&self) -> [bool; 3] {
            self.lit
        }

        pub fn release(self) -> [P; 3] {
            self.pins
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Envelope with a given averaged power per band.
    fn envelope_with(power: [f32; 3]) -> EnvelopeState {
        use crate::constants::BLOCK_SAMPLES;
        use crate::dsp::envelope::EnvelopeDetector;
        use crate::dsp::{BandFlags, FilterBank};

        static BANK: FilterBank = FilterBank::STANDARD;
        let state = EnvelopeState::new();
        let detector = EnvelopeDetector::new(&BANK);

        // A DC block through each envelope filter gives roughly a known
        // power; scale the DC level per band to land near the requested value.
        for band in Band::ALL {
            let gain: f32 = BANK.envelope(band).iter().sum();
            let level = libm::sqrtf(power[band.index()]) / gain;
            let block = [level as i16; BLOCK_SAMPLES];
            let flags = match band {
                Band::Low => BandFlags { low: true, ..BandFlags::NONE },
                Band::Mid => BandFlags { mid: true, ..BandFlags::NONE },
                Band::High => BandFlags { high: true, ..BandFlags::NONE },
            };
            detector.update(&block, flags, &state);
        }
        state
    }

    #[test]
    fn quiet_envelope_lights_nothing() {
        let env = EnvelopeState::new();
        assert_eq!(IndicatorPolicy::STANDARD.evaluate(&env), [false; 3]);
    }

    #[test]
    fn loud_bands_trip_and_clear() {
        let env = envelope_with([2_000_000.0, 1_000_000.0, 1_000.0]);
        assert!(env.power(Band::Low) > LOW_BAND_THRESHOLD);

        assert_eq!(IndicatorPolicy::STANDARD.evaluate(&env), [true; 3]);
        assert_eq!(env.snapshot(), [0.0; 3]);

        // Cleared values do not re-trip.
        assert_eq!(IndicatorPolicy::STANDARD.evaluate(&env), [false; 3]);
    }

    #[test]
    fn values_below_threshold_are_kept() {
        let env = envelope_with([100_000.0, 100_000.0, 50.0]);
        let before = env.snapshot();
        assert_eq!(IndicatorPolicy::STANDARD.evaluate(&env), [false; 3]);
        assert_eq!(env.snapshot(), before);
    }

    #[test]
    fn thresholds_per_band() {
        let policy = IndicatorPolicy::default();
        assert_eq!(policy.threshold(Band::Low), 800_000.0);
        assert_eq!(policy.threshold(Band::Mid), 400_000.0);
        assert_eq!(policy.threshold(Band::High), 125.0);
    }

    #[cfg(feature = "hal")]
    mod leds {
        use core::convert::Infallible;

        use embedded_hal::digital::{ErrorType, OutputPin};

        use super::super::{IndicatorLeds, IndicatorPolicy};
        use super::envelope_with;

        struct Led {
            on: bool,
        }

        impl ErrorType for Led {
            type Error = Infallible;
        }

        impl OutputPin for Led {
            fn set_low(&mut self) -> Result<(), Self::Error> {
                self.on = false;
                Ok(())
            }

            fn set_high(&mut self) -> Result<(), Self::Error> {
                self.on = true;
                Ok(())
            }
        }

        #[test]
        fn update_drives_pins() {
            let pins = [Led { on: false }, Led { on: true }, Led { on: false }];
            let mut leds = IndicatorLeds::new(pins, IndicatorPolicy::STANDARD);

            let env = envelope_with([2_000_000.0, 10.0, 1_000.0]);
            assert_eq!(leds.update(&env), Ok([true, false, true]));
            assert_eq!(leds.lit(), [true, false, true]);

            let pins = leds.release();
            assert!(pins[0].on);
            assert!(!pins[1].on);
            assert!(pins[2].on);
        }
    }
}

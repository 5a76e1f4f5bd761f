//! Mode input.
//!
//! The polling collaborator writes the current mode code into a
//! [`ModeCell`]; the processing task reads it once per pass.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::dsp::Mode;

/// Latest mode code, shared between the poller and the processing task.
pub struct ModeCell {
    code: AtomicU8,
}

impl ModeCell {
    pub const fn new(initial: Mode) -> Self {
        ModeCell {
            code: AtomicU8::new(initial.code()),
        }
    }

    pub fn get(&self) -> Mode {
        Mode::new(self.code.load(Ordering::Relaxed))
    }

    /// Store `mode`, returning the previous one.
    pub fn set(&self, mode: Mode) -> Mode {
        Mode::new(self.code.swap(mode.code(), Ordering::Relaxed))
    }
}

#[cfg(feature = "hal")]
pub use switches::DipSwitches;

#[cfg(feature = "hal")]
mod switches {
    use embedded_hal::digital::InputPin;

    use super::ModeCell;
    use crate::dsp::Mode;

    /// Four active-low switches read as a 4-bit mode code.
    ///
    /// Switch `i` contributes bit `i` when it is closed (pin low).
    pub struct DipSwitches<P> {
        pins: [P; 4],
    }

    impl<P: InputPin> DipSwitches<P> {
        /// `pins[0]` is the least significant bit.
        pub fn new(pins: [P; 4]) -> Self {
            DipSwitches { pins }
        }

        /// Read the switches into a mode code.
        pub fn read(&mut self) -> Result<Mode, P::Error> {
            let mut code = 0u8;
            for (bit, pin) in self.pins.iter_mut().enumerate() {
                if pin.is_low()? {
                    code |= 1 << bit;
                }
            }
            Ok(Mode::new(code))
        }

        /// Read the switches and publish the result.
        pub fn poll(&mut self, cell: &ModeCell) -> Result<Mode, P::Error> {
            let mode = self.read()?;
            let previous = cell.set(mode);
            if previous != mode {
                log::debug!("switches: mode {} -> {}", previous.code(), mode.code());
            }
            Ok(mode)
        }

        pub fn release(self) -> [P; 4] {
            self.pins
        }
    }
}

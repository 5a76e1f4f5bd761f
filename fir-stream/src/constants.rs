/// Number of interleaved 16-bit samples per block (right, left, right, ...).
pub const BLOCK_SAMPLES: usize = 1024;

/// Stereo frames per block.
pub const BLOCK_FRAMES: usize = BLOCK_SAMPLES / 2;

/// Taps in each program FIR filter (order 100).
pub const FIR_TAPS: usize = 101;

/// Taps in each envelope (indicator) FIR filter.
pub const ENVELOPE_TAPS: usize = 13;

/// Raw interleaved positions a program filter reaches back from its newest sample.
pub const HISTORY_SAMPLES: usize = 2 * (FIR_TAPS - 1);

/// Number of distinct mode codes presented by the mode selector.
pub const MODE_COUNT: u8 = 16;

/// Averaged-power threshold that lights the low-band indicator.
pub const LOW_BAND_THRESHOLD: f32 = 800_000.0;

/// Averaged-power threshold that lights the band-pass indicator.
pub const MID_BAND_THRESHOLD: f32 = 400_000.0;

/// Averaged-power threshold that lights the high-band indicator.
pub const HIGH_BAND_THRESHOLD: f32 = 125.0;

// Filter history must never reach back further than one block.
const _: () = assert!(HISTORY_SAMPLES < BLOCK_SAMPLES, "filter order must be below block length");
const _: () = assert!(2 * (ENVELOPE_TAPS - 1) < BLOCK_SAMPLES);
const _: () = assert!(BLOCK_SAMPLES % 2 == 0, "blocks hold whole stereo frames");

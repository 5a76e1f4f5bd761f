//! Boundary-aware FIR convolution over interleaved stereo blocks.
//!
//! Samples are interleaved, so the filter window for raw position `p` walks
//! backward two positions per tap and stays on the same channel:
//!
//! ```text
//! y[p] = Σ h[t] · x[p − 2t],   t = 0..K
//! ```
//!
//! Positions that fall before the start of the current block are read from
//! the tail of the previous block (`x[−1]` is `previous[N − 1]`). The longest
//! window reaches `2(K − 1)` positions back, always less than one block.

use crate::constants::BLOCK_SAMPLES;

/// Interleaved sample block.
pub type Samples = [i16; BLOCK_SAMPLES];

/// One filter output at raw position `pos`, accumulated in `f32`.
///
/// Taps are accumulated in order starting from `coeffs[0]` against the
/// newest sample.
#[inline]
pub fn fir_at(current: &Samples, previous: &Samples, coeffs: &[f32], pos: usize) -> f32 {
    debug_assert!(pos < BLOCK_SAMPLES);
    debug_assert!(!coeffs.is_empty() && 2 * (coeffs.len() - 1) < BLOCK_SAMPLES);

    // Taps whose sample is still inside the current block.
    let direct = (pos / 2 + 1).min(coeffs.len());

    let mut acc = 0.0f32;
    for (t, &c) in coeffs[..direct].iter().enumerate() {
        acc += c * current[pos - 2 * t] as f32;
    }
    for (t, &c) in coeffs.iter().enumerate().skip(direct) {
        acc += c * previous[BLOCK_SAMPLES + pos - 2 * t] as f32;
    }
    acc
}

/// Convert an accumulated output to a sample: truncate toward zero, saturate.
#[inline(always)]
pub fn to_sample(acc: f32) -> i16 {
    acc as i16
}

/// Filter `current` into `out`, taking history from `previous`.
pub fn convolve(current: &Samples, previous: &Samples, coeffs: &[f32], out: &mut Samples) {
    // Right and left outputs of each frame share the tap index; the two
    // windows are offset by one raw position.
    for frame in 0..BLOCK_SAMPLES / 2 {
        let right = 2 * frame;
        out[right] = to_sample(fir_at(current, previous, coeffs, right));
        out[right + 1] = to_sample(fir_at(current, previous, coeffs, right + 1));
    }
}

/// Zero every sample of `out`.
pub fn silence(out: &mut Samples) {
    out.fill(0);
}

/// Copy `current` to `out` unchanged.
pub fn bypass(current: &Samples, out: &mut Samples) {
    out.copy_from_slice(current);
}

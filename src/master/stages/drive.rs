use crate::master::stages::biquad::{BiquadCoeffs, BiquadState, apply_biquad};
use crate::master::stages::compressor::hyper_compress;

/// Fixed wet mix of the enhancement path. Always on, independent of the
/// mastering parameters.
const WET_MIX: f32 = 0.22;

/// Parallel drive enhancement.
///
/// A copy of the signal is hyper-compressed, stripped of its low end, and
/// lifted above 12 kHz, then blended at a fixed ratio under the untouched
/// dry signal.
pub fn apply_parallel_drive(buffer: &mut [f32], sample_rate: f32) {
    let mut wet = buffer.to_vec();
    hyper_compress(&mut wet, 0.3, 4.0);

    let hpf250 = BiquadCoeffs::high_pass(250.0, sample_rate, 0.707);
    let shelf12k = BiquadCoeffs::high_shelf(12_000.0, sample_rate, 4.5);
    let mut s1 = BiquadState::default();
    let mut s2 = BiquadState::default();
    apply_biquad(&mut wet, &hpf250, &mut s1);
    apply_biquad(&mut wet, &shelf12k, &mut s2);

    let dry = 1.0 - WET_MIX;
    for (sample, wet) in buffer.iter_mut().zip(&wet) {
        *sample = sample.mul_add(dry, wet * WET_MIX);
    }
}

use crate::master::stages::biquad::{BiquadCoeffs, BiquadState, apply_biquad};

/// Pultec-style low contour: cut below 30 Hz, then a resonant boost at 55 Hz.
///
/// The cut must run before the boost; reversing the cascade changes the
/// resulting frequency response. `amount` is the boost in dB, clamped to
/// [0, 2.5].
pub fn apply_low_contour(buffer: &mut [f32], sample_rate: f32, amount: f32) {
    let gain_db = amount.clamp(0.0, 2.5);
    let hpf30 = BiquadCoeffs::high_pass(30.0, sample_rate, 0.707);
    let peak55 = BiquadCoeffs::peaking(55.0, sample_rate, 0.9, gain_db);
    let mut s1 = BiquadState::default();
    let mut s2 = BiquadState::default();
    apply_biquad(buffer, &hpf30, &mut s1);
    apply_biquad(buffer, &peak55, &mut s2);
}

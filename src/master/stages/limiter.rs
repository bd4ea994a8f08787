use crate::master::stages::common::db_to_lin;

/// Fixed per-sample release coefficient (slow decay toward the signal).
const RELEASE_COEFF: f32 = 0.9999;

/// Envelope level below which no gain computation happens.
const ENVELOPE_GATE: f32 = 1e-6;

/// Feed-forward peak limiter without lookahead.
///
/// One scalar envelope follows the rectified signal, rising toward peaks
/// over roughly `attack_ms` and decaying with the fixed release. Gain
/// reduction `min(1, ceiling / envelope)` is applied reactively from the
/// already-rising envelope, so fast transients can overshoot the ceiling
/// slightly.
pub fn apply_limiter(buffer: &mut [f32], sample_rate: f32, ceiling_db: f32, attack_ms: f32) {
    let ceiling = db_to_lin(ceiling_db);
    let attack_samples = (attack_ms / 1000.0 * sample_rate).max(1.0);
    let attack_coeff = 1.0 / attack_samples;
    let mut envelope = 0.0f32;
    for sample in buffer.iter_mut() {
        let abs = sample.abs();
        if abs > envelope {
            envelope += (abs - envelope) * attack_coeff;
        } else {
            envelope = (envelope - abs).mul_add(RELEASE_COEFF, abs);
        }
        if envelope > ENVELOPE_GATE {
            *sample *= (ceiling / envelope).min(1.0);
        }
    }
}

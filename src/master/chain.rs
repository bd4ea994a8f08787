use anyhow::{Result, ensure};

use crate::master::MasteringParams;
use crate::master::stages::common::db_to_lin;
use crate::master::stages::contour::apply_low_contour;
use crate::master::stages::drive::apply_parallel_drive;
use crate::master::stages::limiter::apply_limiter;
use crate::master::stages::waveshaper::Curve;
use crate::master::stereo;

/// Soft-clip threshold ahead of the limiter.
const CLIP_THRESHOLD: f32 = 0.99;

/// Limiter attack time in milliseconds.
const LIMITER_ATTACK_MS: f32 = 5.0;

/// Run the fixed mastering stage order on one channel buffer in place.
///
/// The order is fixed: EQ before clipping means tonal shaping happens on
/// the signal that drives the dynamics decisions, and clipping ahead of the
/// limiter rounds transient peaks before the reactive gain reduction
/// engages.
pub fn process_channel(buffer: &mut [f32], sample_rate: f32, params: &MasteringParams) {
    let gain = db_to_lin(params.gain_adjustment_db);
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }

    Curve::tube(params.tube_drive_amount).apply(buffer);

    apply_low_contour(buffer, sample_rate, params.low_contour_amount);

    Curve::soft_clip(CLIP_THRESHOLD).apply(buffer);

    let ceiling_db = params.limiter_ceiling_db.clamp(-1.0, -0.1);
    apply_limiter(buffer, sample_rate, ceiling_db, LIMITER_ATTACK_MS);

    apply_parallel_drive(buffer, sample_rate);
}

/// Run the full mastering chain on a stereo buffer in place.
///
/// The chain operates on the mid/side decomposition, so width-affecting
/// decisions apply per mid/side component rather than per physical channel.
/// Mismatched channel lengths are the one unrecoverable input condition.
pub fn process_stereo(
    left: &mut [f32],
    right: &mut [f32],
    sample_rate: u32,
    params: &MasteringParams,
) -> Result<()> {
    ensure!(
        left.len() == right.len(),
        "channel length mismatch: left has {} samples, right has {}",
        left.len(),
        right.len()
    );

    let (mut mid, mut side) = stereo::encode(left, right);
    let sr = sample_rate as f32;
    process_channel(&mut mid, sr, params);
    process_channel(&mut side, sr, params);
    stereo::decode(&mid, &side, left, right);

    Ok(())
}

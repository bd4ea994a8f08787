use anyhow::Result;

use crate::loudness::meter;
use crate::master::{MasteringParams, chain};

/// Iteration budget of the convergence loop.
pub const MAX_ITERATIONS: u32 = 50;

/// Gain step per iteration in dB.
const STEP_DB: f32 = 0.1;

/// Acceptable distance from the target, in loudness units.
const TOLERANCE: f32 = 0.05;

/// Total gain adjustment is kept within ±12 dB.
const GAIN_RANGE_DB: f32 = 12.0;

/// Length of the representative window, in seconds.
const WINDOW_SECONDS: usize = 10;

/// Outcome of the loudness convergence loop.
///
/// `iterations` equal to [`MAX_ITERATIONS`] means the tolerance was not
/// reached; the parameters are still the best found and remain usable. The
/// caller decides whether to accept the best-effort result.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceResult {
    pub params: MasteringParams,
    pub achieved_loudness: f32,
    pub iterations: u32,
}

/// Search for the gain adjustment that brings the mastered loudness within
/// tolerance of `target_loudness`.
///
/// Works on a window of up to ten seconds centered on the buffer midpoint to
/// bound cost. Each iteration copies the window into scratch buffers, runs
/// the full mastering chain on the copy, measures it, and steps
/// `gain_adjustment_db` by a fixed amount toward the target, clamped to
/// ±12 dB. Terminates on convergence or after the iteration budget;
/// non-convergence is reported through the iteration count.
pub fn optimize(
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
    target_loudness: f32,
    initial: MasteringParams,
) -> Result<ConvergenceResult> {
    let window_len = left.len().min(WINDOW_SECONDS * sample_rate as usize);
    let start = (left.len() / 2).saturating_sub(window_len / 2);
    let left_window = &left[start..start + window_len];
    let right_window = &right[start..start + window_len];

    // Scratch buffers are allocated once and reused; the extracted window
    // itself is never mutated.
    let mut left_work = vec![0.0f32; window_len];
    let mut right_work = vec![0.0f32; window_len];

    let mut params = initial;
    let mut achieved = meter::SILENCE_FLOOR;
    let mut iterations = 0;

    for _ in 0..MAX_ITERATIONS {
        left_work.copy_from_slice(left_window);
        right_work.copy_from_slice(right_window);

        chain::process_stereo(&mut left_work, &mut right_work, sample_rate, &params)?;
        achieved = meter::measure(&left_work, &right_work, sample_rate);

        iterations += 1;
        let err = target_loudness - achieved;
        if err.abs() <= TOLERANCE {
            break;
        }

        let adjusted = params.gain_adjustment_db + STEP_DB.copysign(err);
        params = params.with_gain_db(adjusted.clamp(-GAIN_RANGE_DB, GAIN_RANGE_DB));
    }

    Ok(ConvergenceResult {
        params,
        achieved_loudness: achieved,
        iterations,
    })
}

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::loudness::optimizer::{self, ConvergenceResult};

pub mod chain;
pub mod stages;
pub mod stereo;

/// Parameters for one mastering pass.
///
/// An immutable value type: the optimizer produces a new instance per
/// iteration rather than mutating in place. Values outside the declared
/// ranges are silently clamped by the consuming stage, never rejected, so a
/// parameter set coming from an external suggestion step can always be
/// applied. Missing fields in a JSON source fall back to these defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteringParams {
    /// Tube saturation amount, 0 to 1.
    pub tube_drive_amount: f32,
    /// Low contour boost in dB, 0 to 2.5.
    pub low_contour_amount: f32,
    /// Limiter ceiling in dBFS, -1.0 to -0.1.
    pub limiter_ceiling_db: f32,
    /// Make-up gain in dB, stepped by the convergence loop.
    pub gain_adjustment_db: f32,
}

impl Default for MasteringParams {
    fn default() -> Self {
        Self {
            tube_drive_amount: 0.42,
            low_contour_amount: 1.8,
            limiter_ceiling_db: -0.5,
            gain_adjustment_db: 0.0,
        }
    }
}

impl MasteringParams {
    /// Copy of these parameters with a different gain adjustment.
    pub fn with_gain_db(self, gain_adjustment_db: f32) -> Self {
        Self {
            gain_adjustment_db,
            ..self
        }
    }
}

/// Result of a full mastering pass.
pub struct MasteringOutcome {
    /// The parameters the chain actually applied (post-optimization).
    pub params: MasteringParams,
    /// Present when a target loudness was supplied and the convergence loop
    /// ran.
    pub convergence: Option<ConvergenceResult>,
}

/// Master a stereo buffer in place.
///
/// When `target_loudness` is given, the convergence loop first searches for
/// a gain adjustment on a representative window, then the full buffer is
/// processed with the resulting parameters.
pub fn master(
    left: &mut [f32],
    right: &mut [f32],
    sample_rate: u32,
    params: MasteringParams,
    target_loudness: Option<f32>,
) -> Result<MasteringOutcome> {
    ensure!(
        left.len() == right.len(),
        "channel length mismatch: left has {} samples, right has {}",
        left.len(),
        right.len()
    );

    let (params, convergence) = match target_loudness {
        Some(target) => {
            let result = optimizer::optimize(left, right, sample_rate, target, params)?;
            (result.params, Some(result))
        }
        None => (params, None),
    };

    chain::process_stereo(left, right, sample_rate, &params)?;

    Ok(MasteringOutcome {
        params,
        convergence,
    })
}

use std::f32::consts::PI;

/// Number of entries in a transfer-curve lookup table.
const CURVE_LEN: usize = 8192;

const CLIP_KNEE: f32 = 0.04;

/// A memoryless nonlinear transfer curve, sampled over the input range
/// [-1, 1] and applied by linear interpolation between table entries.
///
/// The table trades a small quantization error for O(1) per-sample cost
/// instead of evaluating the transcendental functions per sample.
pub struct Curve {
    table: Vec<f32>,
}

impl Curve {
    /// Tube-style saturation curve. `drive` is clamped to [0, 1] and mapped
    /// to the effective drive coefficient `drive * 4 + 0.5`; a cosine term
    /// injects an even-harmonic component on top of the exponential shape.
    pub fn tube(drive: f32) -> Self {
        let k = drive.clamp(0.0, 1.0) * 4.0 + 0.5;
        let mut table = vec![0.0f32; CURVE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            let x = (i as f32 / (CURVE_LEN - 1) as f32) * 2.0 - 1.0;
            let saturated = x.signum() * (1.0 - (-x.abs() * k).exp());
            let shaped = saturated * 0.15f32.mul_add((PI * x.abs()).cos(), 1.0);
            *entry = shaped.clamp(-1.0, 1.0);
        }
        Self { table }
    }

    /// Soft clip: identity below `threshold - 0.04`, hard ceiling at
    /// `threshold`, with an exponential blend across the knee in between.
    /// The resulting magnitude curve is continuous and non-decreasing.
    pub fn soft_clip(threshold: f32) -> Self {
        let t = threshold.clamp(0.5, 1.0);
        let soft_start = t - CLIP_KNEE;
        let mut table = vec![0.0f32; CURVE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            let x = (i as f32 / (CURVE_LEN - 1) as f32) * 2.0 - 1.0;
            let abs = x.abs();
            let y = if abs <= soft_start {
                x
            } else if abs >= t {
                t.copysign(x)
            } else {
                let blend = (abs - soft_start) / (t - soft_start);
                ((t - soft_start) * (1.0 - (-blend * 3.0).exp()) + soft_start).copysign(x)
            };
            *entry = y.clamp(-1.0, 1.0);
        }
        Self { table }
    }

    /// Apply the curve to a buffer in place, interpolating linearly between
    /// the two bracketing table entries for each sample.
    pub fn apply(&self, buffer: &mut [f32]) {
        let len = self.table.len() - 1;
        let half = len as f32 / 2.0;
        for sample in buffer.iter_mut() {
            let idx = (*sample).mul_add(half, half);
            let i0 = (idx.floor() as isize).clamp(0, len as isize - 1) as usize;
            let i1 = (i0 + 1).min(len);
            let t = idx - i0 as f32;
            *sample = self.table[i0].mul_add(1.0 - t, self.table[i1] * t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(curve: &Curve, x: f32) -> f32 {
        let mut buf = [x];
        curve.apply(&mut buf);
        buf[0]
    }

    #[test]
    fn tube_curve_bounded_for_all_drives() {
        for &drive in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            let curve = Curve::tube(drive);
            for &entry in &curve.table {
                assert!(
                    entry.abs() <= 1.0,
                    "tube({drive}) table entry {entry} out of range"
                );
            }
        }
    }

    #[test]
    fn tube_curve_roughly_odd_symmetric() {
        // The even-harmonic term is symmetric in |x|, so f(-x) = -f(x) holds
        // up to table interpolation error.
        let curve = Curve::tube(0.5);
        for &x in &[0.1, 0.3, 0.5, 0.7, 0.9] {
            let pos = shape(&curve, x);
            let neg = shape(&curve, -x);
            assert!(
                (pos + neg).abs() < 1e-3,
                "asymmetry at x={x}: f(x)={pos}, f(-x)={neg}"
            );
        }
    }

    #[test]
    fn tube_drive_clamps_silently() {
        let reference_low = Curve::tube(0.0);
        let below = Curve::tube(-1.0);
        assert_eq!(reference_low.table, below.table);

        let reference_high = Curve::tube(1.0);
        let above = Curve::tube(5.0);
        assert_eq!(reference_high.table, above.table);
    }

    #[test]
    fn soft_clip_identity_below_knee() {
        let curve = Curve::soft_clip(0.99);
        for &x in &[0.0, 0.2, -0.4, 0.7, -0.9] {
            let y = shape(&curve, x);
            assert!(
                (y - x).abs() < 1e-3,
                "expected passthrough at x={x}, got {y}"
            );
        }
    }

    #[test]
    fn soft_clip_ceiling_at_threshold() {
        let curve = Curve::soft_clip(0.99);
        assert!((shape(&curve, 1.0).abs() - 0.99).abs() < 1e-3);
        assert!((shape(&curve, -1.0).abs() - 0.99).abs() < 1e-3);
    }

    #[test]
    fn soft_clip_magnitude_non_decreasing() {
        let curve = Curve::soft_clip(0.99);
        let mut prev = 0.0f32;
        let mut x = 0.0f32;
        while x <= 1.0 {
            let y = shape(&curve, x).abs();
            assert!(
                y >= prev - 1e-4,
                "magnitude decreased at x={x}: {y} < {prev}"
            );
            prev = y;
            x += 0.001;
        }
    }
}

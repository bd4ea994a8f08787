/// Loudness reported for silence, or when the buffer is too short for a
/// single complete block.
pub const SILENCE_FLOOR: f32 = -70.0;

/// Measurement block length in milliseconds.
const BLOCK_MS: f32 = 400.0;

/// Simplified block-mean-square loudness estimate for a stereo buffer.
///
/// Partitions the buffer into ~400 ms blocks, averages the unweighted
/// `l² + r²` mean of each complete block, and maps the result to a
/// logarithmic LUFS-like value. This is not a standards-compliant
/// integrated-loudness measurement: there is no frequency weighting and no
/// gating. The convergence loop's tolerance and step size are tuned against
/// this exact formula, so keep it as is.
pub fn measure(left: &[f32], right: &[f32], sample_rate: u32) -> f32 {
    let block = ((BLOCK_MS / 1000.0 * sample_rate as f32) as usize).min(left.len());
    if block == 0 {
        return SILENCE_FLOOR;
    }

    let mut sum = 0.0f64;
    let mut blocks = 0u32;
    let mut i = 0;
    while i + block <= left.len() {
        let mut block_sum = 0.0f64;
        for j in 0..block {
            let l = f64::from(left[i + j]);
            let r = f64::from(right[i + j]);
            block_sum += l * l + r * r;
        }
        sum += block_sum / block as f64;
        blocks += 1;
        i += block;
    }

    if blocks == 0 {
        return SILENCE_FLOOR;
    }
    let mean = sum / f64::from(blocks);
    if mean <= 0.0 {
        return SILENCE_FLOOR;
    }
    10.0f64.mul_add(mean.log10(), -0.691) as f32
}

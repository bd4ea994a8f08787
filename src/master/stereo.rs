/// Encode a left/right pair into its mid/side representation.
///
/// `mid = (l + r) / 2`, `side = (l - r) / 2`. Exact inverse of [`decode`]
/// up to floating rounding.
pub fn encode(left: &[f32], right: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mid = left
        .iter()
        .zip(right)
        .map(|(l, r)| (l + r) * 0.5)
        .collect();
    let side = left
        .iter()
        .zip(right)
        .map(|(l, r)| (l - r) * 0.5)
        .collect();
    (mid, side)
}

/// Fold a mid/side pair back into left/right buffers.
pub fn decode(mid: &[f32], side: &[f32], left: &mut [f32], right: &mut [f32]) {
    for i in 0..mid.len() {
        left[i] = mid[i] + side[i];
        right[i] = mid[i] - side[i];
    }
}

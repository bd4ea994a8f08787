/// Static compression curve with no attack/release smoothing.
///
/// Samples at or below the absolute threshold pass unchanged; the excess
/// above it is divided by the ratio, sign preserved, clamped to 1. Used only
/// as a shaping stage inside the parallel drive path, not as the main
/// dynamics stage.
pub fn hyper_compress(buffer: &mut [f32], threshold: f32, ratio: f32) {
    for sample in buffer.iter_mut() {
        let abs = sample.abs();
        if abs <= threshold {
            continue;
        }
        let compressed = threshold + (abs - threshold) / ratio;
        *sample = compressed.min(1.0).copysign(*sample);
    }
}

use std::f32::consts::PI;

/// Coefficients for one second-order section, normalized so `a0 = 1`.
/// Designed once, then shared read-only across buffers.
#[derive(Debug, Clone, Copy)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

/// Delay line of one biquad instance. Each logical filter instance owns its
/// own freshly zeroed state; two filters (or two channels) must never share
/// one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiquadState {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BiquadCoeffs {
    /// Resonant 2-pole high-pass at `freq` with the given Q.
    pub fn high_pass(freq: f32, sample_rate: f32, q: f32) -> Self {
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;
        Self {
            b0: (1.0 + cos_w0) / 2.0 / a0,
            b1: -(1.0 + cos_w0) / a0,
            b2: (1.0 + cos_w0) / 2.0 / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// Peaking boost/cut of `gain_db` centered at `freq` with the given Q.
    pub fn peaking(freq: f32, sample_rate: f32, q: f32, gain_db: f32) -> Self {
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let a = 10f32.powf(gain_db / 40.0);
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha / a;
        Self {
            b0: alpha.mul_add(a, 1.0) / a0,
            b1: -2.0 * cos_w0 / a0,
            b2: alpha.mul_add(-a, 1.0) / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha / a) / a0,
        }
    }

    /// Shelving boost of `gain_db` above `freq`.
    pub fn high_shelf(freq: f32, sample_rate: f32, gain_db: f32) -> Self {
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let a = 10f32.powf(gain_db / 40.0);
        let sqrt_a = a.sqrt();
        let alpha = w0.sin() * 0.5;
        let a0 = 2.0 * sqrt_a * alpha + (a - 1.0).mul_add(cos_w0, a + 1.0);
        Self {
            b0: a * (2.0 * sqrt_a * alpha + (a - 1.0).mul_add(cos_w0, a + 1.0)) / a0,
            b1: -2.0 * a * (a + 1.0).mul_add(cos_w0, a - 1.0) / a0,
            b2: a * ((a - 1.0).mul_add(cos_w0, a + 1.0) - 2.0 * sqrt_a * alpha) / a0,
            a1: 2.0 * (a + 1.0).mul_add(-cos_w0, a - 1.0) / a0,
            a2: ((a + 1.0) - (a - 1.0) * cos_w0 - 2.0 * sqrt_a * alpha) / a0,
        }
    }
}

/// Run the biquad recursion over the buffer in place.
///
/// The feedback path depends on the previous two outputs, so samples are
/// processed strictly in order; no chunking or reordering across one state.
pub fn apply_biquad(buffer: &mut [f32], c: &BiquadCoeffs, state: &mut BiquadState) {
    for sample in buffer.iter_mut() {
        let x0 = *sample;
        let y0 = c.b0 * x0 + c.b1 * state.x1 + c.b2 * state.x2
            - c.a1 * state.y1
            - c.a2 * state.y2;
        state.x2 = state.x1;
        state.x1 = x0;
        state.y2 = state.y1;
        state.y1 = y0;
        *sample = y0;
    }
}

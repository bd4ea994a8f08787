use std::path::Path;

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Decoded stereo audio: deinterleaved channels normalized to [-1, 1].
pub struct AudioBuffer {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
    pub sample_rate: u32,
}

/// Read a WAV file into normalized stereo buffers.
///
/// Integer PCM (8/16/24/32-bit) is scaled to [-1, 1]; 32-bit float is taken
/// as-is. Mono input is duplicated onto both channels. Anything with more
/// than two channels is rejected.
pub fn read_stereo<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let mut reader =
        WavReader::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.channels > 2 {
        bail!("unsupported channel count: {}", spec.channels);
    }

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .context("failed to decode float samples")?,
        (SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .context("failed to decode integer samples")?
        }
        (format, bits) => bail!("unsupported sample format: {bits}-bit {format:?}"),
    };

    let (left, right) = if spec.channels == 1 {
        (samples.clone(), samples)
    } else {
        let frames = samples.len() / 2;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for frame in samples.chunks_exact(2) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
        (left, right)
    };

    Ok(AudioBuffer {
        left,
        right,
        sample_rate: spec.sample_rate,
    })
}

/// Write stereo buffers as a 32-bit float WAV file.
pub fn write_stereo<P: AsRef<Path>>(
    path: P,
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
) -> Result<()> {
    let path = path.as_ref();
    if left.len() != right.len() {
        bail!(
            "channel length mismatch: left has {} samples, right has {}",
            left.len(),
            right.len()
        );
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    for (&l, &r) in left.iter().zip(right) {
        writer.write_sample(l)?;
        writer.write_sample(r)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finalize '{}'", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use tempfile::TempDir;

    const SR: u32 = 48_000;

    #[test]
    fn float_round_trip_preserves_samples() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("tone.wav");

        let left: Vec<f32> = (0..4_800)
            .map(|i| 0.5 * (2.0 * PI * 440.0 * i as f32 / SR as f32).sin())
            .collect();
        let right: Vec<f32> = left.iter().map(|x| -x).collect();

        write_stereo(&path, &left, &right, SR)?;
        let audio = read_stereo(&path)?;

        assert_eq!(audio.sample_rate, SR);
        assert_eq!(audio.left.len(), left.len());
        for i in 0..left.len() {
            assert_eq!(audio.left[i], left[i]);
            assert_eq!(audio.right[i], right[i]);
        }
        Ok(())
    }

    #[test]
    fn i16_input_is_normalized() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("int.wav");

        let spec = WavSpec {
            channels: 2,
            sample_rate: SR,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec)?;
        for _ in 0..100 {
            writer.write_sample(16_384i16)?; // 0.5 full scale
            writer.write_sample(-16_384i16)?;
        }
        writer.finalize()?;

        let audio = read_stereo(&path)?;
        assert!(audio.left.iter().all(|&x| (x - 0.5).abs() < 1e-4));
        assert!(audio.right.iter().all(|&x| (x + 0.5).abs() < 1e-4));
        Ok(())
    }

    #[test]
    fn mono_input_duplicates_channels() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("mono.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: SR,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec)?;
        for i in 0..100 {
            writer.write_sample(i as f32 / 100.0)?;
        }
        writer.finalize()?;

        let audio = read_stereo(&path)?;
        assert_eq!(audio.left, audio.right);
        assert_eq!(audio.left.len(), 100);
        Ok(())
    }

    #[test]
    fn write_rejects_mismatched_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wav");
        let result = write_stereo(&path, &[0.0; 10], &[0.0; 9], SR);
        assert!(result.is_err());
    }
}

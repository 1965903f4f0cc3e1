use std::path::Path;

use anyhow::Context;

use super::frame::StereoFrame;

#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
}

impl SampleBuffer {
    pub fn from_frames(data: Vec<StereoFrame>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Load a WAV file from disk as stereo frames at `target_rate`
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => { // int, scale to [-1, 1]
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        // mono is duplicated, anything past two channels keeps the first pair
        let mut frames: Vec<StereoFrame> = samples
            .chunks_exact(channels)
            .map(|c| match c {
                [x] => StereoFrame::mono(*x),
                [l, r, ..] => StereoFrame { left: *l, right: *r },
                [] => StereoFrame::default(),
            })
            .collect();

        if spec.sample_rate != target_rate {
            frames = resample_linear(&frames, spec.sample_rate, target_rate);
        }
        Ok(Self::from_frames(frames))
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || frames.is_empty() {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let last = frames.len() - 1;

    (0..out_len)
        .map(|i| {
            let src_pos = i as f64 / ratio;
            let idx = src_pos.floor() as usize;
            if idx >= last {
                frames[last]
            } else {
                frames[idx].lerp(frames[idx + 1], (src_pos - idx as f64) as f32)
            }
        })
        .collect()
}

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio_api::AudioCommand;

mod engine;
mod frame;
mod sample_buffer;
mod sample_id;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;
pub use sample_id::{SampleId, SampleIdAllocator};

use engine::Engine;

// Samples are loaded at the device's rate; this only applies when there is no device.
pub const FALLBACK_SAMPLE_RATE: u32 = 44100;

// frames rendered per pass inside the callback
const BLOCK: usize = 256;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    // never blocks the frame loop; a full queue drops the command
    pub fn send(&self, cmd: AudioCommand) {
        if self.tx.try_send(cmd).is_err() {
            log::debug!("audio command queue full, dropping command");
        }
    }
}

pub fn start_audio(max_voices: usize) -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;
    let sample_rate: u32 = config.sample_rate();
    let channels = config.channels() as usize;

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream =
                build_output_stream_f32(&device, &config.into(), rx, channels, max_voices)?;
            output_stream.play().context("failed to play output stream")?;
            log::info!(
                "audio output started: {sample_rate} Hz, {channels} channels, {max_voices} voices"
            );
            Ok(AudioHandle { tx, sample_rate, _output_stream: output_stream })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
    max_voices: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new(max_voices);
    let mut block = [StereoFrame::default(); BLOCK];

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }
            for chunk in data.chunks_mut(BLOCK * channels.max(1)) {
                let n_frames = chunk.len() / channels.max(1);
                let frames = &mut block[..n_frames];
                engine.render_block(frames);
                write_interleaved(chunk, frames, channels);
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// spread stereo frames over however many channels the device has
fn write_interleaved(out: &mut [f32], frames: &[StereoFrame], channels: usize) {
    match channels {
        0 => {}
        1 => {
            for (o, f) in out.iter_mut().zip(frames) {
                *o = (f.left + f.right) * 0.5;
            }
        }
        _ => {
            for (o, f) in out.chunks_exact_mut(channels).zip(frames) {
                o.fill(0.0);
                o[0] = f.left;
                o[1] = f.right;
            }
        }
    }
}

use std::collections::HashMap;

use crate::audio_api::{AudioCommand, TriggerParams};

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::sample_id::SampleId;
use super::voice::Voice;

// Runs inside the cpal callback: mixes every live voice into the output block.
pub struct Engine {
    samples: HashMap<SampleId, SampleBuffer>,
    voices: Vec<Option<Voice>>, // fixed pool, sized once up front
}

impl Engine {
    pub fn new(max_voices: usize) -> Self {
        Self {
            samples: HashMap::new(),
            voices: vec![None; max_voices.max(1)],
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { id, buffer } => {
                self.samples.insert(id, buffer);
            }
            AudioCommand::Trigger(t) => self.trigger_voice(t),
        }
    }

    fn trigger_voice(&mut self, t: TriggerParams) {
        if !self.samples.contains_key(&t.sample_id) {
            return;
        }
        // first free slot, otherwise steal slot 0
        let slot = self.voices.iter().position(Option::is_none).unwrap_or(0);
        self.voices[slot] = Some(Voice::new(t.sample_id, t.gain));
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.iter().flatten().count()
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::default());
        for slot in &mut self.voices {
            let Some(voice) = slot else { continue };
            let still_playing = match self.samples.get(&voice.sample_id) {
                Some(buffer) => voice.render_into(buffer, out),
                None => false,
            };
            if !still_playing {
                *slot = None;
            }
        }
        for frame in out.iter_mut() {
            *frame = frame.clipped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_click(max_voices: usize, len: usize) -> Engine {
        let mut engine = Engine::new(max_voices);
        engine.handle_cmd(AudioCommand::RegisterSample {
            id: SampleId(7),
            buffer: SampleBuffer::from_frames(vec![StereoFrame::mono(0.25); len]),
        });
        engine
    }

    fn trigger(engine: &mut Engine, id: u64) {
        engine.handle_cmd(AudioCommand::Trigger(TriggerParams { sample_id: SampleId(id), gain: 1.0 }));
    }

    #[test]
    fn triggered_sample_is_mixed_until_it_ends() {
        let mut engine = engine_with_click(4, 6);
        trigger(&mut engine, 7);
        trigger(&mut engine, 7);

        let mut out = [StereoFrame::default(); 4];
        engine.render_block(&mut out);
        assert_eq!(out[0], StereoFrame::mono(0.5));
        assert_eq!(engine.active_voices(), 2);

        engine.render_block(&mut out);
        assert_eq!(out[1], StereoFrame::mono(0.5));
        assert_eq!(out[2], StereoFrame::default());
        assert_eq!(engine.active_voices(), 0);
    }

    #[test]
    fn unknown_samples_are_ignored() {
        let mut engine = engine_with_click(2, 4);
        trigger(&mut engine, 99);
        assert_eq!(engine.active_voices(), 0);
    }

    #[test]
    fn full_pool_steals_first_voice() {
        let mut engine = engine_with_click(2, 100);
        for _ in 0..5 {
            trigger(&mut engine, 7);
        }
        assert_eq!(engine.active_voices(), 2);
    }

    #[test]
    fn output_is_clipped() {
        let mut engine = engine_with_click(8, 4);
        for _ in 0..8 {
            trigger(&mut engine, 7);
        }
        let mut out = [StereoFrame::default(); 2];
        engine.render_block(&mut out);
        assert_eq!(out[0], StereoFrame::mono(1.0));
    }
}

// Sits between the TUI and everything else: owns the sequencer, the pattern
// store and the sound slots, turns input events into sequencer calls, and
// hands back audio commands for main to forward to the engine.

use crate::audio::SampleIdAllocator;
use crate::audio_api::{AudioCommand, AudioTrigger, TriggerParams};
use crate::config::Config;
use crate::loader::sample_loader;
use crate::pipeline::persistence::PatternStore;
use crate::pipeline::project::SoundSlot;
use crate::pipeline::sequencer::SequencerEngine;
use crate::shared::{DisplayState, InputEvent};

pub struct Middle {
    engine: SequencerEngine,
    store: PatternStore,
    sounds: Vec<SoundSlot>,
    ids: SampleIdAllocator,
    status: Option<String>,
}

// Turns "play instrument N" into trigger commands for whatever sample is in slot N
struct SlotTrigger<'a> {
    sounds: &'a [SoundSlot],
    cmds: &'a mut Vec<AudioCommand>,
}

impl AudioTrigger for SlotTrigger<'_> {
    fn play(&mut self, instrument: usize) {
        let Some(slot) = self.sounds.get(instrument) else { return };
        match slot.sample_id {
            Some(sample_id) => self.cmds.push(AudioCommand::Trigger(TriggerParams {
                sample_id,
                gain: slot.gain,
            })),
            None => log::trace!("{} has no sample, skipping", slot.label),
        }
    }
}

impl Middle {
    pub fn new(config: &Config, store: PatternStore) -> Self {
        let sounds = config
            .instruments
            .iter()
            .map(|inst| SoundSlot::new(inst.label.clone(), config.sample_path(inst)))
            .collect::<Vec<_>>();
        let engine =
            SequencerEngine::new(sounds.len(), config.steps, config.frame_rate, config.rate);
        Self {
            engine,
            store,
            sounds,
            ids: SampleIdAllocator::default(),
            status: None,
        }
    }

    /// Load every slot's WAV, resampled to the output device's rate. Missing or
    /// broken files leave that row silent.
    pub fn load_samples(&mut self, sample_rate: u32) -> Vec<AudioCommand> {
        let mut cmds = Vec::new();
        for slot in &mut self.sounds {
            match sample_loader::load(&mut self.ids, &slot.sample_path, sample_rate) {
                Ok((id, buffer)) => {
                    log::info!("loaded {} from {}", slot.label, slot.sample_path.display());
                    slot.sample_id = Some(id);
                    cmds.push(AudioCommand::RegisterSample { id, buffer });
                }
                Err(e) => log::warn!("{} will be silent: {e:#}", slot.label),
            }
        }
        cmds
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        log::debug!("input: {event:?}");
        let result = match event {
            InputEvent::ToggleCell { instrument, step } => {
                self.engine.toggle_cell(instrument, step)
            }
            InputEvent::TogglePlayback => {
                self.engine.toggle_playback();
                Ok(())
            }
            InputEvent::AdjustTempo(delta) => {
                let rate = self.engine.set_tempo(delta);
                self.status = Some(format!("tempo {rate}"));
                Ok(())
            }
            InputEvent::AdjustSteps(delta) => {
                let steps = self.engine.set_step_count(delta);
                self.status = Some(format!("{steps} steps"));
                Ok(())
            }
            InputEvent::ClearGrid => self.engine.clear_grid(),
            InputEvent::EnterSave => {
                self.engine.enter_save_mode();
                self.status = None;
                Ok(())
            }
            InputEvent::EnterLoad => {
                self.engine.enter_load_mode();
                self.status = None;
                Ok(())
            }
            InputEvent::ConfirmSave(name) => {
                let verb = if self.store.contains(&name) { "overwrote" } else { "saved" };
                self.engine.save(&mut self.store, &name).map(|()| {
                    self.engine.resume_playback();
                    self.status = Some(format!("{verb} {:?}", name.trim()));
                })
            }
            InputEvent::ConfirmLoad(name) => {
                self.engine.load(&self.store, &name).map(|()| {
                    self.engine.resume_playback();
                    self.status = Some(format!("loaded {:?}", name.trim()));
                })
            }
            InputEvent::Cancel => {
                self.engine.resume_playback();
                Ok(())
            }
            InputEvent::Quit => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("{e}");
            self.status = Some(e.to_string());
        }
    }

    /// Run `frames` sequencer frames and collect the triggers they produce.
    pub fn tick(&mut self, frames: u32) -> Vec<AudioCommand> {
        let mut cmds = Vec::new();
        let mut trigger = SlotTrigger { sounds: &self.sounds, cmds: &mut cmds };
        for _ in 0..frames {
            self.engine.advance_frame(&mut trigger);
        }
        cmds
    }

    pub fn frame_rate(&self) -> u32 {
        self.engine.transport().frame_rate()
    }

    pub fn display_state(&self) -> DisplayState {
        let transport = self.engine.transport();
        DisplayState {
            labels: self.sounds.iter().map(|s| s.label.clone()).collect(),
            cells: self.engine.grid().cells().to_vec(),
            loaded: self.sounds.iter().map(SoundSlot::is_loaded).collect(),
            current_step: transport.current_step(),
            step_count: transport.step_count(),
            mode: transport.state(),
            rate: transport.rate(),
            frames_per_step: transport.frames_per_step(),
            patterns: self.engine.list(&self.store),
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SampleId;
    use crate::pipeline::persistence::pattern_file_path;
    use crate::pipeline::test_fixture::ScratchDir;
    use crate::pipeline::transport::{EditPurpose, TransportState};

    fn middle(tag: &str) -> (ScratchDir, Middle) {
        let dir = ScratchDir::new(&format!("middle-{tag}"));
        let config = Config { project_dir: dir.path().to_path_buf(), rate: 20, ..Config::default() };
        let store = PatternStore::open_or_empty(pattern_file_path(dir.path()));
        (dir, Middle::new(&config, store))
    }

    fn write_click(path: &std::path::Path, rate: u32) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..rate / 10 {
            writer.write_sample(1000i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn triggered(cmds: &[AudioCommand]) -> Vec<SampleId> {
        cmds.iter()
            .filter_map(|c| match c {
                AudioCommand::Trigger(t) => Some(t.sample_id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn missing_samples_leave_rows_silent() {
        let (_dir, mut m) = middle("silent");
        assert!(m.load_samples(44100).is_empty());
        m.handle_input(InputEvent::ToggleCell { instrument: 0, step: 1 });
        assert!(m.tick(3).is_empty());
        assert!(m.display_state().loaded.iter().all(|l| !l));
    }

    #[test]
    fn loaded_rows_trigger_their_sample() {
        let (_dir, mut m) = middle("loaded");
        m.sounds[1].sample_id = Some(SampleId(42));
        m.handle_input(InputEvent::ToggleCell { instrument: 1, step: 1 });
        m.handle_input(InputEvent::ToggleCell { instrument: 3, step: 1 });

        // rate 20 at 60fps: three frames per step
        assert!(m.tick(2).is_empty());
        assert_eq!(triggered(&m.tick(1)), vec![SampleId(42)]);
        assert_eq!(m.display_state().current_step, 1);
    }

    #[test]
    fn errors_become_status_text() {
        let (_dir, mut m) = middle("status");
        m.handle_input(InputEvent::ToggleCell { instrument: 40, step: 0 });
        assert!(m.display_state().status.unwrap().contains("outside"));

        m.handle_input(InputEvent::EnterLoad);
        m.handle_input(InputEvent::ConfirmLoad("ghost".into()));
        let ds = m.display_state();
        assert!(ds.status.unwrap().contains("ghost"));
        assert_eq!(ds.mode, TransportState::Editing { purpose: EditPurpose::Load });
    }

    #[test]
    fn save_then_load_resumes_playback() {
        let (_dir, mut m) = middle("saveload");
        m.handle_input(InputEvent::ToggleCell { instrument: 5, step: 7 });
        m.handle_input(InputEvent::EnterSave);
        m.handle_input(InputEvent::ToggleCell { instrument: 0, step: 0 });
        m.handle_input(InputEvent::ConfirmSave("  ".into()));
        assert_ne!(m.display_state().mode, TransportState::Running);

        m.handle_input(InputEvent::ConfirmSave("tom".into()));
        let ds = m.display_state();
        assert_eq!(ds.mode, TransportState::Running);
        assert_eq!(ds.patterns, vec!["tom".to_owned()]);
        assert_eq!(ds.status.as_deref(), Some("saved \"tom\""));
        assert!(!ds.cells[0][0]);

        m.handle_input(InputEvent::EnterSave);
        m.handle_input(InputEvent::ConfirmSave("tom".into()));
        assert_eq!(m.display_state().status.as_deref(), Some("overwrote \"tom\""));

        m.handle_input(InputEvent::ClearGrid);
        m.handle_input(InputEvent::AdjustSteps(1));
        m.handle_input(InputEvent::EnterLoad);
        m.handle_input(InputEvent::ConfirmLoad("tom".into()));
        let ds = m.display_state();
        assert_eq!(ds.mode, TransportState::Running);
        assert_eq!(ds.step_count, 8);
        assert!(ds.cells[5][7]);
    }

    #[test]
    fn cancel_resumes_from_same_step() {
        let (_dir, mut m) = middle("cancel");
        m.tick(4);
        m.handle_input(InputEvent::EnterSave);
        m.tick(30);
        assert_eq!(m.display_state().current_step, 1);
        m.handle_input(InputEvent::Cancel);
        m.tick(2);
        assert_eq!(m.display_state().current_step, 2);
    }

    #[test]
    fn samples_are_resampled_to_the_device_rate() {
        let (dir, mut m) = middle("rate");
        let config = Config { project_dir: dir.path().to_path_buf(), ..Config::default() };
        write_click(&config.sample_path(&config.instruments[0]), 44100);

        let cmds = m.load_samples(48000);
        let [AudioCommand::RegisterSample { buffer, .. }] = cmds.as_slice() else {
            panic!("expected one registered sample, got {}", cmds.len());
        };
        // a tenth of a second at 44.1kHz is 4800 frames at 48kHz
        assert_eq!(buffer.len(), 4800);
        assert_eq!(m.display_state().loaded, vec![true, false, false, false, false, false]);
    }
}

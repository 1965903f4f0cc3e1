// What sits behind each instrument row at runtime.

use std::path::PathBuf;

use crate::audio::SampleId;

pub const DEFAULT_GAIN: f32 = 0.8;

#[derive(Clone, Debug)]
pub struct SoundSlot {
    pub label: String,
    pub sample_path: PathBuf,
    // None until the WAV loaded and was registered with the audio engine
    pub sample_id: Option<SampleId>,
    pub gain: f32,
}

impl SoundSlot {
    pub fn new(label: impl Into<String>, sample_path: PathBuf) -> Self {
        Self {
            label: label.into(),
            sample_path,
            sample_id: None,
            gain: DEFAULT_GAIN,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.sample_id.is_some()
    }
}

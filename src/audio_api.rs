pub use crate::audio::{SampleBuffer, SampleId};

#[derive(Clone, Debug)]
pub struct TriggerParams {
    pub sample_id: SampleId,
    pub gain: f32,
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files (interrupts thread), so you must first
    // register a preloaded buffer (see sample_loader.rs), then send that to
    // the engine
    RegisterSample { id: SampleId, buffer: SampleBuffer },

    // The engine then uses the sample id to trigger the sound
    Trigger(TriggerParams),
}

/// Anything that can sound an instrument row. The sequencer only ever says
/// "play instrument N now" and never waits on the result.
pub trait AudioTrigger {
    fn play(&mut self, instrument: usize);
}

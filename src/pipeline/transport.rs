// Frame-counting playhead. The tempo control is a divisor of the frame rate,
// so `rate` 5 at 60fps means a step every 12 frames.

use crate::shared::{MAX_RATE, MAX_STEPS, MIN_RATE, MIN_STEPS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPurpose {
    Save,
    Load,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Running,
    // a name is being typed or picked; playback is frozen in place
    Editing { purpose: EditPurpose },
}

#[derive(Clone, Debug)]
pub struct Transport {
    state: TransportState,
    frame_rate: u32,
    rate: u32,
    frames_per_step: u32,
    elapsed_frames: u32,
    current_step: usize,
    step_count: usize,
    step_just_advanced: bool,
}

impl Transport {
    pub fn new(frame_rate: u32, rate: u32, step_count: usize) -> Self {
        let mut transport = Self {
            state: TransportState::Stopped,
            frame_rate: frame_rate.max(1),
            rate: MIN_RATE,
            frames_per_step: 1,
            elapsed_frames: 0,
            current_step: 0,
            step_count: step_count.clamp(MIN_STEPS, MAX_STEPS),
            step_just_advanced: false,
        };
        transport.set_rate(rate);
        transport
    }

    /// Advance one rendered frame. Returns true when the playhead moved.
    pub fn tick(&mut self) -> bool {
        if self.state != TransportState::Running {
            return false;
        }
        self.elapsed_frames += 1;
        if self.elapsed_frames < self.frames_per_step {
            return false;
        }
        self.elapsed_frames = 0;
        self.step_just_advanced = true;
        self.current_step = (self.current_step + 1) % self.step_count;
        true
    }

    pub fn consume_advance_flag(&mut self) -> bool {
        std::mem::take(&mut self.step_just_advanced)
    }

    pub fn set_rate(&mut self, new_rate: u32) -> u32 {
        self.rate = new_rate.clamp(MIN_RATE, MAX_RATE);
        self.frames_per_step = (self.frame_rate / self.rate).max(1);
        self.rate
    }

    // keeps elapsed_frames, only the playhead is pulled back into range
    pub fn set_step_count(&mut self, new_count: usize) -> usize {
        self.step_count = new_count.clamp(MIN_STEPS, MAX_STEPS);
        self.current_step = self.current_step.min(self.step_count - 1);
        self.step_count
    }

    pub fn play(&mut self) {
        if self.state == TransportState::Stopped {
            self.state = TransportState::Running;
        }
    }

    // stopping keeps the playhead and the frames counted toward the next step
    pub fn stop(&mut self) {
        if self.state == TransportState::Running {
            self.state = TransportState::Stopped;
        }
    }

    pub fn toggle_play(&mut self) {
        match self.state {
            TransportState::Running => self.stop(),
            TransportState::Stopped => self.play(),
            TransportState::Editing { .. } => {}
        }
    }

    pub fn begin_edit(&mut self, purpose: EditPurpose) {
        self.state = TransportState::Editing { purpose };
    }

    pub fn resume(&mut self) {
        self.state = TransportState::Running;
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, TransportState::Editing { .. })
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn frames_per_step(&self) -> u32 {
        self.frames_per_step
    }

    #[cfg(test)]
    pub fn elapsed_frames(&self) -> u32 {
        self.elapsed_frames
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::sample_id::SampleId;

// One playing copy of a registered sample, one-shot from the start
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    pub sample_id: SampleId,
    pub gain: f32,
    pos: usize,
}

impl Voice {
    pub fn new(sample_id: SampleId, gain: f32) -> Self {
        Self { sample_id, gain, pos: 0 }
    }

    /// Mix this voice into `out`. Returns false once the sample has run out.
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) -> bool {
        let remaining = buffer.data.get(self.pos..).unwrap_or(&[]);
        let n = remaining.len().min(out.len());
        for (frame, sample) in out.iter_mut().zip(&remaining[..n]) {
            *frame += *sample * self.gain;
        }
        self.pos += n;
        self.pos < buffer.len()
    }
}

// The sequencer engine: one live grid, one transport, and the commands the
// UI is allowed to send them.

use super::error::{PatternShapeError, Result, SequencerError};
use super::grid::Grid;
use super::persistence::PatternStore;
use super::transport::{EditPurpose, Transport};
use crate::audio_api::AudioTrigger;

#[derive(Clone, Debug)]
pub struct SequencerEngine {
    grid: Grid,
    transport: Transport,
}

impl SequencerEngine {
    /// A running sequencer with an empty grid.
    pub fn new(instruments: usize, steps: usize, frame_rate: u32, rate: u32) -> Self {
        let grid = Grid::new(instruments, steps);
        let mut transport = Transport::new(frame_rate, rate, grid.step_count());
        transport.play();
        Self { grid, transport }
    }

    /// Called once per rendered frame. Fires every instrument that is active on
    /// the step the playhead just landed on.
    pub fn advance_frame(&mut self, audio: &mut impl AudioTrigger) {
        self.transport.tick();
        if !self.transport.consume_advance_flag() {
            return;
        }
        for instrument in self.firing_now() {
            audio.play(instrument);
        }
    }

    /// Instruments active at the current playhead.
    pub fn firing_now(&self) -> Vec<usize> {
        let step = self.transport.current_step();
        (0..self.grid.instrument_count())
            .filter(|&i| self.grid.get(i, step))
            .collect()
    }

    pub fn toggle_cell(&mut self, instrument: usize, step: usize) -> Result<()> {
        self.ensure_editable()?;
        self.grid.toggle(instrument, step)
    }

    pub fn clear_grid(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.grid.clear();
        Ok(())
    }

    pub fn set_tempo(&mut self, delta: i32) -> u32 {
        let rate = self.transport.rate().saturating_add_signed(delta);
        self.transport.set_rate(rate)
    }

    pub fn set_step_count(&mut self, delta: i32) -> usize {
        let wanted = self.grid.step_count().saturating_add_signed(delta as isize);
        let applied = self.grid.resize_steps(wanted);
        self.transport.set_step_count(applied)
    }

    pub fn toggle_playback(&mut self) {
        self.transport.toggle_play();
    }

    pub fn enter_save_mode(&mut self) {
        self.transport.begin_edit(EditPurpose::Save);
    }

    pub fn enter_load_mode(&mut self) {
        self.transport.begin_edit(EditPurpose::Load);
    }

    pub fn resume_playback(&mut self) {
        self.transport.resume();
    }

    pub fn save(&self, store: &mut PatternStore, name: &str) -> Result<()> {
        store.save(name, self.grid.cells().to_vec())
    }

    /// Replace the live grid with a stored pattern. On any failure the current
    /// grid and playhead are left exactly as they were.
    pub fn load(&mut self, store: &PatternStore, name: &str) -> Result<()> {
        let matrix = store.load(name)?;
        let invalid = |reason: PatternShapeError| SequencerError::InvalidPattern {
            name: name.trim().to_owned(),
            reason,
        };
        let expected = self.grid.instrument_count();
        if matrix.len() != expected {
            return Err(invalid(PatternShapeError::InstrumentCount { found: matrix.len(), expected }));
        }
        let grid = Grid::from_cells(matrix).map_err(invalid)?;
        self.transport.set_step_count(grid.step_count());
        self.grid = grid;
        log::info!("loaded pattern {:?} ({} steps)", name.trim(), self.grid.step_count());
        Ok(())
    }

    pub fn list(&self, store: &PatternStore) -> Vec<String> {
        store.list()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.transport.is_editing() {
            return Err(SequencerError::GridLocked);
        }
        Ok(())
    }
}

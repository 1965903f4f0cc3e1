// The step grid: one row per instrument, one column per step.

use super::error::{PatternShapeError, Result, SequencerError};
use crate::shared::{MAX_STEPS, MIN_STEPS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    // instrument-major, every row is exactly `steps` long
    cells: Vec<Vec<bool>>,
    steps: usize,
}

impl Grid {
    pub fn new(instruments: usize, steps: usize) -> Self {
        let steps = steps.clamp(MIN_STEPS, MAX_STEPS);
        Self {
            cells: vec![vec![false; steps]; instruments.max(1)],
            steps,
        }
    }

    /// Rebuild a grid from a saved matrix. Rejects ragged or empty matrices and
    /// step counts the sequencer can't play.
    pub fn from_cells(cells: Vec<Vec<bool>>) -> std::result::Result<Self, PatternShapeError> {
        let steps = cells.first().map(Vec::len).ok_or(PatternShapeError::NoRows)?;
        if !(MIN_STEPS..=MAX_STEPS).contains(&steps) {
            return Err(PatternShapeError::StepCount(steps));
        }
        if let Some(row) = cells.iter().position(|r| r.len() != steps) {
            return Err(PatternShapeError::Ragged { row, len: cells[row].len(), expected: steps });
        }
        Ok(Self { cells, steps })
    }

    pub fn instrument_count(&self) -> usize {
        self.cells.len()
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn get(&self, instrument: usize, step: usize) -> bool {
        self.row_active(instrument).get(step).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, instrument: usize, step: usize) -> Result<()> {
        let (instruments, steps) = (self.instrument_count(), self.steps);
        let cell = self
            .cells
            .get_mut(instrument)
            .and_then(|row| row.get_mut(step))
            .ok_or(SequencerError::OutOfRange { instrument, step, instruments, steps })?;
        *cell = !*cell;
        Ok(())
    }

    /// Change the number of steps in every row at once. New steps start off;
    /// dropped steps are lost. Returns the clamped count actually applied.
    pub fn resize_steps(&mut self, new_count: usize) -> usize {
        let new_count = new_count.clamp(MIN_STEPS, MAX_STEPS);
        for row in &mut self.cells {
            row.resize(new_count, false);
        }
        self.steps = new_count;
        new_count
    }

    pub fn row_active(&self, instrument: usize) -> &[bool] {
        self.cells.get(instrument).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(false);
        }
    }

    pub fn cells(&self) -> &[Vec<bool>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_every_cell() {
        let mut grid = Grid::new(3, 5);
        grid.toggle(1, 4).unwrap();
        let before = grid.clone();
        for i in 0..3 {
            for s in 0..5 {
                grid.toggle(i, s).unwrap();
                grid.toggle(i, s).unwrap();
            }
        }
        assert_eq!(grid, before);
        assert!(grid.get(1, 4));
    }

    #[test]
    fn toggle_out_of_range_is_rejected() {
        let mut grid = Grid::new(6, 8);
        assert!(matches!(
            grid.toggle(6, 0),
            Err(SequencerError::OutOfRange { instrument: 6, step: 0, .. })
        ));
        assert!(matches!(
            grid.toggle(0, 8),
            Err(SequencerError::OutOfRange { instrument: 0, step: 8, .. })
        ));
        assert!(grid.cells().iter().flatten().all(|c| !c));
    }

    #[test]
    fn growing_keeps_cells_and_adds_silent_steps() {
        let mut grid = Grid::new(6, 16);
        grid.toggle(2, 3).unwrap();
        assert_eq!(grid.resize_steps(20), 20);
        assert!(grid.get(2, 3));
        for i in 0..6 {
            assert_eq!(grid.row_active(i).len(), 20);
            assert!(grid.row_active(i)[16..].iter().all(|c| !c));
        }
    }

    #[test]
    fn shrinking_keeps_retained_cells() {
        let mut grid = Grid::new(2, 8);
        grid.toggle(0, 1).unwrap();
        grid.toggle(1, 7).unwrap();
        grid.resize_steps(4);
        assert_eq!(grid.row_active(0), &[false, true, false, false]);
        assert_eq!(grid.row_active(1), &[false; 4]);

        // the dropped step comes back off
        grid.resize_steps(8);
        assert!(!grid.get(1, 7));
    }

    #[test]
    fn resize_clamps_to_playable_range() {
        let mut grid = Grid::new(2, 8);
        assert_eq!(grid.resize_steps(0), MIN_STEPS);
        assert_eq!(grid.resize_steps(99), MAX_STEPS);
        assert!(grid.cells().iter().all(|row| row.len() == MAX_STEPS));
    }

    #[test]
    fn from_cells_rejects_bad_shapes() {
        assert_eq!(Grid::from_cells(vec![]), Err(PatternShapeError::NoRows));
        assert_eq!(Grid::from_cells(vec![vec![]]), Err(PatternShapeError::StepCount(0)));
        assert_eq!(
            Grid::from_cells(vec![vec![true; 3], vec![false; 2]]),
            Err(PatternShapeError::Ragged { row: 1, len: 2, expected: 3 })
        );
        assert_eq!(Grid::from_cells(vec![vec![false; 21]]), Err(PatternShapeError::StepCount(21)));

        let grid = Grid::from_cells(vec![vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(grid.step_count(), 2);
        assert!(grid.get(1, 1));
    }

    #[test]
    fn clear_keeps_dimensions() {
        let mut grid = Grid::new(3, 7);
        grid.toggle(2, 6).unwrap();
        grid.clear();
        assert_eq!(grid.step_count(), 7);
        assert_eq!(grid.instrument_count(), 3);
        assert!(!grid.get(2, 6));
    }
}

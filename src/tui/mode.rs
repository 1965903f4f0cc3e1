use crate::pipeline::transport::TransportState;
use crate::shared::DisplayState;

// Longest pattern name the save prompt accepts
pub const MAX_NAME_LEN: usize = 32;

// state local to the tui: where the cursor is, what's been typed so far.
// mode, grid size and pattern names are synced from DisplayState each loop
#[derive(Clone, Debug)]
pub struct TuiState {
    pub cursor_instrument: usize,
    pub cursor_step: usize,
    pub name_input: String,
    pub load_selection: usize,
    // synced from DisplayState each frame
    pub mode: TransportState,
    pub instruments: usize,
    pub steps: usize,
    pub patterns: Vec<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            cursor_instrument: 0,
            cursor_step: 0,
            name_input: String::new(),
            load_selection: 0,
            mode: TransportState::Running,
            instruments: 1,
            steps: 1,
            patterns: Vec::new(),
        }
    }
}

impl TuiState {
    pub fn sync(&mut self, ds: &DisplayState) {
        self.mode = ds.mode;
        self.instruments = ds.cells.len().max(1);
        self.steps = ds.step_count.max(1);
        self.patterns.clone_from(&ds.patterns);
        self.cursor_instrument = self.cursor_instrument.min(self.instruments - 1);
        self.cursor_step = self.cursor_step.min(self.steps - 1);
        self.load_selection = self.load_selection.min(self.patterns.len().saturating_sub(1));
    }

    pub fn move_cursor(&mut self, d_instrument: isize, d_step: isize) {
        self.cursor_instrument = self
            .cursor_instrument
            .saturating_add_signed(d_instrument)
            .min(self.instruments - 1);
        self.cursor_step = self.cursor_step.saturating_add_signed(d_step).min(self.steps - 1);
    }

    pub fn selected_pattern(&self) -> Option<&str> {
        self.patterns.get(self.load_selection).map(String::as_str)
    }
}

// Types shared between the TUI, the middle layer and the sequencer.
//
// Keys (resolved by tui/input.rs into the semantic events below):
//   arrows / h j k l   //  move the cursor over the grid
//   Enter / x          //  ToggleCell at the cursor
//   Space              //  TogglePlayback
//   + / -              //  AdjustTempo(+1 / -1)
//   ] / [              //  AdjustSteps(+1 / -1)
//   c                  //  ClearGrid
//   s                  //  EnterSave, then type a name, Enter = ConfirmSave, Esc = Cancel
//   o                  //  EnterLoad, then Up/Down + Enter = ConfirmLoad, Esc = Cancel
//   q / Esc            //  Quit
//
// Same split as always: the middle layer owns the sequencer, the TUI just
// draws whatever `DisplayState` it's handed every frame.

use crate::pipeline::transport::TransportState;

pub const MIN_STEPS: usize = 1;
pub const MAX_STEPS: usize = 20;
pub const MIN_RATE: u32 = 1;
pub const MAX_RATE: u32 = 20;

pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_STEPS: usize = 8;
pub const DEFAULT_RATE: u32 = 6;

// the audio engine gets three voices per instrument row
pub const VOICES_PER_INSTRUMENT: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    ToggleCell { instrument: usize, step: usize },
    TogglePlayback,
    AdjustTempo(i32),
    AdjustSteps(i32),
    ClearGrid,

    EnterSave,
    EnterLoad,
    ConfirmSave(String),
    ConfirmLoad(String),
    Cancel, // leave save/load and resume playback

    Quit,
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub labels: Vec<String>,       // one per instrument row
    pub cells: Vec<Vec<bool>>,
    pub loaded: Vec<bool>,         // whether each row has a sample behind it
    pub current_step: usize,
    pub step_count: usize,
    pub mode: TransportState,
    pub rate: u32,
    pub frames_per_step: u32,
    pub patterns: Vec<String>,     // saved names, for the load panel
    pub status: Option<String>,    // last error or confirmation
}

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use super::mode::{MAX_NAME_LEN, TuiState};
use crate::pipeline::transport::{EditPurpose, TransportState};
use crate::shared::InputEvent;

// poll for a key, resolve it against the tui state into semantic events for
// the middle layer
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code, ts));
    }
    Ok(vec![])
}

pub fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match ts.mode {
        TransportState::Editing { purpose: EditPurpose::Save } => resolve_name_entry(code, ts),
        TransportState::Editing { purpose: EditPurpose::Load } => resolve_load_picker(code, ts),
        TransportState::Running | TransportState::Stopped => resolve_grid(code, ts),
    }
}

fn resolve_grid(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::TogglePlayback],

        KeyCode::Up | KeyCode::Char('k') => { ts.move_cursor(-1, 0); vec![] }
        KeyCode::Down | KeyCode::Char('j') => { ts.move_cursor(1, 0); vec![] }
        KeyCode::Left | KeyCode::Char('h') => { ts.move_cursor(0, -1); vec![] }
        KeyCode::Right | KeyCode::Char('l') => { ts.move_cursor(0, 1); vec![] }
        KeyCode::Enter | KeyCode::Char('x') => vec![InputEvent::ToggleCell {
            instrument: ts.cursor_instrument,
            step: ts.cursor_step,
        }],

        KeyCode::Char('+' | '=') => vec![InputEvent::AdjustTempo(1)],
        KeyCode::Char('-') => vec![InputEvent::AdjustTempo(-1)],
        KeyCode::Char(']') => vec![InputEvent::AdjustSteps(1)],
        KeyCode::Char('[') => vec![InputEvent::AdjustSteps(-1)],
        KeyCode::Char('c') => vec![InputEvent::ClearGrid],

        KeyCode::Char('s') => {
            ts.name_input.clear();
            ts.mode = TransportState::Editing { purpose: EditPurpose::Save };
            vec![InputEvent::EnterSave]
        }
        KeyCode::Char('o') => {
            ts.load_selection = 0;
            ts.mode = TransportState::Editing { purpose: EditPurpose::Load };
            vec![InputEvent::EnterLoad]
        }
        _ => vec![],
    }
}

// typing a name for the save; everything printable goes into the name
fn resolve_name_entry(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Cancel],
        KeyCode::Enter => vec![InputEvent::ConfirmSave(ts.name_input.clone())],
        KeyCode::Backspace => { ts.name_input.pop(); vec![] }
        KeyCode::Char(c) if !c.is_control() && ts.name_input.chars().count() < MAX_NAME_LEN => {
            ts.name_input.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn resolve_load_picker(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Cancel],
        KeyCode::Up | KeyCode::Char('k') => {
            ts.load_selection = ts.load_selection.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if ts.load_selection + 1 < ts.patterns.len() {
                ts.load_selection += 1;
            }
            vec![]
        }
        KeyCode::Enter => match ts.selected_pattern() {
            Some(name) => vec![InputEvent::ConfirmLoad(name.to_owned())],
            None => vec![],
        },
        _ => vec![],
    }
}

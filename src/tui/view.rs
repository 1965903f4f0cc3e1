use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::grid::draw_step_grid;
use super::mode::TuiState;
use crate::pipeline::transport::{EditPurpose, TransportState};
use crate::shared::DisplayState;

const HELP: &str =
    "arrows move  enter toggle  space play/stop  +/- tempo  [/] steps  c clear  s save  o load  q quit";

pub fn render(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // transport readout
            Constraint::Min(6),    // step grid
            Constraint::Length(8), // help or save/load panel
        ])
        .split(area);

    draw_header(frame, sections[0], ds);
    draw_step_grid(frame, sections[1], ds, ts);
    match ds.mode {
        TransportState::Editing { purpose: EditPurpose::Save } => draw_save_panel(frame, sections[2], ds, ts),
        TransportState::Editing { purpose: EditPurpose::Load } => draw_load_panel(frame, sections[2], ds, ts),
        TransportState::Running | TransportState::Stopped => draw_footer(frame, sections[2], ds),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, ds: &DisplayState) {
    let (mode, color) = match ds.mode {
        TransportState::Running => ("PLAYING", Color::Green),
        TransportState::Stopped => ("STOPPED", Color::Red),
        TransportState::Editing { .. } => ("PAUSED", Color::Yellow),
    };
    let line = Line::from(vec![
        Span::styled(mode, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "   tempo {}  ({} frames/step)   steps {}   step {}",
            ds.rate,
            ds.frames_per_step,
            ds.step_count,
            ds.current_step + 1
        )),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("beatgrid")),
        area,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, ds: &DisplayState) {
    let mut lines = vec![Line::raw(HELP)];
    if let Some(status) = &ds.status {
        lines.push(Line::styled(status.as_str(), Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_save_panel(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("name: "),
            Span::styled(format!("{}_", ts.name_input), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::raw("enter save  esc cancel"),
    ];
    if let Some(status) = &ds.status {
        lines.push(Line::styled(status.as_str(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("save pattern")),
        area,
    );
}

fn draw_load_panel(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    // leave room for the border and the status line
    let visible = area.height.saturating_sub(3).max(1) as usize;
    let first = ts.load_selection.saturating_sub(visible - 1);

    let mut lines: Vec<Line<'_>> = if ds.patterns.is_empty() {
        vec![Line::styled("no saved patterns", Style::default().fg(Color::DarkGray))]
    } else {
        ds.patterns
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, name)| {
                if i == ts.load_selection {
                    Line::styled(format!("> {name}"), Style::default().fg(Color::Black).bg(Color::Cyan))
                } else {
                    Line::raw(format!("  {name}"))
                }
            })
            .collect()
    };
    if let Some(status) = &ds.status {
        lines.push(Line::styled(status.as_str(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("load pattern")),
        area,
    );
}

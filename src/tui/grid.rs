use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::mode::TuiState;
use crate::shared::DisplayState;

const LABEL_WIDTH: u16 = 12;

// instrument labels down the left, one box per (instrument, step)
pub fn draw_step_grid(frame: &mut Frame, area: Rect, ds: &DisplayState, ts: &TuiState) {
    let rows = ds.cells.len().max(1) as u32;
    let row_constraints = vec![Constraint::Ratio(1, rows); rows as usize];
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    let steps = ds.step_count.max(1) as u32;
    let mut col_constraints = vec![Constraint::Length(LABEL_WIDTH)];
    col_constraints.extend(std::iter::repeat_n(Constraint::Ratio(1, steps), steps as usize));

    for (instrument, row_area) in row_areas.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints.clone())
            .split(*row_area);

        let label_style = if ds.loaded.get(instrument).copied().unwrap_or(false) {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray) // no sample behind this row
        };
        let label = ds.labels.get(instrument).map(String::as_str).unwrap_or("");
        frame.render_widget(Paragraph::new(Line::styled(label, label_style)), cols[0]);

        for (step, cell_area) in cols.iter().skip(1).enumerate() {
            let active = ds.cells.get(instrument).and_then(|r| r.get(step)).copied().unwrap_or(false);
            let fill = if active { Color::Green } else { Color::Reset };
            let border = if step == ds.current_step { Color::Cyan } else { Color::Yellow };
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(fill));
            if instrument == ts.cursor_instrument && step == ts.cursor_step {
                block = block.border_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
            }
            frame.render_widget(block, *cell_area);
        }
    }
}

//! src/panels/history.rs
//!
//! History panel: renders the most recent projected (x, y) pairs, latest
//! (the marker sample) highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::phase::SharedPhase;

/// Shows the tail of the projected path for the shared plot.
pub struct HistoryPanel {
    pub shared: SharedPhase,
}

impl HistoryPanel {
    /// Create a new HistoryPanel.
    pub fn new(shared: SharedPhase) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for HistoryPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };
        let path = &g.view.rendered.path;
        let height = area.height as usize;
        let start = path.len().saturating_sub(height);
        let last_index = path.len().saturating_sub(1);

        let lines: Vec<Line> = path
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, &(x, y))| {
                let is_latest = i == last_index;
                let xs = if is_latest {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                };
                let ys = if is_latest {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::from(vec![
                    Span::styled("x: ", Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:>8.3}", x), xs),
                    Span::raw(", "),
                    Span::styled("y: ", Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:>8.3}", y), ys),
                ])
            })
            .collect();

        let block = Block::default().title("History").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

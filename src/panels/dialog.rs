//! src/panels/dialog.rs
//!
//! Modal input dialog rendered over the running plot: one text field plus an
//! in-place validation error. Used for the range and indices reconfiguration
//! prompts.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::centered_rect;

/// Snapshot of the dialog state owned by the app loop.
pub struct DialogPanel {
    pub title: String,
    pub prompt: String,
    pub input: String,
    pub error: Option<String>,
}

impl DialogPanel {
    pub fn new(title: &str, prompt: &str, input: &str, error: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            prompt: prompt.to_string(),
            input: input.to_string(),
            error: error.map(str::to_string),
        }
    }
}

impl crate::ui::Panel for DialogPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let rect = centered_rect(50, 30, area);

        let mut lines = vec![
            Line::from(self.prompt.clone()),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(
                    self.input.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("_", Style::default().fg(Color::DarkGray)),
            ]),
        ];
        if let Some(err) = &self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter=apply  Esc=cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow));

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            rect,
        );
    }
}

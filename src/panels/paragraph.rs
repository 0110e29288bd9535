//! src/panels/paragraph.rs
//!
//! Simple paragraph panel used for static help/text blocks (key bindings,
//! footer hints).

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Small reusable paragraph panel; `dim` renders the text grayed out.
pub struct ParagraphPanel {
    pub text: String,
    pub title: String,
    pub dim: bool,
}

impl ParagraphPanel {
    pub fn new(text: &str, title: &str) -> Self {
        Self {
            text: text.to_string(),
            title: title.to_string(),
            dim: false,
        }
    }

    pub fn dimmed(text: &str, title: &str) -> Self {
        Self {
            dim: true,
            ..Self::new(text, title)
        }
    }
}

impl crate::ui::Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut p = Paragraph::new(self.text.clone()).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL),
        );
        if self.dim {
            p = p.style(Style::default().fg(Color::DarkGray));
        }
        f.render_widget(p, area);
    }
}

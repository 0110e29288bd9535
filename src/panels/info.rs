//! src/panels/info.rs
//!
//! Plot info panel: shows the render state, selected dimensions, shared range,
//! and window configuration.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::phase::{RenderState, SharedPhase};

/// Read-only info panel; `highlighted` affects border style.
pub struct InfoPanel {
    pub shared: SharedPhase,
    pub highlighted: bool,
}

impl InfoPanel {
    pub fn new(shared: SharedPhase) -> Self {
        Self {
            shared,
            highlighted: false,
        }
    }
}

impl crate::ui::Panel for InfoPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Ok(g) = self.shared.read() else {
            return;
        };

        let (state, state_style) = match g.view.state {
            RenderState::Valid => ("Valid", Style::default().fg(Color::Green)),
            RenderState::Invalid => ("Invalid", Style::default().fg(Color::Yellow)),
        };
        let range = g.view.range();

        let lines = vec![
            Line::from(vec![
                Span::styled(&g.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  dims={}", g.store.dims())),
                Span::raw("  state="),
                Span::styled(state, state_style),
            ]),
            Line::from(vec![Span::raw(format!(
                "x=dim {}  y=dim {}  range=[{:.3},{:.3}]",
                g.view.index_x(),
                g.view.index_y(),
                range.min(),
                range.max(),
            ))]),
            Line::from(vec![Span::raw(format!(
                "window={:.1}s  samples={}  t={:.2}s",
                g.store.config.window_secs,
                g.store.len(),
                g.store.time(),
            ))]),
        ];

        let mut block = Block::default().title("Info").borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

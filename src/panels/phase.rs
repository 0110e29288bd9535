//! src/panels/phase.rs
//!
//! Phase panel: renders the stats row, the projected path with the tracking
//! marker, zero-cross axis lines, and tick labels. When the window holds too
//! little data it shows the warning overlay instead of a path.
//!
//! Rendering-only logic lives here; the projection state itself is rebuilt
//! through `PhaseShared::redraw_if_dirty` so bursty input costs one rebuild
//! per frame at most.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle, Line as CanvasLine},
    },
};

use crate::phase::{RenderState, SharedPhase};

/// A lightweight wrapper around the shared plot state used for rendering.
pub struct PhasePanel {
    pub shared: SharedPhase,
}

impl PhasePanel {
    /// Create a new PhasePanel for a shared plot.
    pub fn new(shared: SharedPhase) -> Self {
        Self { shared }
    }

    /// One line per canvas row, tick labels placed at their projected rows.
    fn y_labels(
        axis: &crate::phase::AxisProjection,
        height: u16,
        width: usize,
    ) -> Vec<Line<'static>> {
        let mut rows = vec![String::new(); height as usize];
        for tick in axis.ticks(5) {
            let row = axis.project_y(tick).round() as i64;
            let row = row.clamp(0, i64::from(height).saturating_sub(1)) as usize;
            if rows[row].is_empty() {
                rows[row] = format!("{:>w$.2}", tick, w = width);
            }
        }
        rows.into_iter().map(Line::from).collect()
    }

    /// A single row of x tick labels aligned to their projected columns.
    fn x_labels(axis: &crate::phase::AxisProjection, width: u16) -> String {
        let mut row = vec![' '; width as usize];
        for tick in axis.ticks(5) {
            let text = format!("{:.2}", tick);
            if text.len() > row.len() {
                continue;
            }
            let col = axis.project_x(tick).round() as i64;
            // keep the label inside the row, anchored at the tick column
            let start = col
                .min(i64::from(width) - text.len() as i64)
                .max(0) as usize;
            if row[start..start + text.len()].iter().all(|&c| c == ' ') {
                for (i, ch) in text.chars().enumerate() {
                    row[start + i] = ch;
                }
            }
        }
        row.into_iter().collect()
    }
}

impl crate::ui::Panel for PhasePanel {
    /// Draw the phase panel into the provided frame and area.
    ///
    /// # Behavior
    /// * Renders a stats row with sample count, simulation time, and marker.
    /// * Sizes the projection to the canvas area (marker radius follows).
    /// * Performs the coalesced rebuild, then draws either the path + marker
    ///   or the insufficient-data overlay.
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let Ok(mut g) = self.shared.write() else {
            return;
        };

        // Stats row
        let marker_text = match g.view.rendered.marker {
            Some((x, y)) => format!("({:.3}, {:.3})", x, y),
            None => "-".to_string(),
        };
        let stats_text = format!(
            "Samples: {}  t: {:.2}s  X: dim {}  Y: dim {}  Last: {}",
            g.store.len(),
            g.store.time(),
            g.view.index_x(),
            g.view.index_y(),
            marker_text,
        );
        let stats_par =
            Paragraph::new(stats_text).block(Block::default().title("Stats").borders(Borders::ALL));
        f.render_widget(stats_par, chunks[0]);

        // Plot region: bordered block, y-label column, canvas, x-label row.
        let block = Block::default().title(g.name.clone()).borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);
        if inner.width < 12 || inner.height < 4 {
            return;
        }

        const Y_LABEL_W: u16 = 8;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(Y_LABEL_W), Constraint::Min(0)])
            .split(inner);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(cols[1]);
        let canvas_area = rows[0];
        let x_label_area = rows[1];
        let y_label_area = Rect {
            height: canvas_area.height,
            ..cols[0]
        };

        // viewport resize + at most one rebuild per frame
        g.resize(canvas_area.width, canvas_area.height);
        g.redraw_if_dirty();

        if g.view.state == RenderState::Invalid {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from("insufficient data"),
                Line::from("fewer than 2 samples in window"),
            ])
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
            f.render_widget(warning, inner);
            return;
        }

        let domain = g.view.range();
        let axis = g.view.axis;
        let path = g.view.rendered.path.clone();
        let marker = g.view.rendered.marker;
        let color = g.color;
        let radius = axis.radius_to_domain(axis.marker_radius());

        let canvas = Canvas::default()
            .marker(symbols::Marker::Braille)
            .x_bounds([domain.min(), domain.max()])
            .y_bounds([domain.min(), domain.max()])
            .paint(move |ctx| {
                // zero-cross axis lines
                ctx.draw(&CanvasLine {
                    x1: domain.min(),
                    y1: 0.0,
                    x2: domain.max(),
                    y2: 0.0,
                    color: Color::DarkGray,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: domain.min(),
                    x2: 0.0,
                    y2: domain.max(),
                    color: Color::DarkGray,
                });
                for pair in path.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color,
                    });
                }
                if let Some((mx, my)) = marker {
                    ctx.draw(&Circle {
                        x: mx,
                        y: my,
                        radius,
                        color: Color::Red,
                    });
                }
            });
        f.render_widget(canvas, canvas_area);

        // tick labels from the axis projection
        let y_par = Paragraph::new(Self::y_labels(
            &axis,
            canvas_area.height,
            Y_LABEL_W as usize - 1,
        ));
        f.render_widget(y_par, y_label_area);
        let x_par = Paragraph::new(Self::x_labels(&axis, canvas_area.width));
        f.render_widget(x_par, x_label_area);
    }
}

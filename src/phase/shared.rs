//! src/phase/shared.rs
//!
//! Shared per-plot state: the windowed store, the projection view, and the
//! coalesced-redraw flag. Source and control threads mutate this object; the
//! UI thread renders it once per frame.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use ratatui::style::Color;

use super::layout::PhaseLayout;
use super::range::ConfigError;
use super::view::PhaseView;
use crate::series::{SeriesConfig, SeriesStore};

/// The authoritative shared plot object used across threads.
pub struct PhaseShared {
    pub store: SeriesStore,
    pub view: PhaseView,
    pub name: String,
    pub color: Color,

    /// Pending-redraw flag; set by data/config mutations, consumed once per
    /// render opportunity so bursty input coalesces into one rebuild.
    dirty: bool,

    /// Where successful reconfigurations persist the layout. `None` disables
    /// persistence.
    pub layout_path: Option<PathBuf>,
}

impl PhaseShared {
    /// Construct `PhaseShared` for an N-dimensional stream.
    pub fn new(cfg: SeriesConfig, name: &str, color: Color) -> Self {
        let dims = cfg.dims;
        Self {
            store: SeriesStore::new(cfg),
            view: PhaseView::new(dims),
            name: name.to_string(),
            color,
            dirty: true,
            layout_path: None,
        }
    }

    /// Append one decoded frame and schedule a redraw. No rendering happens
    /// here; the UI thread picks the change up at the next frame.
    pub fn ingest(&mut self, values: &[f64]) {
        self.store.append(values);
        self.dirty = true;
    }

    /// Pull a fresh window snapshot and rebuild the cached path and marker.
    pub fn redraw(&mut self) {
        self.store.evict();
        let snapshot = self.store.snapshot();
        self.view.rebuild(&snapshot);
    }

    /// At most one `redraw` per render opportunity.
    pub fn redraw_if_dirty(&mut self) {
        if self.dirty {
            self.dirty = false;
            self.redraw();
        }
    }

    /// Simulation reset: discard the stream, keep indices and range.
    pub fn reset(&mut self) {
        self.store.clear();
        self.dirty = true;
    }

    /// Schedule a redraw without touching data (e.g. terminal resize; the
    /// actual canvas extent is only known at draw time).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Host moved the simulation clock; the window follows it.
    pub fn adjust_time(&mut self, t: f64) {
        self.store.adjust_time(t);
        self.dirty = true;
    }

    /// Viewport changed: update the cell mapping (marker radius follows) and
    /// schedule a redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.view.axis.size() == (width, height) {
            return;
        }
        self.view.resize(width, height);
        self.dirty = true;
    }

    /// Reconfigure the shared axis range. Validation happens before any field
    /// is written; success persists the layout and schedules a redraw.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<(), ConfigError> {
        self.view.set_range(min, max)?;
        self.dirty = true;
        self.persist_layout();
        Ok(())
    }

    /// Reconfigure the plotted dimension indices. Same policy as `set_range`:
    /// validate, then write, then persist.
    pub fn set_indices(&mut self, index_x: i64, index_y: i64) -> Result<(), ConfigError> {
        self.view.set_indices(index_x, index_y)?;
        self.dirty = true;
        self.persist_layout();
        Ok(())
    }

    /// Load a persisted layout (range before indices) and remember the path
    /// for future saves.
    pub fn import_layout(&mut self, path: PathBuf) {
        match PhaseLayout::load(&path) {
            Ok(layout) => {
                if let Err(e) = self.view.apply_layout(layout) {
                    eprintln!("layout {}: ignored ({e})", path.display());
                }
                self.dirty = true;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => eprintln!("layout {}: unreadable ({e})", path.display()),
        }
        self.layout_path = Some(path);
    }

    /// Best-effort save; persistence failures never fail a reconfiguration.
    fn persist_layout(&self) {
        if let Some(path) = &self.layout_path {
            if let Err(e) = self.view.layout().save(path) {
                eprintln!("layout {}: save failed ({e})", path.display());
            }
        }
    }
}

/// Alias: Arc<RwLock<PhaseShared>>
pub type SharedPhase = Arc<RwLock<PhaseShared>>;

/// Alias for a write guard.
pub type PhaseGuard<'a> = std::sync::RwLockWriteGuard<'a, PhaseShared>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::view::RenderState;

    fn shared(dims: usize) -> PhaseShared {
        PhaseShared::new(
            SeriesConfig::new(dims, 1e9, 1.0, 100_000),
            "test",
            Color::Cyan,
        )
    }

    #[test]
    fn ingest_defers_rendering_until_redraw() {
        let mut g = shared(2);
        g.redraw_if_dirty();
        g.ingest(&[1.0, 2.0]);
        g.ingest(&[3.0, 4.0]);
        assert!(g.view.rendered.path.is_empty());
        g.redraw_if_dirty();
        assert_eq!(g.view.rendered.path.len(), 2);
    }

    #[test]
    fn redraw_if_dirty_coalesces() {
        let mut g = shared(2);
        for i in 0..100 {
            g.ingest(&[i as f64, -(i as f64)]);
        }
        g.redraw_if_dirty();
        let first = g.view.rendered.clone();
        // no intervening mutation: nothing to rebuild
        g.redraw_if_dirty();
        assert_eq!(g.view.rendered, first);
    }

    #[test]
    fn reset_clears_data_but_not_configuration() {
        let mut g = shared(4);
        g.set_range(-5.0, 5.0).unwrap();
        g.set_indices(2, 3).unwrap();
        g.ingest(&[1.0, 2.0, 3.0, 4.0]);
        g.ingest(&[5.0, 6.0, 7.0, 8.0]);
        g.redraw();
        assert_eq!(g.view.state, RenderState::Valid);

        g.reset();
        g.redraw();
        assert_eq!(g.view.state, RenderState::Invalid);
        assert_eq!((g.view.index_x(), g.view.index_y()), (2, 3));
        assert_eq!((g.view.range().min(), g.view.range().max()), (-5.0, 5.0));
    }

    #[test]
    fn redraw_is_idempotent_without_new_input() {
        let mut g = shared(2);
        g.ingest(&[0.0, 0.0]);
        g.ingest(&[1.0, 1.0]);
        g.redraw();
        let first = (g.view.rendered.clone(), g.view.state);
        g.redraw();
        assert_eq!((g.view.rendered.clone(), g.view.state), first);
    }

    #[test]
    fn successful_reconfiguration_persists_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut g = shared(4);
        g.import_layout(path.clone());
        g.set_range(-2.0, 8.0).unwrap();
        g.set_indices(3, 0).unwrap();

        let loaded = PhaseLayout::load(&path).unwrap();
        assert_eq!(loaded.min_value, -2.0);
        assert_eq!(loaded.max_value, 8.0);
        assert_eq!((loaded.index_x, loaded.index_y), (3, 0));
    }

    #[test]
    fn rejected_reconfiguration_does_not_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut g = shared(2);
        g.import_layout(path.clone());
        assert!(g.set_range(2.0, 10.0).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn import_layout_applies_saved_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        PhaseLayout {
            min_value: -3.0,
            max_value: 3.0,
            index_x: 1,
            index_y: 0,
        }
        .save(&path)
        .unwrap();

        let mut g = shared(2);
        g.import_layout(path);
        assert_eq!((g.view.index_x(), g.view.index_y()), (1, 0));
        assert_eq!((g.view.range().min(), g.view.range().max()), (-3.0, 3.0));
    }
}

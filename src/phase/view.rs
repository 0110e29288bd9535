//! src/phase/view.rs
//!
//! Projection state and the render cycle: which two dimensions are plotted,
//! the shared axis range, and the cached path/marker rebuilt from each window
//! snapshot. Pure state, renderable and testable without a terminal.

use super::axis::AxisProjection;
use super::layout::PhaseLayout;
use super::range::{ConfigError, Range};
use crate::series::Snapshot;

/// Whether the current window yields a drawable path.
///
/// `Invalid` (fewer than 2 points in the window) is a first-class display
/// state that selects the warning overlay, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    Valid,
    Invalid,
}

/// Output of the last rebuild: the projected path and the marker at the most
/// recent sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rendered {
    pub path: Vec<(f64, f64)>,
    pub marker: Option<(f64, f64)>,
}

/// Projection state owned by one plot instance.
#[derive(Debug)]
pub struct PhaseView {
    /// Dimension count N, fixed at construction.
    dims: usize,

    /// Selected dimensions; always inside `[0, N)`. Equal indices are allowed
    /// (the path degenerates to y = x).
    index_x: usize,
    index_y: usize,

    /// Shared domain-to-cell mapping for both axes.
    pub axis: AxisProjection,

    /// Render state of the last rebuild.
    pub state: RenderState,

    /// Cached path/marker of the last rebuild.
    pub rendered: Rendered,
}

impl PhaseView {
    /// Create a view over an N-dimensional stream plotting dimensions 0 and
    /// `min(1, N-1)` with the default range.
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            index_x: 0,
            index_y: 1.min(dims.saturating_sub(1)),
            axis: AxisProjection::new(Range::default(), 0, 0),
            state: RenderState::Invalid,
            rendered: Rendered::default(),
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn index_x(&self) -> usize {
        self.index_x
    }

    pub fn index_y(&self) -> usize {
        self.index_y
    }

    pub fn range(&self) -> Range {
        self.axis.domain()
    }

    /// Rebuild the cached path and marker from a window snapshot.
    ///
    /// Fewer than 2 retrievable points enters `Invalid` and clears the path;
    /// otherwise the selected dimensions are zipped pointwise, the marker
    /// lands on the most recent pair, and the state returns to `Valid`.
    /// Pure function of `(self, snapshot)`, so repeated calls with the same
    /// snapshot produce identical output.
    pub fn rebuild(&mut self, snapshot: &Snapshot) {
        if snapshot.len() < 2 {
            self.state = RenderState::Invalid;
            self.rendered = Rendered::default();
            return;
        }
        let xs = &snapshot.dims[self.index_x];
        let ys = &snapshot.dims[self.index_y];
        let path: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        let marker = path.last().copied();
        self.rendered = Rendered { path, marker };
        self.state = RenderState::Valid;
    }

    /// Replace the shared axis range.
    ///
    /// Rejects (leaving every field untouched) unless `min < max` and the
    /// range contains zero. On success the new domain reaches both axes and
    /// the resize path re-runs with the current viewport.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<(), ConfigError> {
        let range = Range::new(min, max)?;
        self.axis.set_domain(range);
        let (w, h) = self.axis.size();
        self.resize(w, h);
        Ok(())
    }

    /// Select which two dimensions are plotted.
    ///
    /// Rejects (leaving state untouched) unless both indices lie in `[0, N)`.
    /// Distinctness is not required.
    pub fn set_indices(&mut self, index_x: i64, index_y: i64) -> Result<(), ConfigError> {
        let check = |index: i64| -> Result<usize, ConfigError> {
            if index < 0 || index as usize >= self.dims {
                Err(ConfigError::IndexOutOfBounds {
                    index,
                    dims: self.dims,
                })
            } else {
                Ok(index as usize)
            }
        };
        let (ix, iy) = (check(index_x)?, check(index_y)?);
        self.index_x = ix;
        self.index_y = iy;
        Ok(())
    }

    /// Update the cell extents of the plot area (and thereby the marker
    /// radius, which tracks `min(width, height) / 30`).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.axis.resize(width, height);
    }

    /// Serializable configuration for external persistence.
    pub fn layout(&self) -> PhaseLayout {
        let range = self.range();
        PhaseLayout {
            min_value: range.min(),
            max_value: range.max(),
            index_x: self.index_x,
            index_y: self.index_y,
        }
    }

    /// Apply a persisted configuration, range first so no intermediate draw
    /// sees a stale domain with new indices.
    pub fn apply_layout(&mut self, layout: PhaseLayout) -> Result<(), ConfigError> {
        self.set_range(layout.min_value, layout.max_value)?;
        self.set_indices(layout.index_x as i64, layout.index_y as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{SeriesConfig, SeriesStore};

    fn snapshot_of(dims: usize, samples: &[&[f64]]) -> Snapshot {
        let mut store = SeriesStore::new(SeriesConfig::new(dims, 1e9, 1.0, 100_000));
        for s in samples {
            store.append(s);
        }
        store.snapshot()
    }

    #[test]
    fn zips_selected_dimensions_into_path() {
        let snap = snapshot_of(3, &[&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let mut view = PhaseView::new(3);
        view.rebuild(&snap);
        assert_eq!(view.state, RenderState::Valid);
        assert_eq!(view.rendered.path, vec![(0.0, 0.0), (1.0, 2.0), (4.0, 5.0)]);
        assert_eq!(view.rendered.marker, Some((4.0, 5.0)));
    }

    #[test]
    fn empty_window_is_invalid() {
        let snap = snapshot_of(2, &[]);
        let mut view = PhaseView::new(2);
        view.rebuild(&snap);
        assert_eq!(view.state, RenderState::Invalid);
        assert!(view.rendered.path.is_empty());
        assert_eq!(view.rendered.marker, None);
    }

    #[test]
    fn single_point_window_is_invalid() {
        let snap = snapshot_of(2, &[&[1.0, 2.0]]);
        let mut view = PhaseView::new(2);
        view.rebuild(&snap);
        assert_eq!(view.state, RenderState::Invalid);
    }

    #[test]
    fn recovers_once_enough_data_arrives() {
        let mut view = PhaseView::new(2);
        view.rebuild(&snapshot_of(2, &[&[1.0, 2.0]]));
        assert_eq!(view.state, RenderState::Invalid);
        view.rebuild(&snapshot_of(2, &[&[1.0, 2.0], &[3.0, 4.0]]));
        assert_eq!(view.state, RenderState::Valid);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let snap = snapshot_of(2, &[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let mut view = PhaseView::new(2);
        view.rebuild(&snap);
        let first = view.rendered.clone();
        view.rebuild(&snap);
        assert_eq!(view.rendered, first);
        assert_eq!(view.state, RenderState::Valid);
    }

    #[test]
    fn equal_indices_degenerate_to_diagonal() {
        let snap = snapshot_of(2, &[&[1.0, 9.0], &[2.0, 9.0]]);
        let mut view = PhaseView::new(2);
        view.set_indices(0, 0).unwrap();
        view.rebuild(&snap);
        assert_eq!(view.rendered.path, vec![(1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn set_range_accepts_zero_crossing_ordered_pairs() {
        let mut view = PhaseView::new(2);
        view.set_range(-5.0, 10.0).unwrap();
        let r = view.range();
        assert_eq!((r.min(), r.max()), (-5.0, 10.0));
        // both axes see the new domain
        assert_eq!(view.axis.domain(), r);
    }

    #[test]
    fn set_range_rejection_leaves_state_unchanged() {
        let mut view = PhaseView::new(2);
        let before = view.range();
        assert!(view.set_range(2.0, 10.0).is_err());
        assert!(view.set_range(10.0, -5.0).is_err());
        assert_eq!(view.range(), before);
    }

    #[test]
    fn set_indices_validates_bounds() {
        let mut view = PhaseView::new(4);
        assert!(view.set_indices(1, 4).is_err());
        assert!(view.set_indices(-1, 2).is_err());
        assert_eq!((view.index_x(), view.index_y()), (0, 1));
        view.set_indices(1, 3).unwrap();
        assert_eq!((view.index_x(), view.index_y()), (1, 3));
    }

    #[test]
    fn layout_round_trips_through_view() {
        let mut view = PhaseView::new(4);
        view.set_range(-2.0, 2.0).unwrap();
        view.set_indices(3, 1).unwrap();
        let layout = view.layout();

        let mut other = PhaseView::new(4);
        other.apply_layout(layout).unwrap();
        assert_eq!(other.layout(), layout);
    }

    #[test]
    fn apply_layout_rejects_bad_range_before_touching_indices() {
        let mut view = PhaseView::new(4);
        let bad = PhaseLayout {
            min_value: 3.0,
            max_value: 10.0,
            index_x: 2,
            index_y: 3,
        };
        assert!(view.apply_layout(bad).is_err());
        assert_eq!((view.index_x(), view.index_y()), (0, 1));
    }
}

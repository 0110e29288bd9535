//! src/phase/axis.rs
//!
//! Axis projection: maps domain values to cell coordinates for two axes
//! sharing one numeric range, and produces tick values for labeling.

use super::range::Range;

/// Domain-to-cell mapping for the plot area. Both axes share `domain`; only
/// the cell extents differ.
#[derive(Clone, Copy, Debug)]
pub struct AxisProjection {
    domain: Range,
    width: u16,
    height: u16,
}

impl AxisProjection {
    pub fn new(domain: Range, width: u16, height: u16) -> Self {
        Self {
            domain,
            width,
            height,
        }
    }

    /// Replace the shared domain for both axes.
    pub fn set_domain(&mut self, domain: Range) {
        self.domain = domain;
    }

    pub fn domain(&self) -> Range {
        self.domain
    }

    /// Update the cell extents of the plot area.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Project a domain value onto the horizontal cell axis (0 at the left).
    pub fn project_x(&self, value: f64) -> f64 {
        (value - self.domain.min()) / self.domain.span() * f64::from(self.width)
    }

    /// Project a domain value onto the vertical cell axis (0 at the top,
    /// `domain.max` maps there).
    pub fn project_y(&self, value: f64) -> f64 {
        (self.domain.max() - value) / self.domain.span() * f64::from(self.height)
    }

    /// `n` evenly spaced tick values covering the domain, endpoints included.
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        if n < 2 {
            return vec![self.domain.min()];
        }
        (0..n)
            .map(|i| self.domain.min() + self.domain.span() * (i as f64) / ((n - 1) as f64))
            .collect()
    }

    /// Tracking-marker radius in cells: `min(width, height) / 30`.
    pub fn marker_radius(&self) -> f64 {
        f64::from(self.width.min(self.height)) / 30.0
    }

    /// Convert a cell-radius into domain units along the tighter axis, for
    /// drawing the marker circle in domain coordinates.
    pub fn radius_to_domain(&self, cells: f64) -> f64 {
        let tight = f64::from(self.width.min(self.height)).max(1.0);
        cells * self.domain.span() / tight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> AxisProjection {
        AxisProjection::new(Range::new(-1.0, 1.0).unwrap(), 100, 60)
    }

    #[test]
    fn projects_endpoints_to_cell_extents() {
        let a = axis();
        assert_eq!(a.project_x(-1.0), 0.0);
        assert_eq!(a.project_x(1.0), 100.0);
        assert_eq!(a.project_x(0.0), 50.0);
        assert_eq!(a.project_y(1.0), 0.0);
        assert_eq!(a.project_y(-1.0), 60.0);
        assert_eq!(a.project_y(0.0), 30.0);
    }

    #[test]
    fn set_domain_applies_to_both_axes() {
        let mut a = axis();
        a.set_domain(Range::new(-5.0, 10.0).unwrap());
        assert_eq!(a.project_x(-5.0), 0.0);
        assert_eq!(a.project_y(10.0), 0.0);
        assert_eq!(a.domain().min(), -5.0);
        assert_eq!(a.domain().max(), 10.0);
    }

    #[test]
    fn ticks_cover_domain_evenly() {
        let a = axis();
        let t = a.ticks(5);
        assert_eq!(t, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn marker_radius_tracks_smaller_extent() {
        let mut a = axis();
        assert_eq!(a.marker_radius(), 2.0); // min(100, 60) / 30
        a.resize(30, 90);
        assert_eq!(a.marker_radius(), 1.0);
    }

    #[test]
    fn radius_converts_to_domain_units() {
        let a = axis(); // span 2.0, tight extent 60
        let r = a.radius_to_domain(a.marker_radius());
        assert!((r - 2.0 * 2.0 / 60.0).abs() < 1e-12);
    }
}

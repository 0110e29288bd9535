//! src/series/config.rs
//!
//! Configuration values for the sample stream and memory bounding.
//!
//! Centralized parameters for dimension count, window length, and the implicit
//! time step stamped on each inbound frame.

#[derive(Clone, Debug)]
pub struct SeriesConfig {
    /// Number of scalar channels in every streamed sample (N). Fixed for the
    /// lifetime of one store.
    pub dims: usize,

    /// Length of the visible time window, in simulation seconds.
    pub window_secs: f64,

    /// Simulation time advanced per appended frame (frames carry no timestamp
    /// of their own).
    pub sample_dt: f64,

    /// Hard cap on retained samples regardless of window length (bounded memory).
    pub max_samples: usize,
}

impl SeriesConfig {
    /// Create a new `SeriesConfig`.
    pub fn new(dims: usize, window_secs: f64, sample_dt: f64, max_samples: usize) -> Self {
        Self {
            dims,
            window_secs,
            sample_dt,
            max_samples,
        }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            dims: 2,
            window_secs: 10.0,
            sample_dt: 1.0 / 60.0,
            max_samples: 10_000,
        }
    }
}

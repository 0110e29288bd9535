//! src/series/store.rs
//!
//! Windowed store for the N-dimensional sample stream: per-dimension rings
//! aligned with a timestamp ring, time-based eviction against a simulation
//! clock cursor, and whole-window snapshots.

use std::collections::VecDeque;

use super::config::SeriesConfig;

/// Point-in-time extraction of everything currently inside the window.
///
/// `dims[k][i]` is dimension `k` of the `i`-th retained sample; every inner
/// vector has the same length as `times`.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub times: Vec<f64>,
    pub dims: Vec<Vec<f64>>,
}

impl Snapshot {
    /// Number of samples in the snapshot.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[derive(Debug)]
pub struct SeriesStore {
    /// timestamps of retained samples (oldest at front)
    times: VecDeque<f64>,

    /// one ring per dimension, index-aligned with `times`
    values: Vec<VecDeque<f64>>,

    /// simulation-time cursor; advanced on append, moved by the host clock
    cursor: f64,

    /// config controlling dimensionality, window length, and memory bounds
    pub config: SeriesConfig,
}

impl SeriesStore {
    /// Create an empty store with the provided config.
    pub fn new(config: SeriesConfig) -> Self {
        let values = (0..config.dims).map(|_| VecDeque::new()).collect();
        Self {
            times: VecDeque::new(),
            values,
            cursor: 0.0,
            config,
        }
    }

    /// Append one sample, stamping it with the advancing time cursor.
    ///
    /// A slice whose length differs from the configured dimension count is
    /// discarded silently: a malformed frame must never desynchronize the
    /// rings or take down the render loop.
    ///
    /// Maintains invariant: all rings share one length and stay inside both
    /// the time window and `max_samples`.
    pub fn append(&mut self, sample: &[f64]) {
        if sample.len() != self.config.dims {
            return;
        }
        self.cursor += self.config.sample_dt;
        self.times.push_back(self.cursor);
        for (ring, &v) in self.values.iter_mut().zip(sample) {
            ring.push_back(v);
        }
        self.evict();
    }

    /// Move the simulation-time cursor (host time adjustment) and evict
    /// samples that fell out of the window.
    pub fn adjust_time(&mut self, t: f64) {
        self.cursor = t;
        self.evict();
    }

    /// Drop samples older than `cursor - window_secs`, then enforce the
    /// absolute sample cap.
    pub fn evict(&mut self) {
        let horizon = self.cursor - self.config.window_secs;
        while let Some(&t) = self.times.front() {
            if t >= horizon {
                break;
            }
            self.times.pop_front();
            for ring in &mut self.values {
                ring.pop_front();
            }
        }
        while self.times.len() > self.config.max_samples {
            self.times.pop_front();
            for ring in &mut self.values {
                ring.pop_front();
            }
        }
    }

    /// Time-aligned copy of all samples currently inside the window.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            times: self.times.iter().copied().collect(),
            dims: self
                .values
                .iter()
                .map(|ring| ring.iter().copied().collect())
                .collect(),
        }
    }

    /// Discard all samples and rewind the cursor. Configuration is untouched.
    pub fn clear(&mut self) {
        self.times.clear();
        for ring in &mut self.values {
            ring.clear();
        }
        self.cursor = 0.0;
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Configured dimension count (N).
    pub fn dims(&self) -> usize {
        self.config.dims
    }

    /// Current simulation-time cursor.
    pub fn time(&self) -> f64 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dims: usize, window_secs: f64) -> SeriesStore {
        SeriesStore::new(SeriesConfig::new(dims, window_secs, 1.0, 1_000))
    }

    #[test]
    fn append_aligns_all_rings() {
        let mut s = store(3, 100.0);
        s.append(&[0.0, 0.0, 0.0]);
        s.append(&[1.0, 2.0, 3.0]);
        s.append(&[4.0, 5.0, 6.0]);
        let snap = s.snapshot();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.dims.len(), 3);
        assert_eq!(snap.dims[0], vec![0.0, 1.0, 4.0]);
        assert_eq!(snap.dims[1], vec![0.0, 2.0, 5.0]);
        assert_eq!(snap.dims[2], vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn mismatched_sample_is_discarded() {
        let mut s = store(2, 100.0);
        s.append(&[1.0, 2.0]);
        s.append(&[1.0, 2.0, 3.0]);
        s.append(&[1.0]);
        s.append(&[]);
        assert_eq!(s.len(), 1);
        // cursor only advances for accepted samples
        assert_eq!(s.time(), 1.0);
    }

    #[test]
    fn window_eviction_drops_old_samples() {
        let mut s = store(1, 3.0);
        for i in 0..10 {
            s.append(&[i as f64]);
        }
        // cursor = 10.0, horizon = 7.0: samples stamped 7..=10 survive
        let snap = s.snapshot();
        assert_eq!(snap.len(), 4);
        assert_eq!(snap.times, vec![7.0, 8.0, 9.0, 10.0]);
        assert_eq!(snap.dims[0], vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn adjust_time_evicts_against_new_cursor() {
        let mut s = store(1, 2.0);
        for i in 0..5 {
            s.append(&[i as f64]);
        }
        s.adjust_time(100.0);
        assert!(s.is_empty());
        assert_eq!(s.time(), 100.0);
    }

    #[test]
    fn max_samples_bounds_memory() {
        let mut s = SeriesStore::new(SeriesConfig::new(1, f64::INFINITY, 1.0, 4));
        for i in 0..20 {
            s.append(&[i as f64]);
        }
        assert_eq!(s.len(), 4);
        assert_eq!(s.snapshot().dims[0], vec![16.0, 17.0, 18.0, 19.0]);
    }

    #[test]
    fn clear_resets_data_and_cursor() {
        let mut s = store(2, 10.0);
        s.append(&[1.0, 2.0]);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.dims(), 2);
    }
}

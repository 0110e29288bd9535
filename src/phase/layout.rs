//! src/phase/layout.rs
//!
//! Persisted plot configuration: the selected dimension indices and the shared
//! axis range, saved as JSON so a restart comes back with the same view.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// On-disk layout record. Field names are part of the saved format.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseLayout {
    pub min_value: f64,
    pub max_value: f64,
    pub index_x: usize,
    pub index_y: usize,
}

impl PhaseLayout {
    /// Read a layout from a JSON file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(io::Error::other)
    }

    /// Write the layout to a JSON file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = PhaseLayout {
            min_value: -5.0,
            max_value: 10.0,
            index_x: 0,
            index_y: 2,
        };
        layout.save(&path).unwrap();
        assert_eq!(PhaseLayout::load(&path).unwrap(), layout);
    }

    #[test]
    fn load_of_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PhaseLayout::load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn field_names_are_stable() {
        let layout = PhaseLayout {
            min_value: -1.0,
            max_value: 1.0,
            index_x: 1,
            index_y: 3,
        };
        let json = serde_json::to_string(&layout).unwrap();
        for key in ["min_value", "max_value", "index_x", "index_y"] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }
}

//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod dialog;
pub mod history;
pub mod info;
pub mod paragraph;
pub mod phase;
pub mod title;

pub use dialog::DialogPanel;
pub use history::HistoryPanel;
pub use info::InfoPanel;
pub use paragraph::ParagraphPanel;
pub use phase::PhasePanel;
pub use title::TitlePanel;

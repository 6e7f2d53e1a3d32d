//! Rendering of screens, notifications and saved search results

pub mod formatter;
pub mod progress;

//! Intake source abstraction for receiving health readings.
//!
//! This module provides a trait-based abstraction for receiving readings
//! from various sources (manual entry, polled files, in-process channels).

mod channel;
mod file;
mod manual;
mod record;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use manual::ManualSource;
pub use record::IntakeRecord;

use std::fmt::Debug;

use crate::data::ReadingSet;

/// Trait for receiving readings from various sources.
///
/// Implementations deliver a [`ReadingSet`] whenever new readings are
/// available. Each set replaces the readings the app holds, so a source must
/// send all six metrics for the app to evaluate them.
///
/// # Example
///
/// ```
/// use healthiq::{FileSource, IntakeSource};
///
/// let mut source = FileSource::new("readings.json");
/// if let Some(readings) = source.poll() {
///     println!("Got {} readings", readings.len());
/// }
/// ```
pub trait IntakeSource: Send + Debug {
    /// Poll for the latest readings.
    ///
    /// Returns `Some(readings)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<ReadingSet>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;
}

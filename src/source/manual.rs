//! Manual entry source.

use super::IntakeSource;
use crate::data::ReadingSet;

/// A source that delivers a fixed set of readings once.
///
/// Used when readings are entered by hand in the TUI: the initial values
/// are delivered on the first poll and edits happen in the app itself.
#[derive(Debug)]
pub struct ManualSource {
    initial: Option<ReadingSet>,
}

impl ManualSource {
    pub fn new(initial: ReadingSet) -> Self {
        Self {
            initial: Some(initial),
        }
    }
}

impl IntakeSource for ManualSource {
    fn poll(&mut self) -> Option<ReadingSet> {
        self.initial.take()
    }

    fn description(&self) -> &str {
        "manual entry"
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Metric;

    #[test]
    fn test_manual_source_returns_once() {
        let mut source = ManualSource::new(ReadingSet::new().with(Metric::Steps, 1000.0));
        assert_eq!(source.poll().unwrap().get(Metric::Steps), Some(1000.0));
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }
}

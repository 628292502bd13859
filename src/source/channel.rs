//! Channel-based intake source.
//!
//! Receives reading sets via a tokio watch channel. This is useful when
//! readings are pushed by another task (a device bridge, a test harness)
//! rather than polled from a file.

use tokio::sync::watch;

use super::IntakeSource;
use crate::data::ReadingSet;

/// An intake source that receives readings via a channel.
///
/// # Example
///
/// ```
/// use healthiq::{ChannelSource, Metric, ReadingSet};
///
/// let (tx, source) = ChannelSource::create("ble-bridge");
/// tx.send(ReadingSet::new().with(Metric::HeartRate, 72.0)).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<ReadingSet>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// Only values sent after creation are delivered. The channel's initial
    /// value is treated as already seen. Each sent set is a complete snapshot.
    pub fn new(receiver: watch::Receiver<ReadingSet>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair for sending readings to a ChannelSource.
    pub fn create(source_description: &str) -> (watch::Sender<ReadingSet>, Self) {
        let (tx, rx) = watch::channel(ReadingSet::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl IntakeSource for ChannelSource {
    fn poll(&mut self) -> Option<ReadingSet> {
        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // A dropped sender just means no further readings
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Metric;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Nothing sent yet
        assert!(source.poll().is_none());

        tx.send(ReadingSet::new().with(Metric::Steps, 4200.0)).unwrap();

        let readings = source.poll().unwrap();
        assert_eq!(readings.get(Metric::Steps), Some(4200.0));

        // No change, so poll returns None
        assert!(source.poll().is_none());
        assert_eq!(source.description(), "channel: test");
    }

    #[test]
    fn test_channel_source_sender_dropped() {
        let (tx, mut source) = ChannelSource::create("test");
        drop(tx);
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }
}

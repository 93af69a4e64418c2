use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{LogEntry, LogKind};

/// Bounded, newest-first activity history shown to the user.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> ActivityLog {
        ActivityLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Records a message and mirrors it to the diagnostic log.
    pub fn message(&mut self, time: f64, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.push(time, LogKind::Message(message));
    }

    pub fn separator(&mut self, time: f64) {
        self.push(time, LogKind::Separator);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Messages only, most recent first.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().filter_map(LogEntry::message).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, time: f64, kind: LogKind) {
        let entry = LogEntry {
            seq: self.next_seq,
            time,
            kind,
        };
        self.next_seq += 1;
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod activity_log_tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = ActivityLog::new(10);
        log.message(1.0, "first");
        log.separator(1.5);
        log.message(2.0, "second");

        let times: Vec<f64> = log.entries().map(|e| e.time).collect();
        assert_eq!(times, vec![2.0, 1.5, 1.0]);
        assert_eq!(log.messages(), vec!["second", "first"]);
    }

    #[test]
    fn test_oldest_dropped_beyond_capacity() {
        // Arrange
        let mut log = ActivityLog::new(3);

        // Act
        for i in 0..5 {
            log.message(i as f64, format!("event {}", i));
        }

        // Assert
        assert_eq!(log.len(), 3);
        assert_eq!(log.messages(), vec!["event 4", "event 3", "event 2"]);
        let seqs: Vec<u64> = log.entries().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![4, 3, 2]);
    }

    #[test]
    fn test_empty_log() {
        let log = ActivityLog::new(50);
        assert!(log.is_empty());
        assert!(log.messages().is_empty());
    }
}

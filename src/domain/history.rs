// Bounded snapshot history
use super::snapshot::Snapshot;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Fixed-capacity FIFO of snapshots in chronological order.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    capacity: usize,
    entries: VecDeque<Snapshot>,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a snapshot, evicting the oldest entry once over capacity
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Oldest to newest. Each call starts a fresh pass.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Snapshot> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::ParameterSet;

    fn snapshot(n: i64) -> Snapshot {
        Snapshot::new(n, n as f64, ParameterSet::new())
    }

    #[test]
    fn test_push_under_capacity() {
        let mut history = HistoryBuffer::default();
        for n in 1..=3 {
            history.push(snapshot(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().map(Snapshot::timestamp_ms), Some(3));
    }

    #[test]
    fn test_evicts_oldest_after_capacity() {
        let mut history = HistoryBuffer::default();
        for n in 1..=51 {
            history.push(snapshot(n));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        let stamps: Vec<i64> = history.iter().map(Snapshot::timestamp_ms).collect();
        assert_eq!(stamps, (2..=51).collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut history = HistoryBuffer::new(4);
        for n in 1..=6 {
            history.push(snapshot(n));
        }
        let first: Vec<i64> = history.iter().map(Snapshot::timestamp_ms).collect();
        let second: Vec<i64> = history.iter().map(Snapshot::timestamp_ms).collect();
        assert_eq!(first, vec![3, 4, 5, 6]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_accepts_duplicates() {
        let mut history = HistoryBuffer::new(3);
        history.push(snapshot(7));
        history.push(snapshot(7));
        assert_eq!(history.len(), 2);
    }
}

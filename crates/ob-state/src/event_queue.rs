//! Delay-sorted control event queue for one continuous signal.

use alloc::vec::Vec;
use ob_ir::ControlEvent;

/// An ordered queue of control events for a single signal lane.
///
/// Entries are strictly ascending by `delay` with at most one entry per
/// offset, and the queue is never empty: the first entry always carries
/// the value in effect since the start of the block. With capacity
/// reserved up front (see [`reserve`](Self::reserve)) the realtime
/// mutation path is allocation-free, since a block of `n` samples can
/// hold at most `n` distinct delays.
#[derive(Clone, Debug)]
pub struct ControlEventQueue {
    events: Vec<ControlEvent>,
}

impl ControlEventQueue {
    /// Create a new queue holding the default value 0.0.
    pub fn new() -> Self {
        let mut events = Vec::new();
        events.push(ControlEvent::new(0, 0.0));
        Self { events }
    }

    /// Insert a value at the given sample offset, keeping sorted order.
    ///
    /// A second write at an offset that already has an entry overwrites
    /// it; the last write at a given sample offset wins. The caller
    /// guarantees `delay` is within the configured block.
    pub fn insert(&mut self, delay: u32, value: f32) {
        match self.events.binary_search_by(|e| e.delay.cmp(&delay)) {
            Ok(pos) => self.events[pos].value = value,
            Err(pos) => self.events.insert(pos, ControlEvent::new(delay, value)),
        }
    }

    /// The value in effect at the end of the block so far.
    pub fn current_value(&self) -> f32 {
        self.events.last().map_or(0.0, |e| e.value)
    }

    /// Collapse to a single entry carrying the final value of the block
    /// just completed forward as the next block's starting value.
    pub fn advance(&mut self) {
        debug_assert!(!self.events.is_empty());
        let carried = self.current_value();
        self.events.clear();
        self.events.push(ControlEvent::new(0, carried));
    }

    /// Clear to a single `{0, value}` entry, keeping capacity.
    pub fn reset_to(&mut self, value: f32) {
        self.events.clear();
        self.events.push(ControlEvent::new(0, value));
    }

    /// Re-reserve backing storage for a block of `capacity` samples.
    ///
    /// Allocates; only called from the setup path, never while a block
    /// is being processed.
    pub fn reserve(&mut self, capacity: usize) {
        self.events.shrink_to_fit();
        self.events.reserve(capacity);
    }

    /// The full ordered event sequence for the current block.
    pub fn events(&self) -> &[ControlEvent] {
        &self.events
    }

    /// Number of entries currently queued.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue holds no entries. Always false while the
    /// never-empty invariant holds.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for ControlEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_holds_single_default_entry() {
        let queue = ControlEventQueue::new();
        assert_eq!(queue.events(), &[ControlEvent::new(0, 0.0)]);
        assert_eq!(queue.current_value(), 0.0);
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut queue = ControlEventQueue::new();
        queue.insert(30, 0.3);
        queue.insert(10, 0.1);
        queue.insert(20, 0.2);

        let delays: Vec<u32> = queue.events().iter().map(|e| e.delay).collect();
        assert_eq!(delays, vec![0, 10, 20, 30]);
    }

    #[test]
    fn insert_same_delay_overwrites() {
        let mut queue = ControlEventQueue::new();
        queue.insert(5, 0.5);
        queue.insert(5, 0.8);

        assert_eq!(queue.len(), 2); // initial entry + one at delay 5
        assert_eq!(queue.events()[1], ControlEvent::new(5, 0.8));
    }

    #[test]
    fn insert_at_zero_overwrites_initial_entry() {
        let mut queue = ControlEventQueue::new();
        queue.insert(0, 0.7);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current_value(), 0.7);
    }

    #[test]
    fn unordered_repeated_inserts_stay_strictly_ascending() {
        let mut queue = ControlEventQueue::new();
        for &(delay, value) in &[(9, 0.9), (3, 0.3), (9, 0.1), (1, 0.1), (3, 0.6), (7, 0.7)] {
            queue.insert(delay, value);
        }

        let events = queue.events();
        for pair in events.windows(2) {
            assert!(pair[0].delay < pair[1].delay, "delays must be strictly ascending");
        }
        // Last write wins for the repeated offsets
        assert!(events.iter().any(|e| e.delay == 9 && e.value == 0.1));
        assert!(events.iter().any(|e| e.delay == 3 && e.value == 0.6));
    }

    #[test]
    fn current_value_tracks_highest_delay() {
        let mut queue = ControlEventQueue::new();
        queue.insert(100, 0.4);
        queue.insert(50, 0.9);
        assert_eq!(queue.current_value(), 0.4);
    }

    #[test]
    fn advance_collapses_to_carried_value() {
        let mut queue = ControlEventQueue::new();
        queue.insert(10, 0.25);
        queue.insert(200, 0.75);

        queue.advance();
        assert_eq!(queue.events(), &[ControlEvent::new(0, 0.75)]);
    }

    #[test]
    fn advance_on_singleton_is_stable() {
        let mut queue = ControlEventQueue::new();
        queue.insert(0, 0.5);
        queue.advance();
        queue.advance();
        assert_eq!(queue.events(), &[ControlEvent::new(0, 0.5)]);
    }

    #[test]
    fn reset_to_replaces_history() {
        let mut queue = ControlEventQueue::new();
        queue.insert(10, 0.3);
        queue.reset_to(1.0);
        assert_eq!(queue.events(), &[ControlEvent::new(0, 1.0)]);
    }

    #[test]
    fn reserve_prevents_reallocation_during_inserts() {
        let mut queue = ControlEventQueue::new();
        queue.reserve(256);
        let capacity = queue.events.capacity();

        for delay in 0..256 {
            queue.insert(delay, delay as f32 / 256.0);
        }
        assert_eq!(queue.events.capacity(), capacity);
    }

    #[test]
    fn advance_keeps_capacity() {
        let mut queue = ControlEventQueue::new();
        queue.reserve(64);
        let capacity = queue.events.capacity();
        for delay in 0..64 {
            queue.insert(delay, 0.5);
        }
        queue.advance();
        assert_eq!(queue.events.capacity(), capacity);
        assert_eq!(queue.len(), 1);
    }
}

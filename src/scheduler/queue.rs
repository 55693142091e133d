use std::collections::VecDeque;

/// A beat that has been handed to the audio graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    /// Position in the bar
    pub beat: usize,
    /// Audio-clock time the beat sounds at (seconds)
    pub time: f64,
}

/// FIFO of dispatched-but-not-yet-audible beats.
///
/// Events are appended in dispatch order, which is also non-decreasing time
/// order, and leave from the head once the audio clock has reached them.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ScheduledEvent) {
        debug_assert!(
            self.events.back().map_or(true, |last| last.time <= event.time),
            "events must be queued in time order"
        );
        self.events.push_back(event);
    }

    /// Remove and return the head event if it is audible at `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<ScheduledEvent> {
        match self.events.front() {
            Some(head) if head.time <= now => self.events.pop_front(),
            _ => None,
        }
    }

    pub fn front(&self) -> Option<&ScheduledEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_only_events_that_are_due() {
        let mut queue = EventQueue::new();
        queue.push(ScheduledEvent { beat: 0, time: 0.0 });
        queue.push(ScheduledEvent { beat: 1, time: 0.5 });

        assert_eq!(queue.pop_due(0.0).map(|e| e.beat), Some(0));
        assert_eq!(queue.pop_due(0.49), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(0.5).map(|e| e.beat), Some(1));
        assert!(queue.is_empty());
    }
}

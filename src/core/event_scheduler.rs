use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledEvent<T> {
    pub due_time: f64,
    pub sequence_num: u64,
    pub event: T,
}

impl<T> PartialEq for ScheduledEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for ScheduledEvent<T> {}

impl<T> PartialOrd for ScheduledEvent<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledEvent<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .due_time
            .total_cmp(&self.due_time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Min-heap of events keyed by session time; ties resolve in scheduling order
pub struct EventScheduler<T> {
    event_queue: BinaryHeap<ScheduledEvent<T>>,
    sequence_counter: u64,
}

impl<T> EventScheduler<T> {
    /// Create a new EventScheduler
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
        }
    }

    /// Schedule an event to fire at the given session time
    pub fn schedule_event(&mut self, event: T, due_time: f64) {
        let scheduled_event = ScheduledEvent {
            due_time,
            sequence_num: self.sequence_counter,
            event,
        };

        self.event_queue.push(scheduled_event);
        self.sequence_counter += 1;
    }

    /// Remove and return every event due at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Vec<T> {
        let mut events = Vec::new();

        while let Some(next_due) = self.peek_next_due() {
            if next_due > now {
                break;
            }
            if let Some(scheduled_event) = self.event_queue.pop() {
                events.push(scheduled_event.event);
            }
        }

        events
    }

    pub fn len(&self) -> usize {
        self.event_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_queue.is_empty()
    }

    /// Get the next due time without removing events
    pub fn peek_next_due(&self) -> Option<f64> {
        self.event_queue.peek().map(|event| event.due_time)
    }
}

impl<T> Default for EventScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

use super::components::spawner::CustomerAgent;
use super::errors::SimError;
use super::food::FoodSlot;
use super::types::{CustomerHandle, DeliveryHandle, FoodId, TableNumber, TableState};

/// What happened, as seen by rendering/audio/UI adapters
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    StateChanged {
        table: TableNumber,
        state: TableState,
    },
    OrderGenerated {
        table: TableNumber,
        lines: Vec<FoodSlot>,
    },
    OrderLineTaken {
        table: TableNumber,
        food: FoodId,
    },
    /// One agent per chair, with its archetype and walking time
    CustomersSpawned {
        table: TableNumber,
        customers: Vec<CustomerAgent>,
    },
    CustomerSeated {
        table: TableNumber,
        customer: CustomerHandle,
        chair: usize,
    },
    QueueChanged {
        pending: usize,
    },
    CookingStarted {
        slot: usize,
        table: TableNumber,
        food: FoodId,
    },
    FoodReady {
        slot: usize,
        table: TableNumber,
        food: FoodId,
    },
    FoodTaken {
        slot: usize,
        table: TableNumber,
        food: FoodId,
        delivery: DeliveryHandle,
    },
    FoodServed {
        table: TableNumber,
        food: FoodId,
    },
    PatienceExhausted {
        table: TableNumber,
    },
    Paid {
        table: TableNumber,
        amount: f64,
    },
    InputRejected {
        error: SimError,
    },
}

/// Event wrapper carrying a session-unique id and the session time it was raised at
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    pub event_id: u64,
    pub timestamp: f64,
    pub kind: EventKind,
}

/// Observer notified synchronously of every event
pub trait EventProbe: Send {
    fn probe(&mut self, event: &SimEvent);
}

/// Outbox for events raised during a session
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    clock: f64,
    outbox: Vec<SimEvent>,
    probes: Vec<Box<dyn EventProbe>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Set the timestamp stamped on subsequent events
    pub fn set_time(&mut self, clock: f64) {
        self.clock = clock;
    }

    pub fn emit(&mut self, kind: EventKind) {
        let event = SimEvent {
            event_id: self.next_id,
            timestamp: self.clock,
            kind,
        };
        self.next_id += 1;

        for probe in self.probes.iter_mut() {
            probe.probe(&event);
        }
        self.outbox.push(event);
    }

    pub fn add_probe(&mut self, probe: Box<dyn EventProbe>) {
        self.probes.push(probe);
    }

    /// Take every buffered event, oldest first
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending(&self) -> &[SimEvent] {
        &self.outbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<u64>>>);

    impl EventProbe for Recorder {
        fn probe(&mut self, event: &SimEvent) {
            self.0.lock().unwrap().push(event.event_id);
        }
    }

    #[test]
    fn test_event_ids_are_unique_and_ordered() {
        let mut bus = EventBus::new();
        bus.emit(EventKind::QueueChanged { pending: 1 });
        bus.set_time(2.5);
        bus.emit(EventKind::QueueChanged { pending: 0 });

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(events[0].event_id < events[1].event_id);
        assert_eq!(events[0].timestamp, 0.0);
        assert_eq!(events[1].timestamp, 2.5);
        assert!(bus.pending().is_empty());
    }

    #[test]
    fn test_probes_see_every_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.add_probe(Box::new(Recorder(seen.clone())));

        bus.emit(EventKind::PatienceExhausted { table: TableNumber(0) });
        bus.emit(EventKind::QueueChanged { pending: 3 });

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }
}

// File: crates/fractal-core/src/events.rs
// Summary: Named engine events with at most one listener per name.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Zoom,
    Pan,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartEvent {
    Zoom { zoom: f64 },
    Pan { offset: f64 },
}

impl ChartEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ChartEvent::Zoom { .. } => EventKind::Zoom,
            ChartEvent::Pan { .. } => EventKind::Pan,
        }
    }
}

pub type Listener = Box<dyn FnMut(ChartEvent)>;

/// Registering a second listener for a name replaces the first.
#[derive(Default)]
pub struct Listeners {
    slots: HashMap<EventKind, Listener>,
}

impl Listeners {
    pub fn set(&mut self, kind: EventKind, listener: Listener) {
        self.slots.insert(kind, listener);
    }

    pub fn remove(&mut self, kind: EventKind) -> bool {
        self.slots.remove(&kind).is_some()
    }

    pub fn emit(&mut self, event: ChartEvent) {
        if let Some(cb) = self.slots.get_mut(&event.kind()) {
            cb(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.slots.keys()).finish()
    }
}

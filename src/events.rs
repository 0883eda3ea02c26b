use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use into_static_str::IntoStaticStr;
use serde::Serialize;

use crate::geometry::GeometryConfig;
use crate::runtime::Phase;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum CarouselEvent {
    Ready,
    SpinUpComplete,
    Reconfigured,
    Teardown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub event_type: &'static str,
    pub phase: Phase,
    pub rotation: f64,
    pub geometry: GeometryConfig,
}

impl EventData {
    pub fn new(event: CarouselEvent, phase: Phase, rotation: f64, geometry: GeometryConfig) -> Self {
        Self {
            event_type: event.as_str(),
            phase,
            rotation,
            geometry,
        }
    }
}

pub type Listener = Rc<dyn Fn(&EventData)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl From<u32> for ListenerId {
    fn from(id: u32) -> Self {
        ListenerId(id)
    }
}

impl From<ListenerId> for u32 {
    fn from(id: ListenerId) -> Self {
        id.0
    }
}

/// Lifecycle listeners of one carousel.
#[derive(Default)]
pub struct EventManager {
    listeners: RefCell<HashMap<CarouselEvent, Vec<(ListenerId, Listener)>>>,
    next_id: RefCell<u32>,
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&'static str, usize> = self
            .listeners
            .borrow()
            .iter()
            .map(|(event, listeners)| (event.as_str(), listeners.len()))
            .collect();
        write!(f, "EventManager {{ listeners: {:?} }}", counts)
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, event: CarouselEvent, callback: Listener) -> ListenerId {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            ListenerId(*next)
        };
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push((id, callback));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut removed = false;
        for listeners in self.listeners.borrow_mut().values_mut() {
            let before = listeners.len();
            listeners.retain(|(existing, _)| *existing != id);
            removed |= listeners.len() != before;
        }
        removed
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn listener_count(&self, event: CarouselEvent) -> usize {
        self.listeners.borrow().get(&event).map_or(0, |v| v.len())
    }

    /// Listeners may add or remove listeners while being called.
    pub fn trigger(&self, data: &EventData) {
        let Some(event) = CarouselEvent::from_static_str(data.event_type) else {
            return;
        };
        let callbacks: Vec<Listener> = self
            .listeners
            .borrow()
            .get(&event)
            .map(|listeners| listeners.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();

        log::debug!("emit {} to {} listener(s)", data.event_type, callbacks.len());
        for callback in callbacks {
            callback(data);
        }
    }
}

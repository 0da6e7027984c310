use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventInput};

/// Persistence collaborator for accepted events
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new draft event and assign its id
    async fn create(&self, input: EventInput) -> EventResult<Event>;

    /// Get an event by id
    async fn get_by_id(&self, id: i32) -> EventResult<Option<Event>>;

    /// All events ordered by id
    async fn list(&self) -> EventResult<Vec<Event>>;

    /// Replace the caller-owned fields of an existing event
    async fn update(&self, id: i32, input: EventInput) -> EventResult<Event>;
}

#[derive(Debug, Default)]
struct Store {
    events: BTreeMap<i32, Event>,
    last_id: i32,
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, input: EventInput) -> EventResult<Event> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| EventError::Internal("Event id space exhausted".to_string()))?;
        store.last_id = id;

        let event = Event::new(id, input);
        store.events.insert(id, event.clone());

        tracing::info!(event_id = id, "Created event");
        Ok(event)
    }

    async fn get_by_id(&self, id: i32) -> EventResult<Option<Event>> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn list(&self) -> EventResult<Vec<Event>> {
        let store = self.store.read().await;
        Ok(store.events.values().cloned().collect())
    }

    async fn update(&self, id: i32, input: EventInput) -> EventResult<Event> {
        let mut store = self.store.write().await;

        let event = store.events.get_mut(&id).ok_or(EventError::NotFound(id))?;
        event.apply_update(input);

        tracing::info!(event_id = id, "Updated event");
        Ok(event.clone())
    }
}

use crate::error::{DomainError, DomainResult};
use crate::event::Event;
use crate::query::QueryWindow;
use crate::repository::EventRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of `EventRepository` using a `HashMap`.
///
/// Reference implementation for tests and local runs; the production store
/// lives behind the same trait in its own crate.
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Sort newest origin first, then apply offset/limit verbatim.
    fn apply_window(mut events: Vec<Event>, window: &QueryWindow) -> Vec<Event> {
        events.sort_by(|a, b| b.origin.cmp(&a.origin));
        let offset = window.offset as usize;
        if offset >= events.len() {
            return Vec::new();
        }
        events
            .into_iter()
            .skip(offset)
            .take(window.limit.max(0) as usize)
            .collect()
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn add_event(&self, event: Event) -> DomainResult<String> {
        let id = event.id.clone();
        let mut events = self.events.write().await;
        events.insert(id.clone(), event);
        Ok(id)
    }

    async fn event_by_id(&self, id: &str) -> DomainResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(id).cloned())
    }

    async fn delete_event_by_id(&self, id: &str) -> DomainResult<()> {
        let mut events = self.events.write().await;
        events
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::EventNotFound(id.to_string()))
    }

    async fn all_events(&self, window: &QueryWindow) -> DomainResult<Vec<Event>> {
        let events = self.events.read().await;
        Ok(Self::apply_window(events.values().cloned().collect(), window))
    }

    async fn events_by_device_name(
        &self,
        window: &QueryWindow,
        device_name: &str,
    ) -> DomainResult<Vec<Event>> {
        let events = self.events.read().await;
        let matching = events
            .values()
            .filter(|e| e.device_name == device_name)
            .cloned()
            .collect();
        Ok(Self::apply_window(matching, window))
    }

    async fn events_by_time_range(&self, window: &QueryWindow) -> DomainResult<Vec<Event>> {
        let events = self.events.read().await;
        let matching = events
            .values()
            .filter(|e| {
                window.start.map_or(true, |start| e.origin >= start)
                    && window.end.map_or(true, |end| e.origin <= end)
            })
            .cloned()
            .collect();
        Ok(Self::apply_window(matching, window))
    }

    async fn event_count(&self) -> DomainResult<u64> {
        let events = self.events.read().await;
        Ok(events.len() as u64)
    }

    async fn event_count_by_device_name(&self, device_name: &str) -> DomainResult<u64> {
        let events = self.events.read().await;
        Ok(events
            .values()
            .filter(|e| e.device_name == device_name)
            .count() as u64)
    }

    async fn delete_events_by_device_name(&self, device_name: &str) -> DomainResult<()> {
        let mut events = self.events.write().await;
        events.retain(|_, e| e.device_name != device_name);
        Ok(())
    }

    async fn delete_events_by_age(&self, age_millis: i64) -> DomainResult<()> {
        let cutoff = chrono::Utc::now().timestamp_millis() - age_millis;
        let mut events = self.events.write().await;
        events.retain(|_, e| e.origin >= cutoff);
        Ok(())
    }
}

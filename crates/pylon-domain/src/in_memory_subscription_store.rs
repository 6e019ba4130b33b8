use crate::error::{DomainError, DomainResult};
use crate::query::QueryWindow;
use crate::repository::SubscriptionRepository;
use crate::subscription::Subscription;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory implementation of `SubscriptionRepository`, keyed by name and
/// insertion-ordered.
pub struct InMemorySubscriptionStore {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
        }
    }

    fn apply_window(subscriptions: Vec<Subscription>, window: &QueryWindow) -> Vec<Subscription> {
        let offset = window.offset as usize;
        if offset >= subscriptions.len() {
            return Vec::new();
        }
        subscriptions
            .into_iter()
            .skip(offset)
            .take(window.limit.max(0) as usize)
            .collect()
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionStore {
    async fn add_subscription(&self, subscription: Subscription) -> DomainResult<String> {
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.iter().any(|s| s.name == subscription.name) {
            return Err(DomainError::SubscriptionAlreadyExists(
                subscription.name.clone(),
            ));
        }
        let id = subscription.id.clone();
        subscriptions.push(subscription);
        Ok(id)
    }

    async fn subscription_by_name(&self, name: &str) -> DomainResult<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.iter().find(|s| s.name == name).cloned())
    }

    async fn all_subscriptions(&self, window: &QueryWindow) -> DomainResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(Self::apply_window(subscriptions.clone(), window))
    }

    async fn subscriptions_by_category(
        &self,
        window: &QueryWindow,
        category: &str,
    ) -> DomainResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        let matching = subscriptions
            .iter()
            .filter(|s| s.categories.iter().any(|c| c == category))
            .cloned()
            .collect();
        Ok(Self::apply_window(matching, window))
    }

    async fn subscriptions_by_label(
        &self,
        window: &QueryWindow,
        label: &str,
    ) -> DomainResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        let matching = subscriptions
            .iter()
            .filter(|s| s.labels.iter().any(|l| l == label))
            .cloned()
            .collect();
        Ok(Self::apply_window(matching, window))
    }

    async fn subscriptions_by_receiver(
        &self,
        window: &QueryWindow,
        receiver: &str,
    ) -> DomainResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        let matching = subscriptions
            .iter()
            .filter(|s| s.receiver == receiver)
            .cloned()
            .collect();
        Ok(Self::apply_window(matching, window))
    }

    async fn update_subscription(&self, subscription: Subscription) -> DomainResult<()> {
        let mut subscriptions = self.subscriptions.write().await;
        match subscriptions.iter_mut().find(|s| s.name == subscription.name) {
            Some(stored) => {
                *stored = subscription;
                Ok(())
            }
            None => Err(DomainError::SubscriptionNotFound(subscription.name)),
        }
    }

    async fn delete_subscription_by_name(&self, name: &str) -> DomainResult<()> {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|s| s.name != name);
        if subscriptions.len() == before {
            return Err(DomainError::SubscriptionNotFound(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(name: &str, receiver: &str, labels: &[&str]) -> Subscription {
        Subscription {
            id: format!("id-{name}"),
            name: name.to_string(),
            receiver: receiver.to_string(),
            description: String::new(),
            categories: vec!["HW_HEALTH".to_string()],
            labels: labels.iter().map(|l| l.to_string()).collect(),
            channels: vec![],
            resend_limit: 0,
            resend_interval: String::new(),
        }
    }

    fn window() -> QueryWindow {
        QueryWindow {
            offset: 0,
            limit: 10,
            start: None,
            end: None,
        }
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_name() {
        let store = InMemorySubscriptionStore::new();
        store
            .add_subscription(subscription("alerts", "ops", &[]))
            .await
            .unwrap();

        let err = store
            .add_subscription(subscription("alerts", "other", &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::SubscriptionAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_preserves_insertion_order() {
        let store = InMemorySubscriptionStore::new();
        store
            .add_subscription(subscription("a", "ops", &["urgent"]))
            .await
            .unwrap();
        store
            .add_subscription(subscription("b", "dev", &["urgent"]))
            .await
            .unwrap();
        store
            .add_subscription(subscription("c", "ops", &[]))
            .await
            .unwrap();

        let by_label = store
            .subscriptions_by_label(&window(), "urgent")
            .await
            .unwrap();
        assert_eq!(by_label.len(), 2);
        assert_eq!(by_label[0].name, "a");

        let by_receiver = store
            .subscriptions_by_receiver(&window(), "ops")
            .await
            .unwrap();
        assert_eq!(by_receiver.len(), 2);
        assert_eq!(by_receiver[1].name, "c");
    }

    #[tokio::test]
    async fn test_update_unknown_name_not_found() {
        let store = InMemorySubscriptionStore::new();
        let err = store
            .update_subscription(subscription("missing", "ops", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SubscriptionNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let store = InMemorySubscriptionStore::new();
        store
            .add_subscription(subscription("alerts", "ops", &[]))
            .await
            .unwrap();

        store.delete_subscription_by_name("alerts").await.unwrap();

        let err = store
            .delete_subscription_by_name("alerts")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SubscriptionNotFound(_)));
    }
}

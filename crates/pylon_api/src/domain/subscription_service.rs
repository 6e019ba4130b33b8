use pylon_domain::{
    DomainError, DomainResult, QueryWindow, Subscription, SubscriptionPatch,
    SubscriptionRepository,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Domain service for subscription management: batch-item add and patch
/// plus the query and delete operations.
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    /// Persist one subscription, returning its id. A subscription must
    /// route on something: at least one category or label.
    #[instrument(skip(self, subscription), fields(name = %subscription.name))]
    pub async fn add_subscription(&self, subscription: Subscription) -> DomainResult<String> {
        if subscription.categories.is_empty() && subscription.labels.is_empty() {
            return Err(DomainError::Validation(format!(
                "subscription {} needs at least one category or label",
                subscription.name
            )));
        }

        let id = self.repository.add_subscription(subscription).await?;
        debug!(subscription_id = %id, "persisted subscription");
        Ok(id)
    }

    /// Merge a patch onto the stored subscription identified by its name
    /// and persist the result.
    #[instrument(skip(self, patch), fields(name = %patch.name))]
    pub async fn patch_subscription(&self, patch: SubscriptionPatch) -> DomainResult<()> {
        let stored = self
            .repository
            .subscription_by_name(&patch.name)
            .await?
            .ok_or_else(|| DomainError::SubscriptionNotFound(patch.name.clone()))?;

        let merged = patch.apply(stored);
        if merged.categories.is_empty() && merged.labels.is_empty() {
            return Err(DomainError::Validation(format!(
                "subscription {} needs at least one category or label",
                merged.name
            )));
        }

        self.repository.update_subscription(merged).await
    }

    pub async fn subscription_by_name(&self, name: &str) -> DomainResult<Subscription> {
        self.repository
            .subscription_by_name(name)
            .await?
            .ok_or_else(|| DomainError::SubscriptionNotFound(name.to_string()))
    }

    pub async fn all_subscriptions(&self, window: &QueryWindow) -> DomainResult<Vec<Subscription>> {
        self.repository.all_subscriptions(window).await
    }

    pub async fn subscriptions_by_category(
        &self,
        window: &QueryWindow,
        category: &str,
    ) -> DomainResult<Vec<Subscription>> {
        self.repository
            .subscriptions_by_category(window, category)
            .await
    }

    pub async fn subscriptions_by_label(
        &self,
        window: &QueryWindow,
        label: &str,
    ) -> DomainResult<Vec<Subscription>> {
        self.repository.subscriptions_by_label(window, label).await
    }

    pub async fn subscriptions_by_receiver(
        &self,
        window: &QueryWindow,
        receiver: &str,
    ) -> DomainResult<Vec<Subscription>> {
        self.repository
            .subscriptions_by_receiver(window, receiver)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_subscription_by_name(&self, name: &str) -> DomainResult<()> {
        self.repository.delete_subscription_by_name(name).await
    }
}

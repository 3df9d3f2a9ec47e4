use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderStatus, OrderUpdate};
use tokio::sync::RwLock;

use crate::{OrderStore, Result, StoreError};

/// In-memory order store.
///
/// A single reader/writer lock guards the whole table: reads run concurrently,
/// and any write excludes every other read and write regardless of key.
/// Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns true if no orders are stored.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn get(&self, id: &OrderId) -> Result<Order> {
        self.orders
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id), level = "debug")]
    async fn create(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.insert(order.id.clone(), order).is_some() {
            tracing::warn!("replaced an existing order with the same id");
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, update), level = "debug")]
    async fn update(&self, id: &OrderId, update: OrderUpdate) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        order.apply(&update);
        Ok(order.clone())
    }

    #[tracing::instrument(skip(self, update), level = "debug")]
    async fn update_if_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        update: OrderUpdate,
    ) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if order.status != expected {
            return Err(StoreError::StatusMismatch {
                order_id: id.clone(),
                expected,
                actual: order.status,
            });
        }

        order.apply(&update);
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{PartId, TransactionId, UserId};
    use domain::{Money, PaymentMethod};

    fn make_order(id: &str) -> Order {
        Order::new(
            OrderId::new(id),
            UserId::new("user-1"),
            vec![PartId::new("p1"), PartId::new("p2")],
            Money::from_cents(15000),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryOrderStore::new();
        store.create(make_order("o1")).await.unwrap();

        let order = store.get(&OrderId::new("o1")).await.unwrap();
        assert_eq!(order, make_order("o1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = InMemoryOrderStore::new();
        let result = store.get(&OrderId::new("missing")).await;
        assert_eq!(result, Err(StoreError::NotFound(OrderId::new("missing"))));
    }

    #[tokio::test]
    async fn test_create_overwrites_same_key() {
        let store = InMemoryOrderStore::new();
        store.create(make_order("o1")).await.unwrap();

        let mut replacement = make_order("o1");
        replacement.total_price = Money::from_cents(1);
        store.create(replacement).await.unwrap();

        assert_eq!(store.len().await, 1);
        let order = store.get(&OrderId::new("o1")).await.unwrap();
        assert_eq!(order.total_price.cents(), 1);
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let store = InMemoryOrderStore::new();
        store.create(make_order("o1")).await.unwrap();

        let updated = store
            .update(
                &OrderId::new("o1"),
                OrderUpdate::paid(TransactionId::new("tx-1"), PaymentMethod::Sbp),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Paid);
        assert_eq!(updated.transaction_id, Some(TransactionId::new("tx-1")));
        assert_eq!(updated.part_ids, make_order("o1").part_ids);
        assert_eq!(updated.total_price.cents(), 15000);

        let stored = store.get(&OrderId::new("o1")).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let store = InMemoryOrderStore::new();
        let result = store
            .update(&OrderId::new("missing"), OrderUpdate::cancelled())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_if_status_rejects_mismatch() {
        let store = InMemoryOrderStore::new();
        store.create(make_order("o1")).await.unwrap();
        store
            .update(&OrderId::new("o1"), OrderUpdate::cancelled())
            .await
            .unwrap();

        let result = store
            .update_if_status(
                &OrderId::new("o1"),
                OrderStatus::PendingPayment,
                OrderUpdate::paid(TransactionId::new("tx-1"), PaymentMethod::Card),
            )
            .await;

        assert_eq!(
            result,
            Err(StoreError::StatusMismatch {
                order_id: OrderId::new("o1"),
                expected: OrderStatus::PendingPayment,
                actual: OrderStatus::Cancelled,
            })
        );

        let stored = store.get(&OrderId::new("o1")).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);
        assert!(stored.transaction_id.is_none());
    }

    #[tokio::test]
    async fn test_update_if_status_applies_on_match() {
        let store = InMemoryOrderStore::new();
        store.create(make_order("o1")).await.unwrap();

        let updated = store
            .update_if_status(
                &OrderId::new("o1"),
                OrderStatus::PendingPayment,
                OrderUpdate::cancelled(),
            )
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_clones_share_the_table() {
        let store = InMemoryOrderStore::new();
        let other = store.clone();
        store.create(make_order("o1")).await.unwrap();

        assert!(other.get(&OrderId::new("o1")).await.is_ok());
    }
}

//! Order orchestrator: creation, payment and cancellation.

use std::time::Instant;

use common::{OrderId, PartId, TransactionId, UserId};
use domain::{Money, Order, OrderStatus, OrderUpdate, Part, PartsFilter, PaymentMethod};
use gateway::{InventoryGateway, PaymentGateway};
use order_store::{OrderStore, StoreError};

use crate::config::OrchestratorConfig;
use crate::error::{OrderError, Result};

/// Outcome of a successful order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOrder {
    pub order_id: OrderId,
    pub total_price: Money,
}

/// Drives orders through their lifecycle.
///
/// Orders are priced against the inventory gateway at creation, paid through
/// the payment gateway, and recorded in the order store. No lock is held
/// across a gateway call: the order is read and checked before the call and
/// written back with a conditional update after it.
pub struct OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryGateway,
    P: PaymentGateway,
{
    store: S,
    inventory: I,
    payment: P,
    config: OrchestratorConfig,
}

impl<S, I, P> OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryGateway,
    P: PaymentGateway,
{
    /// Creates a new orchestrator with default timeouts.
    pub fn new(store: S, inventory: I, payment: P) -> Self {
        Self::with_config(store, inventory, payment, OrchestratorConfig::default())
    }

    /// Creates a new orchestrator with the given configuration.
    pub fn with_config(store: S, inventory: I, payment: P, config: OrchestratorConfig) -> Self {
        Self {
            store,
            inventory,
            payment,
            config,
        }
    }

    /// Returns the underlying order store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an order for `part_ids`, priced at the current catalog prices.
    ///
    /// Every requested part must be listed by the catalog with positive
    /// stock; otherwise nothing is stored. Stock is checked, not reserved.
    #[tracing::instrument(skip(self, part_ids), fields(part_count = part_ids.len()))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        part_ids: Vec<PartId>,
    ) -> Result<CreatedOrder> {
        let started = Instant::now();
        let result = self.try_create_order(user_id, part_ids).await;
        observe("create", started, &result);
        result
    }

    async fn try_create_order(&self, user_id: UserId, part_ids: Vec<PartId>) -> Result<CreatedOrder> {
        if part_ids.is_empty() {
            return Err(OrderError::EmptyPartList);
        }

        let parts = self
            .list_parts(PartsFilter::by_ids(part_ids.iter().cloned()))
            .await?;
        let total_price = price_parts(&part_ids, &parts)?;

        let order = Order::new(OrderId::generate(), user_id, part_ids, total_price);
        let order_id = order.id.clone();
        self.store.create(order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(%order_id, %total_price, "order created");

        Ok(CreatedOrder {
            order_id,
            total_price,
        })
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order> {
        let started = Instant::now();
        let result = self.store.get(order_id).await.map_err(OrderError::from);
        observe("get", started, &result);
        result
    }

    /// Pays for a pending order and records the transaction.
    ///
    /// A gateway failure leaves the order pending so the caller can retry.
    #[tracing::instrument(skip(self))]
    pub async fn pay_order(
        &self,
        order_id: &OrderId,
        payment_method: PaymentMethod,
    ) -> Result<TransactionId> {
        let started = Instant::now();
        let result = self.try_pay_order(order_id, payment_method).await;
        observe("pay", started, &result);
        result
    }

    async fn try_pay_order(
        &self,
        order_id: &OrderId,
        payment_method: PaymentMethod,
    ) -> Result<TransactionId> {
        let order = self.store.get(order_id).await?;
        ensure_status(&order, OrderStatus::can_pay)?;

        let transaction_id = self.pay(&order, payment_method).await?;

        self.store
            .update_if_status(
                order_id,
                OrderStatus::PendingPayment,
                OrderUpdate::paid(transaction_id.clone(), payment_method),
            )
            .await
            .map_err(|err| {
                // The remote side charged, but the local record moved on meanwhile.
                tracing::error!(
                    %order_id,
                    %transaction_id,
                    error = %err,
                    "payment succeeded but the order changed concurrently"
                );
                OrderError::from(err)
            })?;

        metrics::counter!("orders_paid_total").increment(1);
        tracing::info!(%order_id, %transaction_id, %payment_method, "order paid");

        Ok(transaction_id)
    }

    /// Cancels a pending order.
    ///
    /// Cancelling an already cancelled order is an error, not a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<()> {
        let started = Instant::now();
        let result = self.try_cancel_order(order_id).await;
        observe("cancel", started, &result);
        result
    }

    async fn try_cancel_order(&self, order_id: &OrderId) -> Result<()> {
        let order = self.store.get(order_id).await?;
        ensure_status(&order, OrderStatus::can_cancel)?;

        self.store
            .update_if_status(
                order_id,
                OrderStatus::PendingPayment,
                OrderUpdate::cancelled(),
            )
            .await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(%order_id, "order cancelled");

        Ok(())
    }

    /// Resolves parts under the inventory time budget.
    async fn list_parts(&self, filter: PartsFilter) -> Result<Vec<Part>> {
        let after = self.config.inventory_timeout;
        let started = Instant::now();
        let result = tokio::time::timeout(after, self.inventory.list_parts(filter)).await;
        metrics::histogram!("gateway_call_duration_seconds", "service" => "inventory")
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(Ok(parts)) => Ok(parts),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, transient = err.is_transient(), "inventory lookup failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::warn!(?after, "inventory lookup timed out");
                Err(OrderError::Timeout {
                    service: "inventory",
                    after,
                })
            }
        }
    }

    /// Executes a payment under the payment time budget.
    async fn pay(&self, order: &Order, payment_method: PaymentMethod) -> Result<TransactionId> {
        let after = self.config.payment_timeout;
        let started = Instant::now();
        let result = tokio::time::timeout(
            after,
            self.payment.pay(&order.id, &order.user_id, payment_method),
        )
        .await;
        metrics::histogram!("gateway_call_duration_seconds", "service" => "payment")
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(Ok(transaction_id)) => Ok(transaction_id),
            Ok(Err(err)) => {
                tracing::warn!(
                    order_id = %order.id,
                    error = %err,
                    transient = err.is_transient(),
                    "payment failed"
                );
                Err(err.into())
            }
            Err(_) => {
                tracing::warn!(order_id = %order.id, ?after, "payment timed out");
                Err(OrderError::Timeout {
                    service: "payment",
                    after,
                })
            }
        }
    }
}

/// Sums the unit prices of the requested parts in request order.
///
/// Each requested ID must match a resolved part with positive stock.
fn price_parts(part_ids: &[PartId], parts: &[Part]) -> Result<Money> {
    part_ids.iter().try_fold(Money::zero(), |total, part_id| {
        let price = parts
            .iter()
            .find(|part| &part.id == part_id && part.in_stock())
            .map(|part| part.price)
            .ok_or_else(|| OrderError::PartNotFound(part_id.clone()))?;
        total
            .checked_add(price)
            .ok_or(OrderError::TotalPriceOverflow)
    })
}

/// Fails with the matching conflict unless `allowed` accepts the order's status.
fn ensure_status(order: &Order, allowed: fn(&OrderStatus) -> bool) -> Result<()> {
    if allowed(&order.status) {
        return Ok(());
    }
    Err(
        OrderError::for_terminal_status(&order.id, order.status).unwrap_or_else(|| {
            OrderError::Store(StoreError::StatusMismatch {
                order_id: order.id.clone(),
                expected: OrderStatus::PendingPayment,
                actual: order.status,
            })
        }),
    )
}

fn observe<T>(operation: &'static str, started: Instant, result: &Result<T>) {
    metrics::histogram!("order_operation_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());

    if let Err(err) = result {
        metrics::counter!(
            "order_operation_failures_total",
            "operation" => operation,
            "kind" => err.kind().as_str()
        )
        .increment(1);
        tracing::debug!(operation, error = %err, "order operation failed");
    }
}

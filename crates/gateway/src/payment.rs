//! Payment gateway trait and in-memory implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, TransactionId, UserId};
use domain::PaymentMethod;
use tokio::sync::RwLock;

use crate::error::GatewayError;

/// Trait for executing payments.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Pays for an order on behalf of a user and returns the transaction ID.
    ///
    /// An error means the payment did not happen.
    async fn pay(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
        payment_method: PaymentMethod,
    ) -> Result<TransactionId, GatewayError>;
}

#[async_trait]
impl<T: PaymentGateway + ?Sized> PaymentGateway for Arc<T> {
    async fn pay(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
        payment_method: PaymentMethod,
    ) -> Result<TransactionId, GatewayError> {
        (**self).pay(order_id, user_id, payment_method).await
    }
}

/// A payment accepted by the in-memory gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub transaction_id: TransactionId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: Vec<PaymentRecord>,
    fail_with: Option<GatewayError>,
    latency: Option<Duration>,
    calls: usize,
}

/// In-memory payment service: every payment succeeds with a fresh transaction ID
/// unless a failure is injected.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `error`, or succeed again with `None`.
    pub async fn set_failure(&self, error: Option<GatewayError>) {
        self.state.write().await.fail_with = error;
    }

    /// Delays every subsequent call by `latency`.
    pub async fn set_latency(&self, latency: Option<Duration>) {
        self.state.write().await.latency = latency;
    }

    /// Returns the number of `pay` calls received, successful or not.
    pub async fn call_count(&self) -> usize {
        self.state.read().await.calls
    }

    /// Returns the number of accepted payments.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// Returns the accepted payments in order.
    pub async fn payments(&self) -> Vec<PaymentRecord> {
        self.state.read().await.payments.clone()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn pay(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
        payment_method: PaymentMethod,
    ) -> Result<TransactionId, GatewayError> {
        let (failure, latency) = {
            let mut state = self.state.write().await;
            state.calls += 1;
            (state.fail_with.clone(), state.latency)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(error) = failure {
            return Err(error);
        }

        let transaction_id = TransactionId::generate();
        self.state.write().await.payments.push(PaymentRecord {
            transaction_id: transaction_id.clone(),
            order_id: order_id.clone(),
            user_id: user_id.clone(),
            payment_method,
        });

        tracing::info!(%transaction_id, %order_id, %payment_method, "payment accepted");
        Ok(transaction_id)
    }
}

//! HTTP clients for the remote inventory and payment services.

use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, TransactionId, UserId};
use domain::{Part, PartsFilter, PaymentMethod};
use reqwest::StatusCode;

use crate::error::GatewayError;
use crate::inventory::InventoryGateway;
use crate::payment::PaymentGateway;
use crate::wire::{
    ErrorBody, LIST_PARTS_PATH, ListPartsRequest, ListPartsResponse, PAY_ORDER_PATH,
    PayOrderRequest, PayOrderResponse,
};

/// Inventory gateway backed by the remote catalog service.
#[derive(Debug, Clone)]
pub struct HttpInventoryGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpInventoryGateway {
    /// Creates a client for the catalog at `base_url`.
    ///
    /// `timeout` bounds each request end to end.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
            timeout,
        }
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryGateway {
    #[tracing::instrument(skip(self, filter), fields(base_url = %self.base_url))]
    async fn list_parts(&self, filter: PartsFilter) -> Result<Vec<Part>, GatewayError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, LIST_PARTS_PATH))
            .timeout(self.timeout)
            .json(&ListPartsRequest::from(&filter))
            .send()
            .await
            .map_err(|error| transport_error(error, self.timeout))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::PartsNotFound);
        }

        let body: ListPartsResponse = decode(response, self.timeout).await?;
        if body.parts.is_empty() {
            return Err(GatewayError::PartsNotFound);
        }

        body.parts.into_iter().map(Part::try_from).collect()
    }
}

/// Payment gateway backed by the remote payment service.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPaymentGateway {
    /// Creates a client for the payment service at `base_url`.
    ///
    /// `timeout` bounds each request end to end.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
            timeout,
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn pay(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
        payment_method: PaymentMethod,
    ) -> Result<TransactionId, GatewayError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, PAY_ORDER_PATH))
            .timeout(self.timeout)
            .json(&PayOrderRequest::new(order_id, user_id, payment_method))
            .send()
            .await
            .map_err(|error| transport_error(error, self.timeout))?;

        let body: PayOrderResponse = decode(response, self.timeout).await?;
        Ok(body.into())
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Maps a reqwest failure to the gateway taxonomy.
fn transport_error(error: reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout)
    } else if error.is_decode() {
        GatewayError::Decode(error.to_string())
    } else {
        GatewayError::Unavailable(error.to_string())
    }
}

/// Rejects non-success responses and decodes the JSON body.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        tracing::warn!(status = status.as_u16(), %message, "remote service rejected request");
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|error| transport_error(error, timeout))?;
    serde_json::from_slice(&bytes).map_err(|error| GatewayError::Decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = HttpInventoryGateway::new("http://inventory:50051/", Duration::from_secs(2));
        assert_eq!(gateway.base_url, "http://inventory:50051");
    }
}

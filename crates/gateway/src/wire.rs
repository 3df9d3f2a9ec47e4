//! JSON wire contract for the remote inventory and payment services.
//!
//! Field names follow the remote services (`uuid`, `price_cents`, ...); the
//! `From` impls convert to and from the domain types.

use chrono::{DateTime, Utc};
use common::{OrderId, PartId, TransactionId, UserId};
use domain::{Category, Dimensions, Manufacturer, Metadata, Money, Part, PartsFilter, PaymentMethod};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Path of the inventory list endpoint, relative to the service base URL.
pub const LIST_PARTS_PATH: &str = "/api/v1/parts/list";

/// Path of the payment endpoint, relative to the service base URL.
pub const PAY_ORDER_PATH: &str = "/api/v1/payments";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartsFilterDto {
    pub uuids: Vec<String>,
    pub names: Vec<String>,
    pub categories: Vec<Category>,
    pub manufacturer_countries: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPartsRequest {
    #[serde(default)]
    pub filter: PartsFilterDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDto {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub stock_quantity: i64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub manufacturer: Manufacturer,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPartsResponse {
    #[serde(default)]
    pub parts: Vec<PartDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayOrderRequest {
    pub order_uuid: String,
    pub user_uuid: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayOrderResponse {
    pub transaction_uuid: String,
}

/// Error body returned by the remote services on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&PartsFilter> for PartsFilterDto {
    fn from(filter: &PartsFilter) -> Self {
        Self {
            uuids: filter.ids.iter().map(|id| id.to_string()).collect(),
            names: filter.names.clone(),
            categories: filter.categories.clone(),
            manufacturer_countries: filter.manufacturer_countries.clone(),
            tags: filter.tags.clone(),
        }
    }
}

impl From<PartsFilterDto> for PartsFilter {
    fn from(dto: PartsFilterDto) -> Self {
        Self {
            ids: dto.uuids.into_iter().map(PartId::from).collect(),
            names: dto.names,
            categories: dto.categories,
            manufacturer_countries: dto.manufacturer_countries,
            tags: dto.tags,
        }
    }
}

impl From<&PartsFilter> for ListPartsRequest {
    fn from(filter: &PartsFilter) -> Self {
        Self {
            filter: filter.into(),
        }
    }
}

impl TryFrom<PartDto> for Part {
    type Error = GatewayError;

    /// Rejects parts priced below zero.
    fn try_from(dto: PartDto) -> Result<Self, Self::Error> {
        if dto.price_cents < 0 {
            return Err(GatewayError::Decode(format!(
                "part {} has negative price {}",
                dto.uuid, dto.price_cents
            )));
        }

        Ok(Self {
            id: PartId::from(dto.uuid),
            name: dto.name,
            description: dto.description,
            price: Money::from_cents(dto.price_cents),
            stock_quantity: dto.stock_quantity,
            category: dto.category,
            dimensions: dto.dimensions,
            manufacturer: dto.manufacturer,
            tags: dto.tags,
            metadata: dto.metadata,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl From<Part> for PartDto {
    fn from(part: Part) -> Self {
        Self {
            uuid: part.id.into_inner(),
            name: part.name,
            description: part.description,
            price_cents: part.price.cents(),
            stock_quantity: part.stock_quantity,
            category: part.category,
            dimensions: part.dimensions,
            manufacturer: part.manufacturer,
            tags: part.tags,
            metadata: part.metadata,
            created_at: part.created_at,
            updated_at: part.updated_at,
        }
    }
}

impl PayOrderRequest {
    /// Builds a payment request for an order.
    pub fn new(order_id: &OrderId, user_id: &UserId, payment_method: PaymentMethod) -> Self {
        Self {
            order_uuid: order_id.to_string(),
            user_uuid: user_id.to_string(),
            payment_method,
        }
    }
}

impl From<PayOrderResponse> for TransactionId {
    fn from(response: PayOrderResponse) -> Self {
        TransactionId::from(response.transaction_uuid)
    }
}

//! Catalog part snapshot.

use chrono::{DateTime, Utc};
use common::PartId;
use serde::{Deserialize, Serialize};

use crate::order::Money;

/// Part category. `Unknown` absorbs categories this build does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Engine,
    Fuel,
    Porthole,
    Wing,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Physical dimensions of a part.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

/// Who makes a part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
    pub country: String,
    pub website: String,
}

/// Free-form part metadata.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A part as reported by the catalog.
///
/// The catalog owns parts; this is a read-only snapshot taken for the
/// duration of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Money,
    pub stock_quantity: i64,
    pub category: Category,
    pub dimensions: Dimensions,
    pub manufacturer: Manufacturer,
    pub tags: Vec<String>,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Part {
    /// Creates a part with the given identity, price and stock and empty
    /// descriptive fields.
    pub fn new(id: impl Into<PartId>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            stock_quantity: stock,
            category: Category::Unknown,
            dimensions: Dimensions::default(),
            manufacturer: Manufacturer::default(),
            tags: Vec::new(),
            metadata: Metadata::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the manufacturer.
    pub fn with_manufacturer(mut self, manufacturer: Manufacturer) -> Self {
        self.manufacturer = manufacturer;
        self
    }

    /// Sets the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if at least one unit is in stock.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

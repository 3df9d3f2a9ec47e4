//! Inventory gateway trait and in-memory implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::PartId;
use domain::{Category, Dimensions, Manufacturer, Money, Part, PartsFilter};
use tokio::sync::RwLock;

use crate::error::GatewayError;

/// Trait for resolving parts from the catalog.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Lists the parts matching `filter`, in catalog order.
    ///
    /// Fails with `PartsNotFound` if nothing matches.
    async fn list_parts(&self, filter: PartsFilter) -> Result<Vec<Part>, GatewayError>;
}

#[async_trait]
impl<T: InventoryGateway + ?Sized> InventoryGateway for Arc<T> {
    async fn list_parts(&self, filter: PartsFilter) -> Result<Vec<Part>, GatewayError> {
        (**self).list_parts(filter).await
    }
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    parts: Vec<Part>,
    fail_with: Option<GatewayError>,
    latency: Option<Duration>,
    calls: usize,
}

/// In-memory catalog.
///
/// Filters with the same semantics as the remote catalog and can be told to
/// fail or stall for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryGateway {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryGateway {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `parts`.
    pub fn with_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryInventoryState {
                parts: parts.into_iter().collect(),
                ..Default::default()
            })),
        }
    }

    /// Inserts a part, replacing any part with the same ID in place.
    pub async fn upsert_part(&self, part: Part) {
        let mut state = self.state.write().await;
        match state.parts.iter_mut().find(|p| p.id == part.id) {
            Some(existing) => *existing = part,
            None => state.parts.push(part),
        }
    }

    /// Sets the stock of a part. Returns false if the part is unknown.
    pub async fn set_stock(&self, part_id: &PartId, stock_quantity: i64) -> bool {
        let mut state = self.state.write().await;
        match state.parts.iter_mut().find(|p| &p.id == part_id) {
            Some(part) => {
                part.stock_quantity = stock_quantity;
                part.updated_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Makes every subsequent call fail with `error`, or succeed again with `None`.
    pub async fn set_failure(&self, error: Option<GatewayError>) {
        self.state.write().await.fail_with = error;
    }

    /// Delays every subsequent call by `latency`.
    pub async fn set_latency(&self, latency: Option<Duration>) {
        self.state.write().await.latency = latency;
    }

    /// Returns the number of `list_parts` calls received.
    pub async fn call_count(&self) -> usize {
        self.state.read().await.calls
    }
}

#[async_trait]
impl InventoryGateway for InMemoryInventoryGateway {
    async fn list_parts(&self, filter: PartsFilter) -> Result<Vec<Part>, GatewayError> {
        let (outcome, latency) = {
            let mut state = self.state.write().await;
            state.calls += 1;

            let outcome = match state.fail_with {
                Some(ref error) => Err(error.clone()),
                None => Ok(state
                    .parts
                    .iter()
                    .filter(|part| filter.matches(part))
                    .cloned()
                    .collect::<Vec<_>>()),
            };
            (outcome, state.latency)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let parts = outcome?;
        if parts.is_empty() {
            return Err(GatewayError::PartsNotFound);
        }
        Ok(parts)
    }
}

/// A small fixed catalog for running the service without a remote inventory.
pub fn demo_catalog() -> Vec<Part> {
    let manufacturer = |name: &str, country: &str, website: &str| Manufacturer {
        name: name.to_string(),
        country: country.to_string(),
        website: website.to_string(),
    };

    let mut engine = Part::new("engine-rd-180", "RD-180", Money::from_cents(1_250_000), 4)
        .with_category(Category::Engine)
        .with_manufacturer(manufacturer("Energomash", "Russia", "https://engine.example"))
        .with_tags(["liquid", "booster"]);
    engine.description = "Dual-chamber liquid-fuel booster engine".to_string();
    engine.dimensions = Dimensions {
        length: 356.0,
        width: 315.0,
        height: 315.0,
        weight: 5480.0,
    };

    let mut fuel = Part::new("fuel-rp-1", "RP-1 tank", Money::from_cents(85_000), 12)
        .with_category(Category::Fuel)
        .with_manufacturer(manufacturer("Tankworks", "USA", "https://fuel.example"))
        .with_tags(["liquid", "kerosene"]);
    fuel.description = "Refined kerosene propellant tank".to_string();

    let mut porthole = Part::new("porthole-x2", "Porthole X2", Money::from_cents(32_000), 25)
        .with_category(Category::Porthole)
        .with_manufacturer(manufacturer("Clearview", "Germany", "https://glass.example"))
        .with_tags(["glass", "crew"]);
    porthole.description = "Double-pane pressure porthole".to_string();

    let mut wing = Part::new("wing-delta", "Delta wing", Money::from_cents(410_000), 0)
        .with_category(Category::Wing)
        .with_manufacturer(manufacturer("Aerofab", "France", "https://wing.example"))
        .with_tags(["reusable"]);
    wing.description = "Delta wing for gliding re-entry".to_string();

    vec![engine, fuel, porthole, wing]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryInventoryGateway {
        InMemoryInventoryGateway::with_parts([
            Part::new("p1", "Engine", Money::from_cents(10000), 3).with_tags(["heavy"]),
            Part::new("p2", "Tank", Money::from_cents(5000), 0).with_tags(["light"]),
            Part::new("p3", "Wing", Money::from_cents(2000), 7),
        ])
    }

    #[tokio::test]
    async fn test_list_by_ids_keeps_catalog_order() {
        let gateway = catalog();
        let parts = gateway
            .list_parts(PartsFilter::by_ids(["p3", "p1"]))
            .await
            .unwrap();

        let ids: Vec<_> = parts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(gateway.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_out_of_stock_parts_are_still_listed() {
        let parts = catalog()
            .list_parts(PartsFilter::by_ids(["p2"]))
            .await
            .unwrap();
        assert_eq!(parts.len(), 1);
        assert!(!parts[0].in_stock());
    }

    #[tokio::test]
    async fn test_no_match_is_parts_not_found() {
        let result = catalog().list_parts(PartsFilter::by_ids(["nope"])).await;
        assert_eq!(result, Err(GatewayError::PartsNotFound));
    }

    #[tokio::test]
    async fn test_tag_filter_uses_any_overlap() {
        let parts = catalog()
            .list_parts(PartsFilter::new().with_tags(["heavy", "light"]))
            .await
            .unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[tokio::test]
    async fn test_set_stock_and_upsert() {
        let gateway = catalog();
        assert!(gateway.set_stock(&PartId::new("p2"), 1).await);
        assert!(!gateway.set_stock(&PartId::new("missing"), 1).await);

        gateway
            .upsert_part(Part::new("p1", "Engine v2", Money::from_cents(12000), 1))
            .await;

        let parts = gateway
            .list_parts(PartsFilter::by_ids(["p1", "p2"]))
            .await
            .unwrap();
        assert_eq!(parts[0].name, "Engine v2");
        assert!(parts[1].in_stock());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let gateway = catalog();
        gateway
            .set_failure(Some(GatewayError::Unavailable("down".to_string())))
            .await;

        let result = gateway.list_parts(PartsFilter::new()).await;
        assert!(matches!(result, Err(GatewayError::Unavailable(_))));

        gateway.set_failure(None).await;
        assert!(gateway.list_parts(PartsFilter::new()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_injected_latency() {
        let gateway = catalog();
        gateway.set_latency(Some(Duration::from_secs(5))).await;

        let start = tokio::time::Instant::now();
        gateway.list_parts(PartsFilter::new()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn test_demo_catalog_has_unique_ids() {
        let parts = demo_catalog();
        let mut ids: Vec<_> = parts.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), parts.len());
    }
}

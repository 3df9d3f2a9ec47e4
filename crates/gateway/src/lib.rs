//! Gateways to the external inventory and payment services.
//!
//! The order orchestrator only sees the `InventoryGateway` and
//! `PaymentGateway` traits. Two implementations of each are provided:
//! in-memory ones for tests and standalone runs, and HTTP clients speaking
//! the JSON contract in [`wire`].

pub mod error;
pub mod http;
pub mod inventory;
pub mod payment;
pub mod wire;

pub use error::GatewayError;
pub use http::{HttpInventoryGateway, HttpPaymentGateway};
pub use inventory::{InMemoryInventoryGateway, InventoryGateway, demo_catalog};
pub use payment::{InMemoryPaymentGateway, PaymentGateway, PaymentRecord};

//! Order lifecycle orchestration.
//!
//! [`OrderOrchestrator`] coordinates the order store with the inventory and
//! payment gateways: it prices new orders against the catalog, pays pending
//! orders and cancels them.

pub mod config;
pub mod error;
pub mod service;

pub use config::{DEFAULT_GATEWAY_TIMEOUT, OrchestratorConfig};
pub use error::{ErrorKind, OrderError, Result};
pub use service::{CreatedOrder, OrderOrchestrator};

//! Order storage for the order service.
//!
//! `OrderStore` is the seam the orchestrator depends on; `InMemoryOrderStore`
//! keeps orders for the lifetime of the process.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use store::OrderStore;

//! Domain model for the order service.
//!
//! This crate provides:
//! - the Order record and its partial updates
//! - the order status state machine
//! - money and payment method value objects
//! - the catalog Part snapshot and the filter used to look parts up

pub mod order;
pub mod part;

pub use order::{Money, Order, OrderStatus, OrderUpdate, PaymentMethod};
pub use part::{Category, Dimensions, Manufacturer, Metadata, Part, PartsFilter};

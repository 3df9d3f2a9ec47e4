//! Order model, status state machine, and related value objects.

mod model;
mod status;
mod value_objects;

pub use model::{Order, OrderUpdate};
pub use status::OrderStatus;
pub use value_objects::{Money, PaymentMethod};

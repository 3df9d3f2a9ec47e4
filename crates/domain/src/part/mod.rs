//! Catalog part snapshot and lookup filter.

mod filter;
mod model;

pub use filter::PartsFilter;
pub use model::{Category, Dimensions, Manufacturer, Metadata, Part};

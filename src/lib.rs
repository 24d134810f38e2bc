//! Aggregation pipeline behind an exploratory media-catalog dashboard.
//!
//! Load a catalog once with [`data::loader::load`], then build every chart
//! table for a selector state with [`dashboard::Dashboard::build`].

pub mod config;
pub mod dashboard;
pub mod data;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DurationView, Selectors};
pub use data::model::{Catalog, CatalogRecord, ContentType};

//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (KeyValueStore, FileSystem)
//! but are themselves concrete structs, not traits.

mod chart;
mod persistence;
mod portfolio;

pub use chart::{compute_chart_model, ChartModel, RingLevel};
pub use persistence::PersistenceGateway;
pub use portfolio::PortfolioService;

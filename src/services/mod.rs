//! Services module for invoice-actions.

pub mod credentials;
pub mod database;
pub mod metrics;
pub mod navigator;
pub mod view_cache;

pub use credentials::CredentialsProvider;
pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use navigator::RouteNavigator;
pub use view_cache::InMemoryViewCache;

pub mod app;
pub mod auth;
pub mod invoices;
pub mod metrics;

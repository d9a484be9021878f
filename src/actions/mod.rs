//! Form actions: validate raw input, issue one store statement, react.
//!
//! Each action is a single linear validate -> mutate -> react sequence with
//! two terminal outcomes: a structured error value handed back to the form,
//! or a control transfer that ends the request.

pub mod auth;
pub mod invoice;

pub use auth::AuthActions;
pub use invoice::InvoiceActions;

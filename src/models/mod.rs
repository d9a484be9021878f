//! Domain models for invoice-actions.

mod invoice;
mod user;

pub use invoice::{Invoice, InvoiceDraft, InvoiceStatus, NewInvoice};
pub use user::User;

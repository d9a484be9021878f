//! Invoice model for invoice-actions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Strict parse of a submitted form value. Anything outside the closed
    /// set is rejected rather than defaulted.
    pub fn from_form_value(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

/// Invoice row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    /// Integer minor units (cents).
    pub amount: i64,
    pub status: String,
    pub date: NaiveDate,
}

/// Typed payload produced by successful form validation. Transient; lives
/// for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    /// Dollar amount as submitted, already known to be > 0.
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Stored amount is always `round(amount_dollars * 100)`.
    pub fn amount_in_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        let amount_cents = self.amount_in_cents();
        NewInvoice {
            customer_id: self.customer_id,
            amount_cents,
            status: self.status,
            date,
        }
    }
}

/// Input for a single invoice write.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_converts_to_exact_cents() {
        let draft = InvoiceDraft {
            customer_id: "c-1".to_string(),
            amount: 49.99,
            status: InvoiceStatus::Paid,
        };
        assert_eq!(draft.amount_in_cents(), 4999);
    }

    #[test]
    fn whole_dollar_amounts_round_trip() {
        let draft = InvoiceDraft {
            customer_id: "c-1".to_string(),
            amount: 120.0,
            status: InvoiceStatus::Pending,
        };
        assert_eq!(draft.amount_in_cents(), 12000);
    }

    #[test]
    fn sub_dime_amounts_keep_their_cents() {
        let draft = InvoiceDraft {
            customer_id: "c-1".to_string(),
            amount: 0.07,
            status: InvoiceStatus::Pending,
        };
        assert_eq!(draft.amount_in_cents(), 7);
    }

    #[test]
    fn status_parses_only_the_closed_set() {
        assert_eq!(
            InvoiceStatus::from_form_value("pending"),
            Some(InvoiceStatus::Pending)
        );
        assert_eq!(
            InvoiceStatus::from_form_value("paid"),
            Some(InvoiceStatus::Paid)
        );
        assert_eq!(InvoiceStatus::from_form_value("draft"), None);
        assert_eq!(InvoiceStatus::from_form_value("PAID"), None);
        assert_eq!(InvoiceStatus::from_form_value(""), None);
    }
}

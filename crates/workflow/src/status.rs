//! Closed status sets per document type.
//!
//! Status tokens are case-sensitive strings persisted verbatim, so every enum
//! here maps 1:1 onto its wire/store token via `as_str`/`parse`.

use serde::{Deserialize, Serialize};

use linguafin_core::DocumentKind;

/// A status enumeration backed by a static transition graph.
///
/// `successors` returns the allowed next states for a value; a state with no
/// successors is terminal. Parsing is fallible on purpose: unknown tokens are
/// a caller-level concern (the validator treats them permissively).
pub trait DocumentStatus: Copy + Eq + Sized + 'static {
    const KIND: DocumentKind;

    fn parse(token: &str) -> Option<Self>;

    fn as_str(&self) -> &'static str;

    fn successors(&self) -> &'static [Self];

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

/// Invoice status lifecycle.
///
/// Note: the service layer also writes "Approved" and "Archived" status
/// strings that are intentionally absent from this set; they ride the
/// validator's permissive fallback for legacy values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Sent,
    Paid,
    Overdue,
    Cancelled,
    Refunded,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 7] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Pending,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
        InvoiceStatus::Refunded,
    ];
}

impl DocumentStatus for InvoiceStatus {
    const KIND: DocumentKind = DocumentKind::Invoice;

    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "Draft" => Self::Draft,
            "Pending" => Self::Pending,
            "Sent" => Self::Sent,
            "Paid" => Self::Paid,
            "Overdue" => Self::Overdue,
            "Cancelled" => Self::Cancelled,
            "Refunded" => Self::Refunded,
            _ => return None,
        })
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Pending, Self::Sent, Self::Cancelled],
            Self::Pending => &[Self::Sent, Self::Cancelled],
            Self::Sent => &[Self::Paid, Self::Overdue, Self::Cancelled],
            Self::Paid => &[Self::Refunded],
            Self::Overdue => &[Self::Paid, Self::Cancelled],
            // Terminal states.
            Self::Cancelled | Self::Refunded => &[],
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseOrderStatus {
    Pending,
    Accepted,
    Declined,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Approved,
    Paid,
    Cancelled,
    Expired,
    Disputed,
}

impl PurchaseOrderStatus {
    pub const ALL: [PurchaseOrderStatus; 10] = [
        PurchaseOrderStatus::Pending,
        PurchaseOrderStatus::Accepted,
        PurchaseOrderStatus::Declined,
        PurchaseOrderStatus::InProgress,
        PurchaseOrderStatus::Completed,
        PurchaseOrderStatus::Approved,
        PurchaseOrderStatus::Paid,
        PurchaseOrderStatus::Cancelled,
        PurchaseOrderStatus::Expired,
        PurchaseOrderStatus::Disputed,
    ];
}

impl DocumentStatus for PurchaseOrderStatus {
    const KIND: DocumentKind = DocumentKind::PurchaseOrder;

    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "Pending" => Self::Pending,
            "Accepted" => Self::Accepted,
            "Declined" => Self::Declined,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Approved" => Self::Approved,
            "Paid" => Self::Paid,
            "Cancelled" => Self::Cancelled,
            "Expired" => Self::Expired,
            "Disputed" => Self::Disputed,
            _ => return None,
        })
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Declined => "Declined",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Approved => "Approved",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
            Self::Expired => "Expired",
            Self::Disputed => "Disputed",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Declined, Self::Cancelled],
            Self::Accepted => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed => &[Self::Approved],
            Self::Approved => &[Self::Paid],
            // Disputed orders can be re-approved or killed outright.
            Self::Disputed => &[Self::Approved, Self::Cancelled],
            // Terminal states.
            Self::Paid | Self::Declined | Self::Cancelled | Self::Expired => &[],
        }
    }
}

impl core::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales order status values (schema-level only).
///
/// Sales orders reuse the invoice table and the invoice lifecycle; this set
/// exists for request/response validation and adds "Transformed" for orders
/// that have been converted to a tax invoice. There is no transition graph:
/// sales order status changes do not go through the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalesOrderStatus {
    Draft,
    Pending,
    Sent,
    Cancelled,
    Transformed,
}

impl SalesOrderStatus {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "Draft" => Self::Draft,
            "Pending" => Self::Pending,
            "Sent" => Self::Sent,
            "Cancelled" => Self::Cancelled,
            "Transformed" => Self::Transformed,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Sent => "Sent",
            Self::Cancelled => "Cancelled",
            Self::Transformed => "Transformed",
        }
    }
}

impl core::fmt::Display for SalesOrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tokens_round_trip() {
        for status in InvoiceStatus::ALL {
            assert_eq!(InvoiceStatus::parse(status.as_str()), Some(status));
        }
        for status in PurchaseOrderStatus::ALL {
            assert_eq!(PurchaseOrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn sales_order_tokens_round_trip() {
        for status in [
            SalesOrderStatus::Draft,
            SalesOrderStatus::Pending,
            SalesOrderStatus::Sent,
            SalesOrderStatus::Cancelled,
            SalesOrderStatus::Transformed,
        ] {
            assert_eq!(SalesOrderStatus::parse(status.as_str()), Some(status));
        }
        // invoice-only lifecycle states are not sales order statuses
        assert_eq!(SalesOrderStatus::parse("Overdue"), None);
        assert_eq!(SalesOrderStatus::parse("Paid"), None);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!(InvoiceStatus::parse("draft"), None);
        assert_eq!(PurchaseOrderStatus::parse("in progress"), None);
        assert_eq!(PurchaseOrderStatus::parse("In Progress"), Some(PurchaseOrderStatus::InProgress));
    }

    #[test]
    fn service_only_tokens_are_not_invoice_states() {
        // "Approved" and "Archived" are written by service operations but are
        // deliberately outside the invoice enumeration.
        assert_eq!(InvoiceStatus::parse("Approved"), None);
        assert_eq!(InvoiceStatus::parse("Archived"), None);
    }

    #[test]
    fn in_progress_serializes_with_a_space() {
        let json = serde_json::to_string(&PurchaseOrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn terminal_states_have_no_successors() {
        assert!(InvoiceStatus::Cancelled.is_terminal());
        assert!(InvoiceStatus::Refunded.is_terminal());
        assert!(PurchaseOrderStatus::Paid.is_terminal());
        assert!(PurchaseOrderStatus::Expired.is_terminal());
        assert!(!PurchaseOrderStatus::Disputed.is_terminal());
    }
}

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// The document families managed by this service.
///
/// Sales orders live in the invoice table behind an `invoice_type`
/// discriminator, but surface as their own kind in errors and diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    InvoiceItem,
    InvoiceGroup,
    PurchaseOrder,
    PoMilestone,
    SalesOrder,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::InvoiceItem => "invoice item",
            DocumentKind::InvoiceGroup => "invoice group",
            DocumentKind::PurchaseOrder => "purchase order",
            DocumentKind::PoMilestone => "PO milestone",
            DocumentKind::SalesOrder => "sales order",
        }
    }
}

impl core::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (missing records,
/// rejected lifecycle transitions, validation). Infrastructure concerns
/// belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The identifier does not resolve to a live record of this kind.
    #[error("{kind} with UUID {id} not found")]
    NotFound { kind: DocumentKind, id: String },

    /// The requested status change is not a permitted edge from the
    /// current state. Carries the full allowed-successor list for
    /// actionable diagnostics.
    #[error(
        "cannot transition {kind} from '{current}' to '{requested}'; allowed transitions: {allowed:?}"
    )]
    InvalidTransition {
        kind: DocumentKind,
        current: String,
        requested: String,
        allowed: Vec<&'static str>,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(kind: DocumentKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = DomainError::not_found(DocumentKind::PurchaseOrder, "abc-123");
        assert_eq!(
            err.to_string(),
            "purchase order with UUID abc-123 not found"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_transition_message_lists_allowed_successors() {
        let err = DomainError::InvalidTransition {
            kind: DocumentKind::Invoice,
            current: "Draft".to_string(),
            requested: "Paid".to_string(),
            allowed: vec!["Pending", "Sent", "Cancelled"],
        };
        let msg = err.to_string();
        assert!(msg.contains("from 'Draft' to 'Paid'"));
        assert!(msg.contains("Pending"));
        assert!(msg.contains("Cancelled"));
        assert!(err.is_invalid_transition());
    }
}

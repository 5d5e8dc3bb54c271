//! `linguafin-workflow` — status lifecycles and the transition validator.
//!
//! Each document type has a closed status set and a static directed graph of
//! allowed transitions. The validator accepts raw strings because the backing
//! store carries legacy free-form status values; anything it cannot classify
//! is allowed through unchanged.

pub mod status;
pub mod transitions;

pub use status::{DocumentStatus, InvoiceStatus, PurchaseOrderStatus, SalesOrderStatus};
pub use transitions::{
    validate_invoice_status_transition, validate_po_status_transition, validate_transition,
};

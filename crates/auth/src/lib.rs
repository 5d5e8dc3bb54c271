//! `linguafin-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the gateway
//! hands us an already-extracted role string, and we answer whether that role
//! may perform an operation type. Whether a particular *state change* is
//! allowed is a separate question answered by `linguafin-workflow`.

pub mod authorize;
pub mod permissions;
pub mod roles;

pub use authorize::{
    AuthzError, check_invoice_permission, check_po_permission, check_sales_order_permission,
    require_invoice_permission, require_po_permission, require_sales_order_permission,
};
pub use permissions::{InvoicePermission, PurchaseOrderPermission, SalesOrderPermission};
pub use roles::UserRole;

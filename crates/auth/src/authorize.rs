//! The role → allowed-operation matrix.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)
//!
//! Admin and finance hold every permission. Team leads run the day-to-day
//! lifecycle (create/update/approve, transform/cancel for sales orders) but
//! cannot delete. Team members are read/update only.

use thiserror::Error;

use crate::permissions::{InvoicePermission, PurchaseOrderPermission, SalesOrderPermission};
use crate::roles::UserRole;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("user with role '{role}' does not have permission '{permission}'")]
    Forbidden { role: String, permission: String },
}

/// Check whether a role may perform an invoice operation.
pub fn check_invoice_permission(role: UserRole, permission: InvoicePermission) -> bool {
    match role {
        UserRole::Admin | UserRole::Finance => true,
        UserRole::TeamLead => matches!(
            permission,
            InvoicePermission::Create
                | InvoicePermission::Read
                | InvoicePermission::Update
                | InvoicePermission::Approve
        ),
        UserRole::TeamMember => matches!(
            permission,
            InvoicePermission::Read | InvoicePermission::Update
        ),
    }
}

/// Require an invoice permission, failing with [`AuthzError::Forbidden`].
pub fn require_invoice_permission(
    role: UserRole,
    permission: InvoicePermission,
) -> Result<(), AuthzError> {
    if check_invoice_permission(role, permission) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role: role.to_string(),
            permission: permission.to_string(),
        })
    }
}

/// Check whether a role may perform a purchase order operation.
pub fn check_po_permission(role: UserRole, permission: PurchaseOrderPermission) -> bool {
    match role {
        UserRole::Admin | UserRole::Finance => true,
        UserRole::TeamLead => matches!(
            permission,
            PurchaseOrderPermission::Create
                | PurchaseOrderPermission::Read
                | PurchaseOrderPermission::Update
                | PurchaseOrderPermission::Approve
        ),
        UserRole::TeamMember => matches!(
            permission,
            PurchaseOrderPermission::Read | PurchaseOrderPermission::Update
        ),
    }
}

/// Require a purchase order permission.
pub fn require_po_permission(
    role: UserRole,
    permission: PurchaseOrderPermission,
) -> Result<(), AuthzError> {
    if check_po_permission(role, permission) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role: role.to_string(),
            permission: permission.to_string(),
        })
    }
}

/// Check whether a role may perform a sales order operation.
pub fn check_sales_order_permission(role: UserRole, permission: SalesOrderPermission) -> bool {
    match role {
        UserRole::Admin | UserRole::Finance => true,
        UserRole::TeamLead => matches!(
            permission,
            SalesOrderPermission::Create
                | SalesOrderPermission::Read
                | SalesOrderPermission::Update
                | SalesOrderPermission::Transform
                | SalesOrderPermission::Cancel
        ),
        UserRole::TeamMember => matches!(
            permission,
            SalesOrderPermission::Read | SalesOrderPermission::Update
        ),
    }
}

/// Require a sales order permission.
pub fn require_sales_order_permission(
    role: UserRole,
    permission: SalesOrderPermission,
) -> Result<(), AuthzError> {
    if check_sales_order_permission(role, permission) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role: role.to_string(),
            permission: permission.to_string(),
        })
    }
}

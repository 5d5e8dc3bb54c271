//! Per-document-type operation permissions.
//!
//! Permission tokens follow the gateway's `<resource>:<action>` convention.

use serde::{Deserialize, Serialize};

/// Invoice operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoicePermission {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    ViewFinancial,
}

impl InvoicePermission {
    pub const ALL: [InvoicePermission; 6] = [
        InvoicePermission::Create,
        InvoicePermission::Read,
        InvoicePermission::Update,
        InvoicePermission::Delete,
        InvoicePermission::Approve,
        InvoicePermission::ViewFinancial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "invoices:create",
            Self::Read => "invoices:read",
            Self::Update => "invoices:update",
            Self::Delete => "invoices:delete",
            Self::Approve => "invoices:approve",
            Self::ViewFinancial => "invoices:view_financial",
        }
    }
}

impl core::fmt::Display for InvoicePermission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase order operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderPermission {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    ViewFinancial,
}

impl PurchaseOrderPermission {
    pub const ALL: [PurchaseOrderPermission; 6] = [
        PurchaseOrderPermission::Create,
        PurchaseOrderPermission::Read,
        PurchaseOrderPermission::Update,
        PurchaseOrderPermission::Delete,
        PurchaseOrderPermission::Approve,
        PurchaseOrderPermission::ViewFinancial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "purchase_orders:create",
            Self::Read => "purchase_orders:read",
            Self::Update => "purchase_orders:update",
            Self::Delete => "purchase_orders:delete",
            Self::Approve => "purchase_orders:approve",
            Self::ViewFinancial => "purchase_orders:view_financial",
        }
    }
}

impl core::fmt::Display for PurchaseOrderPermission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales order operations (transform/cancel replace approve here).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesOrderPermission {
    Create,
    Read,
    Update,
    Delete,
    Transform,
    Cancel,
}

impl SalesOrderPermission {
    pub const ALL: [SalesOrderPermission; 6] = [
        SalesOrderPermission::Create,
        SalesOrderPermission::Read,
        SalesOrderPermission::Update,
        SalesOrderPermission::Delete,
        SalesOrderPermission::Transform,
        SalesOrderPermission::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "sales_orders:create",
            Self::Read => "sales_orders:read",
            Self::Update => "sales_orders:update",
            Self::Delete => "sales_orders:delete",
            Self::Transform => "sales_orders:transform",
            Self::Cancel => "sales_orders:cancel",
        }
    }
}

impl core::fmt::Display for SalesOrderPermission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! `linguafin-invoicing` — invoice, invoice item and invoice group domain.
//!
//! Records are plain serde structs with soft-delete flags; the service owns
//! all state changes and is the only place status transitions are checked.

pub mod group;
pub mod invoice;
pub mod item;
pub mod service;

pub use group::{
    InvoiceGroup, InvoiceGroupFilterParams, InvoiceGroupUpdate, InvoiceGroupWithInvoices,
    NewInvoiceGroup,
};
pub use invoice::{Invoice, InvoiceFilterParams, InvoiceUpdate, InvoiceView, NewInvoice};
pub use item::{InvoiceItem, InvoiceItemUpdate, NewInvoiceItem};
pub use service::InvoiceService;

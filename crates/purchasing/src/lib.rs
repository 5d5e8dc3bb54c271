//! `linguafin-purchasing` — purchase orders placed with translators.
//!
//! Mirrors the invoicing service shape: soft-deleted records, a workflow
//! check on update and approve, and views enriched through the job
//! directory. Batch approve/delete report per-item outcomes.

pub mod batch;
pub mod milestone;
pub mod order;
pub mod service;

pub use batch::{BatchItemResult, BatchItemStatus, BatchOutcome};
pub use milestone::{NewPoMilestone, PoMilestone, PoMilestoneUpdate};
pub use order::{
    NewPurchaseOrder, PurchaseOrder, PurchaseOrderFilterParams, PurchaseOrderUpdate,
    PurchaseOrderView,
};
pub use service::PurchaseOrderService;

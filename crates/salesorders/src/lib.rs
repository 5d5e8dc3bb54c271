//! `linguafin-salesorders` — pro formas and sales orders.
//!
//! A thin layer over the invoice store: sales orders are invoice records of
//! a sales order type, and transformation into a real invoice is a type
//! change on the same record.

pub mod service;

pub use service::{
    DEFAULT_TRANSFORM_TYPE, SALES_ORDER_TYPES, SalesOrderService, TransformRequest,
    is_sales_order_type,
};

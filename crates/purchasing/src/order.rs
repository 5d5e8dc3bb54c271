//! Purchase order records, patches and list filters.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linguafin_core::{ObjectId, PageParams, SortOrder};

/// An order placed with a translator for one job.
///
/// `job_ref` holds the job UUID; views resolve it to the legacy numeric id
/// through the job directory, the mirror image of invoice enrichment.
/// `approved_for_payment` is a legacy integer flag: 1 approved, 0 or absent
/// not approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub uuid: ObjectId,
    pub job_ref: Option<ObjectId>,
    pub invoice_ref: Option<ObjectId>,
    pub translator_id: Option<String>,
    pub project_manager_id: Option<String>,
    pub order_no: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub order_notes: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub currency: Option<String>,
    pub translator_amount: Option<f64>,
    pub status: Option<String>,
    pub approved_for_payment: Option<i32>,
    pub approved_date: Option<DateTime<Utc>>,
    pub accepted: Option<bool>,
    pub date_accepted: Option<DateTime<Utc>>,
    pub target_lang: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_due: Option<DateTime<Utc>>,
    pub translator_paid: Option<DateTime<Utc>>,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub decline_note: Option<String>,
    pub disputed: Option<bool>,
    pub expired: Option<bool>,
    pub is_deleted: bool,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub job_ref: Option<ObjectId>,
    pub invoice_ref: Option<ObjectId>,
    pub translator_id: Option<String>,
    pub project_manager_id: Option<String>,
    pub order_no: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub order_notes: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub currency: Option<String>,
    pub translator_amount: Option<f64>,
    pub status: Option<String>,
    pub target_lang: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_due: Option<DateTime<Utc>>,
}

impl NewPurchaseOrder {
    pub fn into_order(self, created_by: Option<String>, now: DateTime<Utc>) -> PurchaseOrder {
        PurchaseOrder {
            uuid: ObjectId::new(),
            job_ref: self.job_ref,
            invoice_ref: self.invoice_ref,
            translator_id: self.translator_id,
            project_manager_id: self.project_manager_id,
            order_no: self.order_no,
            order_date: self.order_date,
            order_notes: self.order_notes,
            amount: self.amount,
            amount_nett: self.amount_nett,
            currency: self.currency,
            translator_amount: self.translator_amount,
            status: self.status,
            approved_for_payment: None,
            approved_date: None,
            accepted: None,
            date_accepted: None,
            target_lang: self.target_lang,
            date_start: self.date_start,
            date_due: self.date_due,
            translator_paid: None,
            payment_reference: None,
            payment_date: None,
            decline_note: None,
            disputed: None,
            expired: None,
            is_deleted: false,
            created_by: created_by.clone(),
            modified_by: created_by,
            created: Some(now),
            modified: Some(now),
        }
    }
}

macro_rules! apply_fields {
    ($patch:expr, $record:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $patch.$field.clone() {
                $record.$field = Some(value);
            }
        )+
    };
}

pub(crate) use apply_fields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderUpdate {
    pub job_ref: Option<ObjectId>,
    pub invoice_ref: Option<ObjectId>,
    pub translator_id: Option<String>,
    pub project_manager_id: Option<String>,
    pub order_no: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub order_notes: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub currency: Option<String>,
    pub translator_amount: Option<f64>,
    pub status: Option<String>,
    pub approved_for_payment: Option<i32>,
    pub approved_date: Option<DateTime<Utc>>,
    pub accepted: Option<bool>,
    pub date_accepted: Option<DateTime<Utc>>,
    pub target_lang: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_due: Option<DateTime<Utc>>,
    pub translator_paid: Option<DateTime<Utc>>,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub decline_note: Option<String>,
    pub disputed: Option<bool>,
    pub expired: Option<bool>,
}

impl PurchaseOrderUpdate {
    pub fn apply(&self, order: &mut PurchaseOrder) {
        apply_fields!(
            self,
            order,
            [
                job_ref,
                invoice_ref,
                translator_id,
                project_manager_id,
                order_no,
                order_date,
                order_notes,
                amount,
                amount_nett,
                currency,
                translator_amount,
                status,
                approved_for_payment,
                approved_date,
                accepted,
                date_accepted,
                target_lang,
                date_start,
                date_due,
                translator_paid,
                payment_reference,
                payment_date,
                decline_note,
                disputed,
                expired,
            ]
        );
    }
}

/// Purchase order enriched with the legacy numeric id of its job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderView {
    #[serde(flatten)]
    pub order: PurchaseOrder,
    pub job_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderFilterParams {
    pub status: Option<String>,
    pub translator_id: Option<String>,
    pub project_manager_id: Option<String>,
    pub job_ref: Option<ObjectId>,
    pub currency: Option<String>,
    pub approved_for_payment: Option<bool>,
    pub accepted: Option<bool>,
    pub order_date_from: Option<DateTime<Utc>>,
    pub order_date_to: Option<DateTime<Utc>>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub page: PageParams,
}

impl Default for PurchaseOrderFilterParams {
    fn default() -> Self {
        Self {
            status: None,
            translator_id: None,
            project_manager_id: None,
            job_ref: None,
            currency: None,
            approved_for_payment: None,
            accepted: None,
            order_date_from: None,
            order_date_to: None,
            sort_by: "order_date".to_string(),
            sort_order: SortOrder::Asc,
            page: PageParams::default(),
        }
    }
}

impl PurchaseOrderFilterParams {
    pub fn matches(&self, order: &PurchaseOrder) -> bool {
        if let Some(status) = &self.status {
            if order.status.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(translator) = &self.translator_id {
            if order.translator_id.as_deref() != Some(translator.as_str()) {
                return false;
            }
        }
        if let Some(pm) = &self.project_manager_id {
            if order.project_manager_id.as_deref() != Some(pm.as_str()) {
                return false;
            }
        }
        if let Some(job_ref) = &self.job_ref {
            if order.job_ref.as_ref() != Some(job_ref) {
                return false;
            }
        }
        if let Some(currency) = &self.currency {
            if order.currency.as_deref() != Some(currency.as_str()) {
                return false;
            }
        }
        if let Some(wanted) = self.approved_for_payment {
            let approved = order.approved_for_payment == Some(1);
            if approved != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.accepted {
            if order.accepted.unwrap_or(false) != wanted {
                return false;
            }
        }
        if self.order_date_from.is_some() || self.order_date_to.is_some() {
            let Some(date) = order.order_date else {
                return false;
            };
            if self.order_date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.order_date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }
}

/// Sort purchase orders by a named column, falling back to `order_date`.
pub(crate) fn sort_orders(orders: &mut [PurchaseOrder], sort_by: &str, order: SortOrder) {
    orders.sort_by(|a, b| {
        let ord = match sort_by {
            "date_due" => a.date_due.cmp(&b.date_due),
            "created" => a.created.cmp(&b.created),
            "modified" => a.modified.cmp(&b.modified),
            "amount" => cmp_f64(a.amount, b.amount),
            "translator_amount" => cmp_f64(a.translator_amount, b.translator_amount),
            "status" => a.status.cmp(&b.status),
            "order_no" => a.order_no.cmp(&b.order_no),
            _ => a.order_date.cmp(&b.order_date),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order_with_status(status: &str) -> PurchaseOrder {
        NewPurchaseOrder {
            status: Some(status.to_string()),
            ..NewPurchaseOrder::default()
        }
        .into_order(None, Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap())
    }

    #[test]
    fn approved_for_payment_filter_reads_the_legacy_flag() {
        let filters = PurchaseOrderFilterParams {
            approved_for_payment: Some(true),
            ..PurchaseOrderFilterParams::default()
        };
        let mut order = order_with_status("Approved");
        assert!(!filters.matches(&order));
        order.approved_for_payment = Some(1);
        assert!(filters.matches(&order));
        order.approved_for_payment = Some(0);
        assert!(!filters.matches(&order));
    }

    #[test]
    fn patch_does_not_clear_unset_fields() {
        let mut order = order_with_status("Pending");
        order.currency = Some("USD".to_string());
        let patch = PurchaseOrderUpdate {
            order_notes: Some("rush job".to_string()),
            ..PurchaseOrderUpdate::default()
        };
        patch.apply(&mut order);
        assert_eq!(order.currency.as_deref(), Some("USD"));
        assert_eq!(order.order_notes.as_deref(), Some("rush job"));
        assert_eq!(order.status.as_deref(), Some("Pending"));
    }
}

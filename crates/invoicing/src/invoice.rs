//! Invoice records, patches and list filters.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linguafin_core::{ObjectId, PageParams, SortOrder};

/// A client-facing invoice.
///
/// `job_id` is the legacy numeric id of the job the invoice bills for;
/// views resolve it to the job UUID through the job directory. Deletion is
/// soft: `deleted` rows stay in the store and are filtered out of reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub uuid: ObjectId,
    pub job_id: Option<i64>,
    pub invoice_group_id: Option<ObjectId>,
    pub inv_number: Option<String>,
    pub ref_inv: Option<String>,
    pub inv_date: Option<DateTime<Utc>>,
    pub sent: Option<DateTime<Utc>>,
    pub paid: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub transaction_type: Option<String>,
    pub invoice_type: Option<String>,
    pub status: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_country: Option<String>,
    pub purchase_order: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub project_manager_id: Option<String>,
    pub deleted: bool,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Fields accepted when creating an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub job_id: Option<i64>,
    pub invoice_group_id: Option<ObjectId>,
    pub inv_number: Option<String>,
    pub ref_inv: Option<String>,
    pub inv_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub transaction_type: Option<String>,
    pub invoice_type: Option<String>,
    pub status: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_country: Option<String>,
    pub purchase_order: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub project_manager_id: Option<String>,
}

impl NewInvoice {
    pub fn into_invoice(self, created_by: Option<String>, now: DateTime<Utc>) -> Invoice {
        Invoice {
            uuid: ObjectId::new(),
            job_id: self.job_id,
            invoice_group_id: self.invoice_group_id,
            inv_number: self.inv_number,
            ref_inv: self.ref_inv,
            inv_date: self.inv_date,
            sent: None,
            paid: None,
            due_date: self.due_date,
            currency: self.currency,
            amount: self.amount,
            amount_nett: self.amount_nett,
            tax: self.tax,
            tax_rate: self.tax_rate,
            transaction_type: self.transaction_type,
            invoice_type: self.invoice_type,
            status: self.status,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            client_name: self.client_name,
            client_email: self.client_email,
            client_country: self.client_country,
            purchase_order: self.purchase_order,
            notes: self.notes,
            description: self.description,
            project_manager_id: self.project_manager_id,
            deleted: false,
            created_by: created_by.clone(),
            modified_by: created_by,
            created: Some(now),
            modified: Some(now),
        }
    }
}

/// Partial update: only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub job_id: Option<i64>,
    pub invoice_group_id: Option<ObjectId>,
    pub inv_number: Option<String>,
    pub ref_inv: Option<String>,
    pub inv_date: Option<DateTime<Utc>>,
    pub sent: Option<DateTime<Utc>>,
    pub paid: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub transaction_type: Option<String>,
    pub invoice_type: Option<String>,
    pub status: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_country: Option<String>,
    pub purchase_order: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub project_manager_id: Option<String>,
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

impl InvoiceUpdate {
    pub fn apply(&self, invoice: &mut Invoice) {
        apply_fields!(
            self,
            invoice,
            [
                job_id,
                invoice_group_id,
                inv_number,
                ref_inv,
                inv_date,
                sent,
                paid,
                due_date,
                currency,
                amount,
                amount_nett,
                tax,
                tax_rate,
                transaction_type,
                invoice_type,
                status,
                source_lang,
                target_lang,
                client_name,
                client_email,
                client_country,
                purchase_order,
                notes,
                description,
                project_manager_id,
            ]
        );
    }
}

pub(crate) use apply_fields;

/// Invoice enriched with the UUID of the job it bills for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub job_uuid: Option<ObjectId>,
}

/// Filters, sort and page selection for invoice listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFilterParams {
    pub status: Option<String>,
    pub job_id: Option<i64>,
    pub invoice_group_id: Option<ObjectId>,
    pub client_name: Option<String>,
    pub currency: Option<String>,
    pub inv_date_from: Option<DateTime<Utc>>,
    pub inv_date_to: Option<DateTime<Utc>>,
    pub due_date_from: Option<DateTime<Utc>>,
    pub due_date_to: Option<DateTime<Utc>>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub page: PageParams,
}

impl Default for InvoiceFilterParams {
    fn default() -> Self {
        Self {
            status: None,
            job_id: None,
            invoice_group_id: None,
            client_name: None,
            currency: None,
            inv_date_from: None,
            inv_date_to: None,
            due_date_from: None,
            due_date_to: None,
            sort_by: "inv_date".to_string(),
            sort_order: SortOrder::Asc,
            page: PageParams::default(),
        }
    }
}

impl InvoiceFilterParams {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(status) = &self.status {
            if invoice.status.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(job_id) = self.job_id {
            if invoice.job_id != Some(job_id) {
                return false;
            }
        }
        if let Some(group_id) = &self.invoice_group_id {
            if invoice.invoice_group_id.as_ref() != Some(group_id) {
                return false;
            }
        }
        if let Some(needle) = &self.client_name {
            let needle = needle.to_lowercase();
            let hit = invoice
                .client_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(currency) = &self.currency {
            if invoice.currency.as_deref() != Some(currency.as_str()) {
                return false;
            }
        }
        in_range(invoice.inv_date, self.inv_date_from, self.inv_date_to)
            && in_range(invoice.due_date, self.due_date_from, self.due_date_to)
    }
}

fn in_range(
    value: Option<DateTime<Utc>>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    if let Some(from) = from {
        if value < from {
            return false;
        }
    }
    if let Some(to) = to {
        if value > to {
            return false;
        }
    }
    true
}

/// Sort invoices by a named column, falling back to `inv_date` for
/// unrecognized names. Shared with the sales order listing, which runs over
/// the same record type.
pub fn sort_invoices(invoices: &mut [Invoice], sort_by: &str, order: SortOrder) {
    invoices.sort_by(|a, b| {
        let ord = match sort_by {
            "due_date" => a.due_date.cmp(&b.due_date),
            "created" => a.created.cmp(&b.created),
            "modified" => a.modified.cmp(&b.modified),
            "amount" => cmp_f64(a.amount, b.amount),
            "amount_nett" => cmp_f64(a.amount_nett, b.amount_nett),
            "client_name" => a.client_name.cmp(&b.client_name),
            "status" => a.status.cmp(&b.status),
            "inv_number" => a.inv_number.cmp(&b.inv_number),
            _ => a.inv_date.cmp(&b.inv_date),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

pub(crate) fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
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

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap()
    }

    fn invoice(name: &str, date: u32) -> Invoice {
        let mut inv = NewInvoice {
            client_name: Some(name.to_string()),
            inv_date: Some(day(date)),
            ..NewInvoice::default()
        }
        .into_invoice(None, day(1));
        inv.status = Some("Draft".to_string());
        inv
    }

    #[test]
    fn patch_only_writes_present_fields() {
        let mut inv = invoice("Acme", 3);
        let patch = InvoiceUpdate {
            currency: Some("EUR".to_string()),
            ..InvoiceUpdate::default()
        };
        patch.apply(&mut inv);
        assert_eq!(inv.currency.as_deref(), Some("EUR"));
        assert_eq!(inv.client_name.as_deref(), Some("Acme"));
        assert_eq!(inv.status.as_deref(), Some("Draft"));
    }

    #[test]
    fn client_name_filter_is_a_case_insensitive_substring() {
        let filters = InvoiceFilterParams {
            client_name: Some("acme".to_string()),
            ..InvoiceFilterParams::default()
        };
        assert!(filters.matches(&invoice("Acme Translations", 3)));
        assert!(!filters.matches(&invoice("Globex", 3)));
    }

    #[test]
    fn date_range_excludes_rows_without_a_date() {
        let filters = InvoiceFilterParams {
            inv_date_from: Some(day(2)),
            ..InvoiceFilterParams::default()
        };
        let mut inv = invoice("Acme", 3);
        assert!(filters.matches(&inv));
        inv.inv_date = None;
        assert!(!filters.matches(&inv));
        inv.inv_date = Some(day(1));
        assert!(!filters.matches(&inv));
    }

    #[test]
    fn unknown_sort_column_falls_back_to_inv_date() {
        let mut rows = vec![invoice("B", 5), invoice("A", 2)];
        sort_invoices(&mut rows, "no_such_column", SortOrder::Asc);
        assert_eq!(rows[0].client_name.as_deref(), Some("A"));

        sort_invoices(&mut rows, "client_name", SortOrder::Desc);
        assert_eq!(rows[0].client_name.as_deref(), Some("B"));
    }
}

//! Invoice groups: one billing envelope covering several invoices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linguafin_core::{ObjectId, PageParams, SortOrder};

use crate::invoice::{Invoice, apply_fields};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGroup {
    pub uuid: ObjectId,
    pub group_number: Option<String>,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub sent: Option<DateTime<Utc>>,
    pub paid: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub status: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub project_manager_id: Option<String>,
    pub deleted: bool,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceGroup {
    pub group_number: Option<String>,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub status: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub project_manager_id: Option<String>,
}

impl NewInvoiceGroup {
    pub fn into_group(self, created_by: Option<String>, now: DateTime<Utc>) -> InvoiceGroup {
        InvoiceGroup {
            uuid: ObjectId::new(),
            group_number: self.group_number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            sent: None,
            paid: None,
            currency: self.currency,
            amount: self.amount,
            amount_nett: self.amount_nett,
            tax: self.tax,
            tax_rate: self.tax_rate,
            status: self.status,
            client_name: self.client_name,
            client_email: self.client_email,
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGroupUpdate {
    pub group_number: Option<String>,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub sent: Option<DateTime<Utc>>,
    pub paid: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub amount_nett: Option<f64>,
    pub tax: Option<f64>,
    pub tax_rate: Option<f64>,
    pub status: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub project_manager_id: Option<String>,
}

impl InvoiceGroupUpdate {
    pub fn apply(&self, group: &mut InvoiceGroup) {
        apply_fields!(
            self,
            group,
            [
                group_number,
                invoice_date,
                due_date,
                sent,
                paid,
                currency,
                amount,
                amount_nett,
                tax,
                tax_rate,
                status,
                client_name,
                client_email,
                notes,
                description,
                project_manager_id,
            ]
        );
    }
}

/// A group together with its live member invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGroupWithInvoices {
    #[serde(flatten)]
    pub group: InvoiceGroup,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGroupFilterParams {
    pub status: Option<String>,
    pub client_name: Option<String>,
    pub currency: Option<String>,
    pub invoice_date_from: Option<DateTime<Utc>>,
    pub invoice_date_to: Option<DateTime<Utc>>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub page: PageParams,
}

impl Default for InvoiceGroupFilterParams {
    fn default() -> Self {
        Self {
            status: None,
            client_name: None,
            currency: None,
            invoice_date_from: None,
            invoice_date_to: None,
            sort_by: "invoice_date".to_string(),
            sort_order: SortOrder::Asc,
            page: PageParams::default(),
        }
    }
}

impl InvoiceGroupFilterParams {
    pub fn matches(&self, group: &InvoiceGroup) -> bool {
        if let Some(status) = &self.status {
            if group.status.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(needle) = &self.client_name {
            let needle = needle.to_lowercase();
            let hit = group
                .client_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(currency) = &self.currency {
            if group.currency.as_deref() != Some(currency.as_str()) {
                return false;
            }
        }
        if self.invoice_date_from.is_some() || self.invoice_date_to.is_some() {
            let Some(date) = group.invoice_date else {
                return false;
            };
            if self.invoice_date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.invoice_date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }
}

/// Sort groups by a named column, falling back to `invoice_date`.
pub(crate) fn sort_groups(groups: &mut [InvoiceGroup], sort_by: &str, order: SortOrder) {
    use crate::invoice::cmp_f64;
    groups.sort_by(|a, b| {
        let ord = match sort_by {
            "due_date" => a.due_date.cmp(&b.due_date),
            "created" => a.created.cmp(&b.created),
            "modified" => a.modified.cmp(&b.modified),
            "amount" => cmp_f64(a.amount, b.amount),
            "client_name" => a.client_name.cmp(&b.client_name),
            "status" => a.status.cmp(&b.status),
            _ => a.invoice_date.cmp(&b.invoice_date),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

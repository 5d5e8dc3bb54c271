//! Invoice line items.
//!
//! Items are the one record type that is hard-deleted: removing an item
//! drops the row instead of flagging it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linguafin_core::ObjectId;

use crate::invoice::apply_fields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub uuid: ObjectId,
    pub invoice_uuid: ObjectId,
    pub item_type: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub currency: Option<String>,
    pub unit_price: Option<f64>,
    pub amount_nett: Option<f64>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub item_type: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub currency: Option<String>,
    pub unit_price: Option<f64>,
    pub amount_nett: Option<f64>,
}

impl NewInvoiceItem {
    pub fn into_item(self, invoice_uuid: ObjectId, now: DateTime<Utc>) -> InvoiceItem {
        InvoiceItem {
            uuid: ObjectId::new(),
            invoice_uuid,
            item_type: self.item_type,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            currency: self.currency,
            unit_price: self.unit_price,
            amount_nett: self.amount_nett,
            created: Some(now),
            modified: Some(now),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemUpdate {
    pub item_type: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub currency: Option<String>,
    pub unit_price: Option<f64>,
    pub amount_nett: Option<f64>,
}

impl InvoiceItemUpdate {
    pub fn apply(&self, item: &mut InvoiceItem) {
        apply_fields!(
            self,
            item,
            [item_type, source_lang, target_lang, currency, unit_price, amount_nett]
        );
    }
}

/// Listing order: by item type, then target language.
pub(crate) fn sort_items(items: &mut [InvoiceItem]) {
    items.sort_by(|a, b| {
        a.item_type
            .cmp(&b.item_type)
            .then_with(|| a.target_lang.cmp(&b.target_lang))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(item_type: &str, target_lang: &str) -> InvoiceItem {
        NewInvoiceItem {
            item_type: Some(item_type.to_string()),
            target_lang: Some(target_lang.to_string()),
            ..NewInvoiceItem::default()
        }
        .into_item(
            ObjectId::new(),
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn items_sort_by_type_then_target_language() {
        let mut rows = vec![
            item("Translation", "fr"),
            item("Proofreading", "de"),
            item("Translation", "de"),
        ];
        sort_items(&mut rows);
        let key = |i: &InvoiceItem| {
            (
                i.item_type.clone().unwrap(),
                i.target_lang.clone().unwrap(),
            )
        };
        assert_eq!(key(&rows[0]), ("Proofreading".into(), "de".into()));
        assert_eq!(key(&rows[1]), ("Translation".into(), "de".into()));
        assert_eq!(key(&rows[2]), ("Translation".into(), "fr".into()));
    }
}

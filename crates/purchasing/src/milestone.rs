//! Payment milestones attached to a purchase order.
//!
//! A milestone marks a percentage of the order value (1–100); partial
//! payments confirm progress milestone by milestone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linguafin_core::{DomainError, DomainResult, ObjectId};

use crate::order::apply_fields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoMilestone {
    pub uuid: ObjectId,
    pub po_uuid: ObjectId,
    /// Percentage of the order this milestone completes, 1–100.
    pub milestone: Option<i32>,
    pub amount: Option<f64>,
    pub confirmed: Option<bool>,
    pub date_completed: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPoMilestone {
    pub milestone: Option<i32>,
    pub amount: Option<f64>,
    pub notes: Option<String>,
}

impl NewPoMilestone {
    pub fn into_milestone(self, po_uuid: ObjectId, now: DateTime<Utc>) -> PoMilestone {
        PoMilestone {
            uuid: ObjectId::new(),
            po_uuid,
            milestone: self.milestone,
            amount: self.amount,
            confirmed: None,
            date_completed: None,
            notes: self.notes,
            created: Some(now),
            modified: Some(now),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoMilestoneUpdate {
    pub milestone: Option<i32>,
    pub amount: Option<f64>,
    pub confirmed: Option<bool>,
    pub date_completed: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl PoMilestoneUpdate {
    pub fn apply(&self, milestone: &mut PoMilestone) {
        apply_fields!(
            self,
            milestone,
            [milestone, amount, confirmed, date_completed, notes]
        );
    }
}

/// Reject percentages outside 1–100. `None` stays legal: legacy rows carry
/// milestones without a percentage.
pub(crate) fn validate_percentage(milestone: Option<i32>) -> DomainResult<()> {
    match milestone {
        Some(pct) if !(1..=100).contains(&pct) => Err(DomainError::validation(format!(
            "milestone percentage must be between 1 and 100, got {pct}"
        ))),
        _ => Ok(()),
    }
}

/// Listing order: by milestone percentage, unset percentages first.
pub(crate) fn sort_milestones(milestones: &mut [PoMilestone]) {
    milestones.sort_by(|a, b| a.milestone.cmp(&b.milestone));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(pct: Option<i32>) -> PoMilestone {
        NewPoMilestone {
            milestone: pct,
            ..NewPoMilestone::default()
        }
        .into_milestone(
            ObjectId::new(),
            Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn milestones_sort_by_percentage() {
        let mut rows = vec![at(Some(100)), at(Some(25)), at(None), at(Some(50))];
        sort_milestones(&mut rows);
        let pcts: Vec<Option<i32>> = rows.iter().map(|m| m.milestone).collect();
        assert_eq!(pcts, vec![None, Some(25), Some(50), Some(100)]);
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(validate_percentage(Some(1)).is_ok());
        assert!(validate_percentage(Some(100)).is_ok());
        assert!(validate_percentage(None).is_ok());
        assert!(validate_percentage(Some(0)).is_err());
        assert!(validate_percentage(Some(101)).is_err());
        assert!(validate_percentage(Some(-5)).is_err());
    }
}

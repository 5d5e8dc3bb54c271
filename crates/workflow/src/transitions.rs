//! The transition validator.
//!
//! Pure functions over the static graphs in [`crate::status`]. The entry
//! points take raw strings because the store carries legacy values the enums
//! do not model ("Archived" among others); the policy is to never reject a
//! value we cannot classify, only an edge we know to be disallowed.

use linguafin_core::{DomainError, DomainResult};

use crate::status::{DocumentStatus, InvoiceStatus, PurchaseOrderStatus};

/// Validate a status change for any graph-backed status type.
///
/// Decision order:
/// 1. `current == requested` — idempotent no-op, always allowed (even for
///    unrecognized tokens).
/// 2. Either side fails to parse — allowed unconditionally (backward
///    compatibility with legacy data).
/// 3. Otherwise the requested state must be a successor of the current one;
///    a rejection carries the full allowed list for diagnostics.
pub fn validate_transition<S: DocumentStatus>(current: &str, requested: &str) -> DomainResult<()> {
    if current == requested {
        return Ok(());
    }

    let (Some(cur), Some(req)) = (S::parse(current), S::parse(requested)) else {
        tracing::debug!(
            kind = %S::KIND,
            current,
            requested,
            "unrecognized status token, allowing transition"
        );
        return Ok(());
    };

    if cur.successors().contains(&req) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition {
            kind: S::KIND,
            current: current.to_string(),
            requested: requested.to_string(),
            allowed: cur.successors().iter().map(|s| s.as_str()).collect(),
        })
    }
}

/// Validate an invoice status transition.
pub fn validate_invoice_status_transition(current: &str, requested: &str) -> DomainResult<()> {
    validate_transition::<InvoiceStatus>(current, requested)
}

/// Validate a purchase order status transition.
pub fn validate_po_status_transition(current: &str, requested: &str) -> DomainResult<()> {
    validate_transition::<PurchaseOrderStatus>(current, requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguafin_core::DocumentKind;
    use proptest::prelude::*;

    #[test]
    fn invoice_draft_to_pending_is_allowed() {
        validate_invoice_status_transition("Draft", "Pending").unwrap();
    }

    #[test]
    fn invoice_pending_to_sent_is_allowed() {
        validate_invoice_status_transition("Pending", "Sent").unwrap();
    }

    #[test]
    fn invoice_sent_to_paid_is_allowed() {
        validate_invoice_status_transition("Sent", "Paid").unwrap();
    }

    #[test]
    fn invoice_draft_cannot_jump_to_paid() {
        let err = validate_invoice_status_transition("Draft", "Paid").unwrap_err();
        match err {
            DomainError::InvalidTransition {
                kind,
                current,
                requested,
                allowed,
            } => {
                assert_eq!(kind, DocumentKind::Invoice);
                assert_eq!(current, "Draft");
                assert_eq!(requested, "Paid");
                assert_eq!(allowed, vec!["Pending", "Sent", "Cancelled"]);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn invoice_cancelled_is_terminal() {
        let err = validate_invoice_status_transition("Cancelled", "Paid").unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn same_status_is_a_no_op_even_when_unrecognized() {
        validate_invoice_status_transition("Draft", "Draft").unwrap();
        validate_invoice_status_transition("Archived", "Archived").unwrap();
        validate_po_status_transition("Paid", "Paid").unwrap();
    }

    #[test]
    fn unrecognized_current_status_is_allowed_through() {
        // Legacy records carry values outside the enum; never reject those.
        validate_invoice_status_transition("Archived", "Draft").unwrap();
        validate_invoice_status_transition("Legacy Import", "Paid").unwrap();
        validate_po_status_transition("Archived", "Pending").unwrap();
    }

    #[test]
    fn unrecognized_requested_status_is_allowed_through() {
        // "Approved" is not a modeled invoice state, so approval rides the
        // permissive branch rather than the graph.
        validate_invoice_status_transition("Draft", "Approved").unwrap();
        validate_invoice_status_transition("Sent", "Archived").unwrap();
    }

    #[test]
    fn po_pending_to_accepted_is_allowed() {
        validate_po_status_transition("Pending", "Accepted").unwrap();
    }

    #[test]
    fn po_accepted_to_in_progress_is_allowed() {
        validate_po_status_transition("Accepted", "In Progress").unwrap();
    }

    #[test]
    fn po_completed_to_approved_is_allowed() {
        validate_po_status_transition("Completed", "Approved").unwrap();
    }

    #[test]
    fn po_cannot_skip_from_pending_to_paid() {
        let err = validate_po_status_transition("Pending", "Paid").unwrap_err();
        match err {
            DomainError::InvalidTransition { allowed, .. } => {
                assert_eq!(allowed, vec!["Accepted", "Declined", "Cancelled"]);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn po_paid_is_terminal() {
        let err = validate_po_status_transition("Paid", "Approved").unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn po_disputed_can_reenter_approval() {
        validate_po_status_transition("Disputed", "Approved").unwrap();
        validate_po_status_transition("Disputed", "Cancelled").unwrap();
        assert!(validate_po_status_transition("Disputed", "Paid").is_err());
    }

    fn invoice_status() -> impl Strategy<Value = InvoiceStatus> {
        proptest::sample::select(InvoiceStatus::ALL.to_vec())
    }

    fn po_status() -> impl Strategy<Value = PurchaseOrderStatus> {
        proptest::sample::select(PurchaseOrderStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn every_status_is_reflexively_allowed(token in "\\PC{0,24}") {
            prop_assert!(validate_invoice_status_transition(&token, &token).is_ok());
            prop_assert!(validate_po_status_transition(&token, &token).is_ok());
        }

        #[test]
        fn unrecognized_current_never_rejects(requested in invoice_status()) {
            // "Archived" parses for neither document type.
            prop_assert!(
                validate_invoice_status_transition("Archived", requested.as_str()).is_ok()
            );
        }

        #[test]
        fn terminal_invoice_states_reject_every_other_state(
            current in invoice_status(),
            requested in invoice_status(),
        ) {
            prop_assume!(current.is_terminal());
            prop_assume!(current != requested);
            prop_assert!(
                validate_invoice_status_transition(current.as_str(), requested.as_str()).is_err()
            );
        }

        #[test]
        fn terminal_po_states_reject_every_other_state(
            current in po_status(),
            requested in po_status(),
        ) {
            prop_assume!(current.is_terminal());
            prop_assume!(current != requested);
            prop_assert!(
                validate_po_status_transition(current.as_str(), requested.as_str()).is_err()
            );
        }

        #[test]
        fn allowed_edges_match_the_successor_table(
            current in po_status(),
            requested in po_status(),
        ) {
            let outcome = validate_po_status_transition(current.as_str(), requested.as_str());
            let expected = current == requested || current.successors().contains(&requested);
            prop_assert_eq!(outcome.is_ok(), expected);
        }
    }
}

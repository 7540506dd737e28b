//! Cross-document reconciler: agreement checks between a commercial invoice
//! and its packing list. Every check emits exactly one result; when a side
//! is missing the data, the check fails with a "cannot verify" message
//! rather than silently passing or disappearing from the report.

use shared_types::DocumentFieldSet;

use crate::config::EngineConfig;
use crate::fuzzy::identity_match;
use crate::rules::{Evaluation, FailureKind, Outcome};

// TODO: revisit whether item_count_match should tolerate an off-by-one for
// packaging-count vs line-item-count ambiguity once calibrated against
// real shipment samples. Strict equality for now.

/// Evaluate all cross-document checks, in fixed declaration order.
pub fn evaluate_cross(
    invoice: &DocumentFieldSet,
    packing_list: &DocumentFieldSet,
    config: &EngineConfig,
) -> Vec<Evaluation> {
    vec![
        Evaluation::new("item_count_match", item_count_match(invoice, packing_list)),
        Evaluation::new(
            "invoice_number_match",
            invoice_number_match(invoice, packing_list),
        ),
        Evaluation::new(
            "shipper_consistency",
            party_consistency(invoice, packing_list, "shipper_name", "shipper", config),
        ),
        Evaluation::new(
            "consignee_consistency",
            party_consistency(invoice, packing_list, "consignee_name", "consignee", config),
        ),
    ]
}

/// Number of cross-document checks; pairs with the single-document catalog
/// for report completeness checks.
pub const CROSS_CHECK_COUNT: usize = 4;

fn cannot_verify(what: &str, field_label: &str, invoice_has: bool, packing_has: bool) -> Outcome {
    let missing_side = match (invoice_has, packing_has) {
        (false, false) => "both documents are missing",
        (false, true) => "invoice is missing",
        (true, false) => "packing list is missing",
        (true, true) => unreachable!("cannot_verify called with both sides present"),
    };
    Outcome::fail(
        FailureKind::MissingField,
        format!("cannot verify {}: {} {}", what, missing_side, field_label),
    )
}

fn item_count_match(invoice: &DocumentFieldSet, packing_list: &DocumentFieldSet) -> Outcome {
    let invoice_count = invoice.get("item_count").and_then(|f| f.as_count());
    let packing_count = packing_list.get("item_count").and_then(|f| f.as_count());

    match (invoice_count, packing_count) {
        (Some(a), Some(b)) if a == b => Outcome::Pass,
        (Some(a), Some(b)) => Outcome::fail(
            FailureKind::CrossDocumentMismatch,
            format!("item count mismatch: invoice={}, packing list={}", a, b),
        ),
        (a, b) => cannot_verify("item counts", "item count", a.is_some(), b.is_some()),
    }
}

fn invoice_number_match(invoice: &DocumentFieldSet, packing_list: &DocumentFieldSet) -> Outcome {
    let invoice_number = invoice.get("invoice_number").and_then(|f| f.as_text());
    let packing_number = packing_list.get("invoice_number").and_then(|f| f.as_text());

    match (invoice_number, packing_number) {
        (Some(a), Some(b)) if a.to_lowercase() == b.to_lowercase() => Outcome::Pass,
        (Some(a), Some(b)) => Outcome::fail(
            FailureKind::CrossDocumentMismatch,
            format!(
                "invoice number mismatch: invoice=\"{}\", packing list=\"{}\"",
                a, b
            ),
        ),
        (a, b) => cannot_verify(
            "invoice numbers",
            "invoice number",
            a.is_some(),
            b.is_some(),
        ),
    }
}

fn party_consistency(
    invoice: &DocumentFieldSet,
    packing_list: &DocumentFieldSet,
    field_name: &str,
    party_label: &str,
    config: &EngineConfig,
) -> Outcome {
    let invoice_name = invoice.get(field_name).and_then(|f| f.as_text());
    let packing_name = packing_list.get(field_name).and_then(|f| f.as_text());

    match (invoice_name, packing_name) {
        (Some(a), Some(b)) => {
            if identity_match(a, b, config.token_overlap_threshold) {
                Outcome::Pass
            } else {
                Outcome::fail(
                    FailureKind::CrossDocumentMismatch,
                    format!(
                        "{} name inconsistent between documents: invoice=\"{}\", packing list=\"{}\"",
                        party_label, a, b
                    ),
                )
            }
        }
        (a, b) => cannot_verify(
            &format!("{} consistency", party_label),
            &format!("{} name", party_label),
            a.is_some(),
            b.is_some(),
        ),
    }
}

//! Fix-instruction deriver: maps each failed validation to one actionable
//! instruction line, in validation order. Instruction text here is the
//! engine's English template output; bilingual display phrasing belongs to
//! the report renderer, which keys off the same field names.

use crate::rules::{Evaluation, FailureKind};

fn instruction_for(field_name: &str, kind: FailureKind) -> &'static str {
    match (field_name, kind) {
        ("hs_code", _) => "Add a 6-10 digit HS code to both the invoice and packing list",

        ("invoice_value", FailureKind::FormatViolation) => {
            "State the currency of the invoice value with an ISO code (e.g. USD 10,000)"
        }
        ("invoice_value", _) => "Fill in the total invoice value with its currency (e.g. USD 10,000)",

        ("invoice_date", FailureKind::UnparsableValue) => {
            "Rewrite the invoice date in a standard format (e.g. 2024-01-15)"
        }
        ("invoice_date", _) => "Fill in the invoice date",

        ("document_date", FailureKind::UnparsableValue) => {
            "Rewrite the packing list date in a standard format (e.g. 2024-01-15)"
        }
        ("document_date", _) => "Fill in the packing list date",

        ("product_description", _) => {
            "Provide a more detailed product description; avoid generic terms such as \"goods\" or \"products\""
        }

        ("item_count", _) => "Add the total item count to the packing list",

        ("shipper_name", _) => "Fill in the complete shipper (exporter) name",
        ("shipper_address", _) => {
            "Fill in the complete shipper address, including city, country and postal code"
        }
        ("consignee_name", _) => "Fill in the complete consignee (importer) name",
        ("consignee_address", _) => {
            "Fill in the complete consignee address, including city, country and postal code"
        }

        ("item_count_match", FailureKind::CrossDocumentMismatch) => {
            "Check that the invoice and packing list carry the same item count"
        }
        ("item_count_match", _) => {
            "Add the item count to the document that is missing it so the totals can be verified"
        }

        ("invoice_number_match", FailureKind::CrossDocumentMismatch) => {
            "Use the same invoice number on both documents"
        }
        ("invoice_number_match", _) => "Add the invoice number to the document that is missing it",

        ("shipper_consistency", FailureKind::CrossDocumentMismatch) => {
            "Align the shipper name so both documents name the same exporter"
        }
        ("shipper_consistency", _) => "Add the shipper name to the document that is missing it",

        ("consignee_consistency", FailureKind::CrossDocumentMismatch) => {
            "Align the consignee name so both documents name the same importer"
        }
        ("consignee_consistency", _) => "Add the consignee name to the document that is missing it",

        // New rules must add a template above; this keeps the
        // one-instruction-per-failure property intact in the meantime.
        _ => "Review and correct this field",
    }
}

/// One instruction line per failed evaluation, in input order. Passing
/// results emit nothing. Cross-document mismatches carry the concrete
/// discrepancy so the operator sees both observed values.
pub fn derive(evaluations: &[Evaluation]) -> Vec<String> {
    evaluations
        .iter()
        .filter(|e| !e.passed)
        .map(|e| {
            let kind = e.kind.unwrap_or(FailureKind::MissingField);
            let instruction = instruction_for(&e.field_name, kind);
            match (&e.message, kind) {
                (Some(message), FailureKind::CrossDocumentMismatch) => {
                    format!("• {}: {} ({})", e.field_name, instruction, message)
                }
                _ => format!("• {}: {}", e.field_name, instruction),
            }
        })
        .collect()
}

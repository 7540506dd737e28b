//! Export-compliance validation for commercial invoice / packing list
//! pairs. Operates purely on already-extracted field data: single-document
//! rules run per document, cross-document checks reconcile the pair, and
//! every failure maps to one actionable fix instruction.

pub mod config;
pub mod fixes;
pub mod fuzzy;
pub mod normalize;
pub mod patterns;
pub mod reconcile;
pub mod rules;

use shared_types::{
    ComplianceReport, DocumentFieldSet, DocumentType, EngineError, ExtractedField, OverallStatus,
};
use tracing::debug;

use crate::config::EngineConfig;
use crate::rules::Evaluation;

/// ComplianceEngine entry point. Holds only read-only configuration, so a
/// single instance can serve concurrent callers without locking.
pub struct ComplianceEngine {
    config: EngineConfig,
}

impl ComplianceEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalize extractor output into a document field set (adapter entry
    /// point for callers that hold raw extraction results).
    pub fn normalize_document(
        &self,
        document_type: DocumentType,
        extracted: &[ExtractedField],
    ) -> DocumentFieldSet {
        normalize::normalize_document(document_type, extracted, &self.config)
    }

    /// Run the single-document rules applicable to one document.
    pub fn evaluate_single(&self, fields: &DocumentFieldSet) -> Vec<shared_types::ValidationResult> {
        rules::evaluate_single(fields, &self.config)
            .iter()
            .map(Evaluation::to_result)
            .collect()
    }

    /// Run the cross-document agreement checks on a pair.
    pub fn evaluate_cross(
        &self,
        invoice: &DocumentFieldSet,
        packing_list: &DocumentFieldSet,
    ) -> Vec<shared_types::ValidationResult> {
        reconcile::evaluate_cross(invoice, packing_list, &self.config)
            .iter()
            .map(Evaluation::to_result)
            .collect()
    }

    fn expect_type(fields: &DocumentFieldSet, expected: DocumentType) -> Result<(), EngineError> {
        if fields.document_type == expected {
            Ok(())
        } else {
            Err(EngineError::DocumentTypeMismatch {
                expected,
                actual: fields.document_type,
            })
        }
    }

    /// Validate an invoice / packing list pair and assemble the full
    /// compliance report. Rule failures never abort the run; the only error
    /// is a structurally invalid input (mis-tagged document), rejected
    /// before evaluation so reports are always complete.
    pub fn build_report(
        &self,
        document_id: &str,
        invoice: &DocumentFieldSet,
        packing_list: &DocumentFieldSet,
    ) -> Result<ComplianceReport, EngineError> {
        Self::expect_type(invoice, DocumentType::Invoice)?;
        Self::expect_type(packing_list, DocumentType::PackingList)?;

        let mut evaluations = rules::evaluate_single(invoice, &self.config);
        evaluations.extend(rules::evaluate_single(packing_list, &self.config));
        evaluations.extend(reconcile::evaluate_cross(
            invoice,
            packing_list,
            &self.config,
        ));

        let failed = evaluations.iter().filter(|e| !e.passed).count();
        debug!(
            document_id,
            total = evaluations.len(),
            failed,
            "compliance evaluation finished"
        );

        let overall_status = if failed == 0 {
            OverallStatus::Pass
        } else {
            OverallStatus::Fail
        };
        let fix_instructions = fixes::derive(&evaluations);

        Ok(ComplianceReport {
            document_id: document_id.to_string(),
            overall_status,
            validations: evaluations.iter().map(Evaluation::to_result).collect(),
            fix_instructions,
        })
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const FIELD_NAMES: &[&str] = &[
        "hs_code",
        "invoice_value",
        "invoice_date",
        "shipper_name",
        "shipper_address",
        "consignee_name",
        "consignee_address",
        "product_description",
        "document_date",
        "item_count",
        "invoice_number",
        "invoice_no",
        "date",
        "_document_type",
        "completely_unknown",
    ];

    fn arbitrary_fields() -> impl Strategy<Value = Vec<ExtractedField>> {
        proptest::collection::vec(
            (proptest::sample::select(FIELD_NAMES), "\\PC{0,40}"),
            0..12,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(name, value)| ExtractedField::new(name, value, 0.5))
                .collect()
        })
    }

    proptest! {
        /// The normalizer never panics, whatever the extractor produces.
        #[test]
        fn normalizer_never_panics(fields in arbitrary_fields()) {
            let engine = ComplianceEngine::new();
            let _ = engine.normalize_document(DocumentType::Invoice, &fields);
            let _ = engine.normalize_document(DocumentType::PackingList, &fields);
        }

        /// Every report carries all 18 checks, a status consistent with
        /// them, and exactly one fix instruction per failure.
        #[test]
        fn reports_are_complete_and_consistent(
            invoice_fields in arbitrary_fields(),
            packing_fields in arbitrary_fields(),
        ) {
            let engine = ComplianceEngine::new();
            let invoice = engine.normalize_document(DocumentType::Invoice, &invoice_fields);
            let packing = engine.normalize_document(DocumentType::PackingList, &packing_fields);

            let report = engine.build_report("prop-doc", &invoice, &packing).unwrap();

            let expected_total = rules::applicable_rule_count(DocumentType::Invoice)
                + rules::applicable_rule_count(DocumentType::PackingList)
                + reconcile::CROSS_CHECK_COUNT;
            prop_assert_eq!(expected_total, 18);
            prop_assert_eq!(report.validations.len(), expected_total);

            let failed = report.validations.iter().filter(|v| !v.passed).count();
            let expected_status = if failed == 0 { OverallStatus::Pass } else { OverallStatus::Fail };
            prop_assert_eq!(report.overall_status, expected_status);
            prop_assert_eq!(report.fix_instructions.len(), failed);

            // Failures always explain themselves; passes carry no message.
            for validation in &report.validations {
                prop_assert_eq!(validation.passed, validation.error_message.is_none());
            }
        }
    }
}

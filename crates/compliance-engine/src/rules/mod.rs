//! Single-document rule engine.
//!
//! The catalog is a declarative table of `(field, applicability, predicate)`
//! entries evaluated in declaration order; that order is the report order,
//! so reports stay reproducible. Every applicable rule yields exactly one
//! outcome; missing data is a failure, never an omission.

pub mod format;
pub mod identity;

use shared_types::{DocumentFieldSet, DocumentType, ValidationResult};

use crate::config::EngineConfig;

/// Why a check failed. Not serialized; used to pick fix-instruction
/// variants (e.g. "fill in the date" vs "correct the date format").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No value was extracted at all.
    MissingField,
    /// A value was extracted but failed normalization.
    UnparsableValue,
    /// The value normalized but violates a rule predicate.
    FormatViolation,
    /// Both documents carry the value but they disagree.
    CrossDocumentMismatch,
}

/// Result of one predicate run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail { kind: FailureKind, message: String },
}

impl Outcome {
    pub fn fail(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Fail {
            kind,
            message: message.into(),
        }
    }
}

/// One evaluated check, carrying the failure kind alongside the wire-shaped
/// result so the fix-instruction deriver can pick variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub field_name: String,
    pub passed: bool,
    pub kind: Option<FailureKind>,
    pub message: Option<String>,
}

impl Evaluation {
    pub fn new(field_name: &str, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass => Self {
                field_name: field_name.to_string(),
                passed: true,
                kind: None,
                message: None,
            },
            Outcome::Fail { kind, message } => Self {
                field_name: field_name.to_string(),
                passed: false,
                kind: Some(kind),
                message: Some(message),
            },
        }
    }

    pub fn to_result(&self) -> ValidationResult {
        ValidationResult {
            field_name: self.field_name.clone(),
            passed: self.passed,
            error_message: self.message.clone(),
        }
    }
}

/// Which documents a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    InvoiceOnly,
    PackingListOnly,
    BothDocuments,
}

impl Applicability {
    pub fn applies_to(self, document_type: DocumentType) -> bool {
        match self {
            Applicability::InvoiceOnly => document_type == DocumentType::Invoice,
            Applicability::PackingListOnly => document_type == DocumentType::PackingList,
            Applicability::BothDocuments => true,
        }
    }
}

pub type Predicate = fn(&DocumentFieldSet, &EngineConfig) -> Outcome;

/// A single-document validation rule. Pure function of one field set.
pub struct Rule {
    pub field: &'static str,
    pub applicability: Applicability,
    pub predicate: Predicate,
}

/// The active rule set. Declaration order is report order.
pub const CATALOG: &[Rule] = &[
    Rule {
        field: "hs_code",
        applicability: Applicability::InvoiceOnly,
        predicate: format::hs_code,
    },
    Rule {
        field: "invoice_value",
        applicability: Applicability::InvoiceOnly,
        predicate: format::invoice_value,
    },
    Rule {
        field: "invoice_date",
        applicability: Applicability::InvoiceOnly,
        predicate: format::invoice_date,
    },
    Rule {
        field: "product_description",
        applicability: Applicability::InvoiceOnly,
        predicate: identity::product_description,
    },
    Rule {
        field: "document_date",
        applicability: Applicability::PackingListOnly,
        predicate: format::document_date,
    },
    Rule {
        field: "item_count",
        applicability: Applicability::PackingListOnly,
        predicate: format::item_count,
    },
    Rule {
        field: "shipper_name",
        applicability: Applicability::BothDocuments,
        predicate: identity::shipper_name,
    },
    Rule {
        field: "shipper_address",
        applicability: Applicability::BothDocuments,
        predicate: identity::shipper_address,
    },
    Rule {
        field: "consignee_name",
        applicability: Applicability::BothDocuments,
        predicate: identity::consignee_name,
    },
    Rule {
        field: "consignee_address",
        applicability: Applicability::BothDocuments,
        predicate: identity::consignee_address,
    },
];

/// Number of catalog rules applicable to a document type. Report
/// completeness checks hang off this.
pub fn applicable_rule_count(document_type: DocumentType) -> usize {
    CATALOG
        .iter()
        .filter(|r| r.applicability.applies_to(document_type))
        .count()
}

/// Evaluate every applicable single-document rule, in catalog order.
pub fn evaluate_single(fields: &DocumentFieldSet, config: &EngineConfig) -> Vec<Evaluation> {
    CATALOG
        .iter()
        .filter(|rule| rule.applicability.applies_to(fields.document_type))
        .map(|rule| Evaluation::new(rule.field, (rule.predicate)(fields, config)))
        .collect()
}

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// Raw field as produced by the upstream extraction adapter (OCR/LLM).
/// Immutable input to the engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractedField {
    pub name: String,
    pub raw_value: Option<String>,
    /// Extractor confidence in [0, 1].
    pub confidence: f64,
}

impl ExtractedField {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            raw_value: Some(raw_value.into()),
            confidence,
        }
    }
}

/// Canonical, comparable form of an extracted value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedValue {
    /// Trimmed text with internal whitespace runs collapsed. Original
    /// casing is retained; comparisons case-fold at the comparison site.
    Text(String),
    /// Monetary amount with the currency resolved from a symbol or ISO code
    /// when one was found.
    Money { amount: f64, currency: Option<String> },
    Date(NaiveDate),
    Count(u64),
}

/// Output of the field normalizer. `present` is false when the raw value
/// was null, empty, or failed to parse under its type hint.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedField {
    pub name: String,
    pub value: Option<NormalizedValue>,
    pub present: bool,
    /// Trimmed raw value, kept so rules can distinguish "nothing extracted"
    /// from "extracted but unparsable". `None` when the extractor produced
    /// nothing or only whitespace.
    pub raw_value: Option<String>,
}

impl NormalizedField {
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            present: false,
            raw_value: None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Some(NormalizedValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match &self.value {
            Some(NormalizedValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match &self.value {
            Some(NormalizedValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn as_money(&self) -> Option<(f64, Option<&str>)> {
        match &self.value {
            Some(NormalizedValue::Money { amount, currency }) => {
                Some((*amount, currency.as_deref()))
            }
            _ => None,
        }
    }
}

/// Trade document kinds the engine reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    PackingList,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Invoice => write!(f, "invoice"),
            DocumentType::PackingList => write!(f, "packing_list"),
        }
    }
}

/// One document's worth of normalized fields. Owned by the pipeline
/// invocation; nothing here persists between calls.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocumentFieldSet {
    pub document_type: DocumentType,
    /// BTreeMap keeps iteration and serialization order deterministic.
    pub fields: BTreeMap<String, NormalizedField>,
}

impl DocumentFieldSet {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NormalizedField> {
        self.fields.get(name)
    }
}

/// Outcome of one rule evaluation. Wire shape is fixed: the report renderer
/// maps `field_name` to display strings, so names here must not change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    pub field_name: String,
    pub passed: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Fail,
}

/// Full compliance report for one invoice / packing list pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceReport {
    pub document_id: String,
    pub overall_status: OverallStatus,
    /// Fixed rule-declaration order: invoice single-document results,
    /// packing-list single-document results, cross-document results.
    pub validations: Vec<ValidationResult>,
    /// One entry per failed validation, in validation order.
    pub fix_instructions: Vec<String>,
}

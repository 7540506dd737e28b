pub mod error;
pub mod types;

pub use error::EngineError;
pub use types::{
    ComplianceReport, DocumentFieldSet, DocumentType, ExtractedField, NormalizedField,
    NormalizedValue, OverallStatus, ValidationResult,
};

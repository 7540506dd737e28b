use thiserror::Error;

use crate::types::DocumentType;

/// Fatal engine errors. Rule failures are never errors; they surface as
/// failed `ValidationResult` entries so the report stays complete. The only
/// fatal condition is a structurally invalid input, which is rejected
/// before any evaluation starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A field set arrived with the wrong document-type tag (e.g. a packing
    /// list passed in the invoice position).
    #[error("document type mismatch: expected {expected}, got {actual}")]
    DocumentTypeMismatch {
        expected: DocumentType,
        actual: DocumentType,
    },
}

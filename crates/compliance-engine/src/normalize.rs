//! Field normalizer: canonicalizes raw extracted values into comparable
//! forms. Normalization never fails loudly: malformed input yields
//! `present = false` so every missing/invalid case funnels through the rule
//! engine's single reporting path.

use shared_types::{DocumentFieldSet, DocumentType, ExtractedField, NormalizedField, NormalizedValue};

use crate::config::EngineConfig;
use crate::patterns::{collapse_whitespace, parse_count, parse_date, parse_money};

/// How a raw value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Text,
    Money,
    Date,
    Integer,
}

/// The fixed field vocabulary the engine understands, with each field's
/// type hint. Extractor output outside this list is ignored.
pub const FIELD_VOCABULARY: &[(&str, TypeHint)] = &[
    ("hs_code", TypeHint::Text),
    ("invoice_value", TypeHint::Money),
    ("invoice_date", TypeHint::Date),
    ("shipper_name", TypeHint::Text),
    ("shipper_address", TypeHint::Text),
    ("consignee_name", TypeHint::Text),
    ("consignee_address", TypeHint::Text),
    ("product_description", TypeHint::Text),
    ("document_date", TypeHint::Date),
    ("item_count", TypeHint::Integer),
    ("invoice_number", TypeHint::Text),
];

/// Legacy extractor names mapped onto the vocabulary.
fn canonical_name(name: &str) -> &str {
    match name {
        "invoice_no" => "invoice_number",
        "date" => "document_date",
        other => other,
    }
}

fn hint_for(name: &str) -> Option<TypeHint> {
    FIELD_VOCABULARY
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, hint)| *hint)
}

/// Normalize one extracted field under a type hint. Empty or unparsable
/// input produces `present = false`; the trimmed raw value is retained so
/// rules can distinguish "nothing extracted" from "failed to parse".
pub fn normalize(raw: &ExtractedField, hint: TypeHint, config: &EngineConfig) -> NormalizedField {
    let trimmed = raw
        .raw_value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let Some(text) = trimmed else {
        return NormalizedField::absent(raw.name.clone());
    };

    let value = match hint {
        TypeHint::Text => {
            let collapsed = collapse_whitespace(text);
            if collapsed.is_empty() {
                None
            } else {
                Some(NormalizedValue::Text(collapsed))
            }
        }
        TypeHint::Money => {
            parse_money(text).map(|(amount, currency)| NormalizedValue::Money { amount, currency })
        }
        TypeHint::Date => parse_date(text, config.date_locale).map(NormalizedValue::Date),
        TypeHint::Integer => parse_count(text).map(NormalizedValue::Count),
    };

    NormalizedField {
        name: raw.name.clone(),
        present: value.is_some(),
        value,
        raw_value: Some(text.to_string()),
    }
}

/// Build a document's normalized field set from extractor output. Unknown
/// field names are dropped; known fields that the extractor never emitted
/// are simply absent from the map, which the rule engine reports as
/// missing (never skips).
pub fn normalize_document(
    document_type: DocumentType,
    extracted: &[ExtractedField],
    config: &EngineConfig,
) -> DocumentFieldSet {
    let mut set = DocumentFieldSet::new(document_type);

    for raw in extracted {
        let name = canonical_name(&raw.name);
        let Some(hint) = hint_for(name) else {
            continue;
        };
        let renamed = ExtractedField {
            name: name.to_string(),
            raw_value: raw.raw_value.clone(),
            confidence: raw.confidence,
        };
        set.fields.insert(name.to_string(), normalize(&renamed, hint, config));
    }

    set
}

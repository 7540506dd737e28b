//! Identity and description rules: party names, addresses, product
//! description specificity.

use shared_types::DocumentFieldSet;

use crate::config::EngineConfig;
use crate::rules::{FailureKind, Outcome};

/// Names must be more than 2 characters after normalization; addresses must
/// be more than 10 to plausibly hold street, city and country.
const MIN_NAME_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 10;

/// A description needs more than this many word tokens to be specific
/// enough for customs review.
const MIN_DESCRIPTION_TOKENS: usize = 2;

fn min_length_rule(
    fields: &DocumentFieldSet,
    field_name: &str,
    min_chars: usize,
    message: &str,
) -> Outcome {
    let Some(field) = fields.get(field_name) else {
        return Outcome::fail(FailureKind::MissingField, message);
    };
    match field.as_text() {
        None => Outcome::fail(FailureKind::MissingField, message),
        Some(text) if text.chars().count() > min_chars => Outcome::Pass,
        Some(_) => Outcome::fail(FailureKind::FormatViolation, message),
    }
}

pub fn shipper_name(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    min_length_rule(fields, "shipper_name", MIN_NAME_CHARS, "Shipper name incomplete")
}

pub fn consignee_name(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    min_length_rule(
        fields,
        "consignee_name",
        MIN_NAME_CHARS,
        "Consignee name incomplete",
    )
}

pub fn shipper_address(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    min_length_rule(
        fields,
        "shipper_address",
        MIN_ADDRESS_CHARS,
        "Shipper address incomplete",
    )
}

pub fn consignee_address(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    min_length_rule(
        fields,
        "consignee_address",
        MIN_ADDRESS_CHARS,
        "Consignee address incomplete",
    )
}

/// Product description: present, not a block-listed generic term, and more
/// than two word tokens.
pub fn product_description(fields: &DocumentFieldSet, config: &EngineConfig) -> Outcome {
    let text = fields.get("product_description").and_then(|f| f.as_text());
    let Some(text) = text else {
        return Outcome::fail(FailureKind::MissingField, "Product description missing");
    };

    if config.is_vague_term(text) {
        return Outcome::fail(
            FailureKind::FormatViolation,
            format!("Product description too vague (\"{}\")", text),
        );
    }

    if text.split_whitespace().count() <= MIN_DESCRIPTION_TOKENS {
        return Outcome::fail(
            FailureKind::FormatViolation,
            "Product description too short to identify the goods",
        );
    }

    Outcome::Pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{DocumentType, ExtractedField};

    use crate::normalize::normalize_document;

    fn invoice(pairs: &[(&str, &str)]) -> DocumentFieldSet {
        let extracted: Vec<ExtractedField> = pairs
            .iter()
            .map(|(name, value)| ExtractedField::new(*name, *value, 0.9))
            .collect();
        normalize_document(DocumentType::Invoice, &extracted, &EngineConfig::default())
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_short_names_fail() {
        let fields = invoice(&[("shipper_name", "AB")]);
        assert_eq!(
            shipper_name(&fields, &config()),
            Outcome::fail(FailureKind::FormatViolation, "Shipper name incomplete")
        );

        let ok = invoice(&[("shipper_name", "ABC Trading Co., Ltd.")]);
        assert_eq!(shipper_name(&ok, &config()), Outcome::Pass);
    }

    #[test]
    fn test_missing_name_is_missing_kind() {
        let fields = invoice(&[]);
        assert_eq!(
            consignee_name(&fields, &config()),
            Outcome::fail(FailureKind::MissingField, "Consignee name incomplete")
        );
    }

    #[test]
    fn test_address_length_boundary() {
        // "Main St" is 7 characters: under the 10-character floor.
        let short = invoice(&[("consignee_address", "Main St")]);
        assert!(matches!(
            consignee_address(&short, &config()),
            Outcome::Fail { .. }
        ));

        let full = invoice(&[("consignee_address", "123 Main Street, Springfield")]);
        assert_eq!(consignee_address(&full, &config()), Outcome::Pass);
    }

    #[test]
    fn test_vague_description_blocked() {
        let vague = invoice(&[("product_description", "Goods")]);
        let outcome = product_description(&vague, &config());
        match outcome {
            Outcome::Fail { kind, message } => {
                assert_eq!(kind, FailureKind::FormatViolation);
                assert!(message.contains("too vague"));
            }
            Outcome::Pass => panic!("block-listed term passed"),
        }
    }

    #[test]
    fn test_two_token_description_too_short() {
        let short = invoice(&[("product_description", "Cotton T-Shirts")]);
        assert!(matches!(
            product_description(&short, &config()),
            Outcome::Fail {
                kind: FailureKind::FormatViolation,
                ..
            }
        ));

        let specific = invoice(&[("product_description", "100% Cotton Knitted T-Shirts")]);
        assert_eq!(product_description(&specific, &config()), Outcome::Pass);
    }

    #[test]
    fn test_missing_description() {
        let fields = invoice(&[]);
        assert_eq!(
            product_description(&fields, &config()),
            Outcome::fail(FailureKind::MissingField, "Product description missing")
        );
    }
}

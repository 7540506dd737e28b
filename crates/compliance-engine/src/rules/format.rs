//! Format rules: HS code, invoice value, dates, item count.

use shared_types::DocumentFieldSet;

use crate::config::EngineConfig;
use crate::patterns::{digits_only, HS_CODE};
use crate::rules::{FailureKind, Outcome};

const HS_CODE_MESSAGE: &str = "HS code missing or invalid (must be 6-10 digits)";

/// HS code: digits-only projection of the raw value must be 6-10 digits.
pub fn hs_code(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    let raw = fields.get("hs_code").and_then(|f| f.raw_value.as_deref());
    let Some(raw) = raw else {
        return Outcome::fail(FailureKind::MissingField, HS_CODE_MESSAGE);
    };

    if HS_CODE.is_match(&digits_only(raw)) {
        Outcome::Pass
    } else {
        Outcome::fail(FailureKind::FormatViolation, HS_CODE_MESSAGE)
    }
}

/// Invoice value: numeric amount with a resolved currency.
pub fn invoice_value(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    let Some(field) = fields.get("invoice_value") else {
        return Outcome::fail(FailureKind::MissingField, "Total invoice value missing");
    };
    if field.raw_value.is_none() {
        return Outcome::fail(FailureKind::MissingField, "Total invoice value missing");
    }

    match field.as_money() {
        None => Outcome::fail(
            FailureKind::UnparsableValue,
            "Total invoice value has no numeric amount",
        ),
        Some((_, None)) => Outcome::fail(
            FailureKind::FormatViolation,
            "Invoice value currency unresolved (state an ISO code, e.g. USD 10,000)",
        ),
        Some((_, Some(_))) => Outcome::Pass,
    }
}

fn date_rule(
    fields: &DocumentFieldSet,
    field_name: &str,
    missing_message: &str,
    unparsable_message: &str,
) -> Outcome {
    let Some(field) = fields.get(field_name) else {
        return Outcome::fail(FailureKind::MissingField, missing_message);
    };
    match (&field.raw_value, field.as_date()) {
        (None, _) => Outcome::fail(FailureKind::MissingField, missing_message),
        (Some(_), None) => Outcome::fail(FailureKind::UnparsableValue, unparsable_message),
        (Some(_), Some(_)) => Outcome::Pass,
    }
}

pub fn invoice_date(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    date_rule(
        fields,
        "invoice_date",
        "Missing required date",
        "Invoice date is not a valid date",
    )
}

pub fn document_date(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    date_rule(
        fields,
        "document_date",
        "Missing document date",
        "Document date is not a valid date",
    )
}

/// Packing list item count: present, numeric, greater than zero.
pub fn item_count(fields: &DocumentFieldSet, _config: &EngineConfig) -> Outcome {
    let Some(field) = fields.get("item_count") else {
        return Outcome::fail(FailureKind::MissingField, "Packing list is missing item count");
    };
    if field.raw_value.is_none() {
        return Outcome::fail(FailureKind::MissingField, "Packing list is missing item count");
    }

    match field.as_count() {
        None => Outcome::fail(
            FailureKind::UnparsableValue,
            "Packing list item count is not a number",
        ),
        Some(0) => Outcome::fail(
            FailureKind::FormatViolation,
            "Packing list item count must be greater than zero",
        ),
        Some(_) => Outcome::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{DocumentType, ExtractedField};

    use crate::normalize::normalize_document;

    fn doc(document_type: DocumentType, pairs: &[(&str, &str)]) -> DocumentFieldSet {
        let extracted: Vec<ExtractedField> = pairs
            .iter()
            .map(|(name, value)| ExtractedField::new(*name, *value, 0.9))
            .collect();
        normalize_document(document_type, &extracted, &EngineConfig::default())
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_hs_code_accepts_6_to_10_digits() {
        let fields = doc(DocumentType::Invoice, &[("hs_code", "84713000")]);
        assert_eq!(hs_code(&fields, &config()), Outcome::Pass);

        let dotted = doc(DocumentType::Invoice, &[("hs_code", "8471.30.00")]);
        assert_eq!(hs_code(&dotted, &config()), Outcome::Pass);
    }

    #[test]
    fn test_hs_code_rejects_short_codes() {
        let fields = doc(DocumentType::Invoice, &[("hs_code", "847")]);
        let outcome = hs_code(&fields, &config());
        assert_eq!(
            outcome,
            Outcome::fail(FailureKind::FormatViolation, HS_CODE_MESSAGE)
        );
    }

    #[test]
    fn test_hs_code_missing_is_distinct_kind() {
        let fields = doc(DocumentType::Invoice, &[]);
        assert_eq!(
            hs_code(&fields, &config()),
            Outcome::fail(FailureKind::MissingField, HS_CODE_MESSAGE)
        );
    }

    #[test]
    fn test_invoice_value_requires_currency() {
        let with_currency = doc(DocumentType::Invoice, &[("invoice_value", "USD 10,000")]);
        assert_eq!(invoice_value(&with_currency, &config()), Outcome::Pass);

        let bare_number = doc(DocumentType::Invoice, &[("invoice_value", "10,000")]);
        assert!(matches!(
            invoice_value(&bare_number, &config()),
            Outcome::Fail {
                kind: FailureKind::FormatViolation,
                ..
            }
        ));
    }

    #[test]
    fn test_invoice_value_absent_vs_non_numeric() {
        let absent = doc(DocumentType::Invoice, &[]);
        assert!(matches!(
            invoice_value(&absent, &config()),
            Outcome::Fail {
                kind: FailureKind::MissingField,
                ..
            }
        ));

        let non_numeric = doc(DocumentType::Invoice, &[("invoice_value", "to be confirmed")]);
        assert!(matches!(
            invoice_value(&non_numeric, &config()),
            Outcome::Fail {
                kind: FailureKind::UnparsableValue,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_invoice_date_is_missing_not_unparsable() {
        let fields = doc(DocumentType::Invoice, &[("invoice_date", "")]);
        assert_eq!(
            invoice_date(&fields, &config()),
            Outcome::fail(FailureKind::MissingField, "Missing required date")
        );
    }

    #[test]
    fn test_unparsable_invoice_date() {
        let fields = doc(DocumentType::Invoice, &[("invoice_date", "mid January")]);
        assert_eq!(
            invoice_date(&fields, &config()),
            Outcome::fail(
                FailureKind::UnparsableValue,
                "Invoice date is not a valid date"
            )
        );
    }

    #[test]
    fn test_valid_dates_pass() {
        let invoice = doc(DocumentType::Invoice, &[("invoice_date", "2024-01-15")]);
        assert_eq!(invoice_date(&invoice, &config()), Outcome::Pass);

        let packing = doc(DocumentType::PackingList, &[("document_date", "15/01/2024")]);
        assert_eq!(document_date(&packing, &config()), Outcome::Pass);
    }

    #[test]
    fn test_item_count_rules() {
        let ok = doc(DocumentType::PackingList, &[("item_count", "12 cartons")]);
        assert_eq!(item_count(&ok, &config()), Outcome::Pass);

        let zero = doc(DocumentType::PackingList, &[("item_count", "0")]);
        assert!(matches!(
            item_count(&zero, &config()),
            Outcome::Fail {
                kind: FailureKind::FormatViolation,
                ..
            }
        ));

        let missing = doc(DocumentType::PackingList, &[]);
        assert!(matches!(
            item_count(&missing, &config()),
            Outcome::Fail {
                kind: FailureKind::MissingField,
                ..
            }
        ));
    }
}

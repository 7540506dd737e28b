//! Engine configuration.
//!
//! Tunables that need calibration against real document samples live here
//! as named values, never inline in rule logic.

/// Minimum token-set overlap (Jaccard) for two party names to be considered
/// the same entity. Calibrated so that abbreviation and suffix differences
/// ("ABC Trading Co., Ltd." vs "ABC Trading Company") pass while genuinely
/// different parties fail.
pub const DEFAULT_TOKEN_OVERLAP_THRESHOLD: f64 = 0.6;

/// Product descriptions that are too generic to clear customs review.
/// Seed list only; acceptable specificity varies by product category, so
/// callers can extend or replace it via [`EngineConfig`].
pub const DEFAULT_VAGUE_TERMS: &[&str] =
    &["goods", "products", "items", "stuff", "merchandise", "cargo"];

/// Disambiguation order for numeric dates like `04/05/2024` when the input
/// is not ISO. ISO (`2024-05-04`) always wins when it parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLocale {
    /// Day-month-year, the common ordering on export paperwork.
    #[default]
    DayFirst,
    /// Month-day-year (US-style documents).
    MonthFirst,
}

/// Read-only configuration for one engine instance. Cloneable and cheap;
/// the engine holds no other state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub token_overlap_threshold: f64,
    pub vague_terms: Vec<String>,
    pub date_locale: DateLocale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            token_overlap_threshold: DEFAULT_TOKEN_OVERLAP_THRESHOLD,
            vague_terms: DEFAULT_VAGUE_TERMS.iter().map(|t| t.to_string()).collect(),
            date_locale: DateLocale::default(),
        }
    }
}

impl EngineConfig {
    /// Case-insensitive block-list check for a whole description string.
    pub fn is_vague_term(&self, description: &str) -> bool {
        let folded = description.trim().to_lowercase();
        self.vague_terms.iter().any(|t| t.to_lowercase() == folded)
    }
}

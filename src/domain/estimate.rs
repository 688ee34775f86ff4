/// Duration estimates parsed from free-text item annotations.
///
/// Brain-dump items carry estimates like `"~15 min"` or `"~1 hour"`. Rather
/// than threading those strings through the engine, they are parsed once into
/// a closed type with an explicit millisecond mapping.

/// Fallback when an item has no estimate or an unparseable one
pub const DEFAULT_ESTIMATE_MS: i64 = 15 * 60_000;

/// Unit of a parsed estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateUnit {
    Minutes,
    Hours,
}

impl EstimateUnit {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "hour" | "hours" | "hr" | "hrs" => Some(Self::Hours),
            _ => None,
        }
    }

    /// Milliseconds per one unit
    fn millis(&self) -> i64 {
        match self {
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
        }
    }
}

/// A parsed duration estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub amount: i64,
    pub unit: EstimateUnit,
}

impl Estimate {
    /// Parse an estimate of the form `~<integer> <unit>` (the tilde is
    /// optional). Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.trim().split_whitespace();
        let amount_word = words.next()?.trim_start_matches('~');
        let unit_word = words.next()?;
        if words.next().is_some() {
            return None;
        }

        let amount: i64 = amount_word.parse().ok()?;
        if amount <= 0 {
            return None;
        }
        let unit = EstimateUnit::from_word(&unit_word.to_lowercase())?;
        Some(Self { amount, unit })
    }

    /// Convert to milliseconds
    pub fn as_millis(&self) -> i64 {
        self.amount * self.unit.millis()
    }
}

/// Parse an optional estimate string, falling back to 15 minutes.
///
/// This is the duration contract for ad-hoc items: unparseable input never
/// raises.
pub fn parse_duration_text(text: Option<&str>) -> i64 {
    text.and_then(Estimate::parse)
        .map(|estimate| estimate.as_millis())
        .unwrap_or(DEFAULT_ESTIMATE_MS)
}

//! Recommendation request parameters and response shape.
//!
//! Two validation paths exist. The default path is lenient: unknown
//! algorithms coerce to [`Algorithm::Hybrid`] and limits are clamped into
//! range. The strict path rejects both with
//! [`CoreError::InvalidAlgorithm`] / [`CoreError::InvalidLimit`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::ScoredRecipe;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ALGORITHM_PREFERENCE: &str = "preference";
pub const ALGORITHM_TIME_DECAY: &str = "time_decay";
pub const ALGORITHM_HYBRID: &str = "hybrid";

/// All accepted algorithm names.
pub const VALID_ALGORITHMS: &[&str] =
    &[ALGORITHM_PREFERENCE, ALGORITHM_TIME_DECAY, ALGORITHM_HYBRID];

/// Limit applied when the caller gives none, or a non-positive one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on the number of recommendations per request.
pub const MAX_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Scoring formula selected for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Preference,
    TimeDecay,
    #[default]
    Hybrid,
}

impl Algorithm {
    /// Lenient parse: absent, empty, and unknown values all yield `Hybrid`.
    pub fn coerce(value: Option<&str>) -> Self {
        value
            .and_then(|v| Self::from_str_value(v.trim()).ok())
            .unwrap_or_default()
    }

    /// Strict parse: absent or empty yields `Hybrid`, unknown values fail.
    pub fn parse_strict(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(v) => Self::from_str_value(v),
        }
    }

    /// Convert from the wire / database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            ALGORITHM_PREFERENCE => Ok(Self::Preference),
            ALGORITHM_TIME_DECAY => Ok(Self::TimeDecay),
            ALGORITHM_HYBRID => Ok(Self::Hybrid),
            other => Err(CoreError::InvalidAlgorithm(other.to_string())),
        }
    }

    /// Convert to the wire / database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preference => ALGORITHM_PREFERENCE,
            Self::TimeDecay => ALGORITHM_TIME_DECAY,
            Self::Hybrid => ALGORITHM_HYBRID,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Lenient limit: absent or `<= 0` gives [`DEFAULT_LIMIT`], anything above
/// [`MAX_LIMIT`] is capped.
pub fn clamp_limit(limit: Option<i64>) -> usize {
    let limit = match limit {
        Some(l) if l > 0 => l.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    };
    limit as usize
}

/// Lenient parse of a raw `?limit=` value. Unparseable input is treated as
/// absent.
pub fn parse_limit_lenient(raw: Option<&str>) -> usize {
    clamp_limit(raw.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Strict parse of a raw `?limit=` value: absent or empty gives
/// [`DEFAULT_LIMIT`]; anything that is not an integer in `1..=MAX_LIMIT`
/// fails.
pub fn parse_limit_strict(raw: Option<&str>) -> Result<usize, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_LIMIT as usize),
        Some(s) => match s.parse::<i64>() {
            Ok(l) if (1..=MAX_LIMIT).contains(&l) => Ok(l as usize),
            _ => Err(CoreError::InvalidLimit(s.to_string())),
        },
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Payload returned by `GET /recommendations`.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recipes: Vec<ScoredRecipe>,
    pub algorithm: Algorithm,
    pub generated_at: Timestamp,
    /// Number of candidate recipes scored before truncation to the limit.
    pub total_scored: usize,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- Algorithm --------------------------------------------------------------

    #[test]
    fn coerce_known_values() {
        assert_eq!(Algorithm::coerce(Some("preference")), Algorithm::Preference);
        assert_eq!(Algorithm::coerce(Some("time_decay")), Algorithm::TimeDecay);
        assert_eq!(Algorithm::coerce(Some("hybrid")), Algorithm::Hybrid);
    }

    #[test]
    fn coerce_unknown_empty_and_absent_to_hybrid() {
        assert_eq!(Algorithm::coerce(None), Algorithm::Hybrid);
        assert_eq!(Algorithm::coerce(Some("")), Algorithm::Hybrid);
        assert_eq!(Algorithm::coerce(Some("collaborative")), Algorithm::Hybrid);
        assert_eq!(Algorithm::coerce(Some("PREFERENCE")), Algorithm::Hybrid);
    }

    #[test]
    fn strict_rejects_unknown() {
        assert_matches!(
            Algorithm::parse_strict(Some("random")),
            Err(CoreError::InvalidAlgorithm(ref s)) if s == "random"
        );
        assert_eq!(Algorithm::parse_strict(None).unwrap(), Algorithm::Hybrid);
        assert_eq!(Algorithm::parse_strict(Some("")).unwrap(), Algorithm::Hybrid);
        assert_eq!(
            Algorithm::parse_strict(Some("time_decay")).unwrap(),
            Algorithm::TimeDecay
        );
    }

    #[test]
    fn as_str_round_trips_every_variant() {
        for name in VALID_ALGORITHMS {
            assert_eq!(Algorithm::from_str_value(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_value(Algorithm::TimeDecay).unwrap();
        assert_eq!(json, "time_decay");
    }

    // -- Limits -----------------------------------------------------------------

    #[test]
    fn clamp_limit_defaults_and_caps() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 10);
        assert_eq!(clamp_limit(Some(-5)), 10);
        assert_eq!(clamp_limit(Some(1)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(51)), 50);
        assert_eq!(clamp_limit(Some(i64::MAX)), 50);
    }

    #[test]
    fn lenient_parse_treats_garbage_as_absent() {
        assert_eq!(parse_limit_lenient(None), 10);
        assert_eq!(parse_limit_lenient(Some("")), 10);
        assert_eq!(parse_limit_lenient(Some("abc")), 10);
        assert_eq!(parse_limit_lenient(Some(" 7 ")), 7);
        assert_eq!(parse_limit_lenient(Some("-3")), 10);
        assert_eq!(parse_limit_lenient(Some("500")), 50);
    }

    #[test]
    fn strict_parse_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_limit_strict(None).unwrap(), 10);
        assert_eq!(parse_limit_strict(Some("")).unwrap(), 10);
        assert_eq!(parse_limit_strict(Some("25")).unwrap(), 25);
        assert_matches!(
            parse_limit_strict(Some("0")),
            Err(CoreError::InvalidLimit(ref s)) if s == "0"
        );
        assert_matches!(parse_limit_strict(Some("51")), Err(CoreError::InvalidLimit(_)));
        assert_matches!(parse_limit_strict(Some("ten")), Err(CoreError::InvalidLimit(_)));
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("score out of range: {raw}")]
pub struct ScoreError {
    raw: f64,
}

/// Validation score in the range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    /// # Errors
    ///
    /// Returns `ScoreError` if `value` is above 100.
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > Self::MAX {
            return Err(ScoreError {
                raw: f64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Accepts fractional scores from the wire, rounded to the nearest integer.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` for NaN or values outside 0..=100.
    pub fn from_f64(raw: f64) -> Result<Self, ScoreError> {
        if !raw.is_finite() {
            return Err(ScoreError { raw });
        }
        let rounded = raw.round();
        if !(0.0..=f64::from(Self::MAX)).contains(&rounded) {
            return Err(ScoreError { raw });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(rounded as u8))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Score::from_f64(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scoring result for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub score: Score,
    /// Short free-text summary.
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub tip: String,
}

impl Feedback {
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.score.value() >= crate::model::PASSING_SCORE
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::StudyMode;
use crate::time::Clock;

/// Stable key correlating an answer, its feedback and its hint visibility.
///
/// Derived from the question's category tag, the mode it is shown in and its
/// position in that mode's list. The text form is `{category}_{MODE}_{index}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId {
    category: String,
    mode: StudyMode,
    index: usize,
}

impl QuestionId {
    #[must_use]
    pub fn new(category: impl Into<String>, mode: StudyMode, index: usize) -> Self {
        Self {
            category: category.into(),
            mode,
            index,
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn belongs_to(&self, mode: StudyMode) -> bool {
        self.mode == mode
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.category, self.mode.as_str(), self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid question id: {raw}")]
pub struct ParseQuestionIdError {
    raw: String,
}

impl FromStr for QuestionId {
    type Err = ParseQuestionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseQuestionIdError { raw: s.to_string() };

        let (head, index) = s.rsplit_once('_').ok_or_else(err)?;
        let index = index.parse::<usize>().map_err(|_| err())?;

        // Mode names contain underscores, so match them as suffixes.
        StudyMode::ALL
            .into_iter()
            .find_map(|mode| {
                head.strip_suffix(mode.as_str())
                    .and_then(|rest| rest.strip_suffix('_'))
                    .map(|category| Self::new(category, mode, index))
            })
            .ok_or_else(err)
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub const SESSION_KEY_PREFIX: &str = "brainifi_session_";

/// Storage key a session snapshot is written under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// A fresh key for this launch, derived from the clock in epoch milliseconds.
    #[must_use]
    pub fn per_launch(clock: &Clock) -> Self {
        Self::named(&clock.now().timestamp_millis().to_string())
    }

    /// A key that survives restarts.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self(format!("{SESSION_KEY_PREFIX}{name}"))
    }

    /// Wrap a full key as read back from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.strip_prefix(SESSION_KEY_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

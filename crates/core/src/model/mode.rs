use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four fixed learning strategies a question set is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyMode {
    QuickReview,
    DeepStudy,
    Revision,
    TestPrep,
}

/// Display metadata for a study mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeMeta {
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// Letter bound to Ctrl/Cmd for switching straight into this mode.
    pub shortcut: char,
    /// Number of passing answers that marks the mode as complete.
    pub target_questions: u32,
}

static MODE_META: [ModeMeta; 4] = [
    ModeMeta {
        title: "Quick Review",
        icon: "🎯",
        description: "Quick hits to test your knowledge. Perfect for a confidence boost!",
        shortcut: 'q',
        target_questions: 3,
    },
    ModeMeta {
        title: "Deep Study",
        icon: "📚",
        description: "Time to dig deep and really master this stuff. You've got this!",
        shortcut: 'd',
        target_questions: 5,
    },
    ModeMeta {
        title: "Revision",
        icon: "🔄",
        description: "Let's make sure everything's sticking. Think of it as a knowledge check-up!",
        shortcut: 'r',
        target_questions: 5,
    },
    ModeMeta {
        title: "Test Prep",
        icon: "📝",
        description: "Game time! Get ready to ace that exam with real test conditions.",
        shortcut: 't',
        target_questions: 5,
    },
];

impl StudyMode {
    /// All modes in display order.
    pub const ALL: [StudyMode; 4] = [
        StudyMode::QuickReview,
        StudyMode::DeepStudy,
        StudyMode::Revision,
        StudyMode::TestPrep,
    ];

    const fn index(self) -> usize {
        match self {
            StudyMode::QuickReview => 0,
            StudyMode::DeepStudy => 1,
            StudyMode::Revision => 2,
            StudyMode::TestPrep => 3,
        }
    }

    /// Wire name, e.g. `QUICK_REVIEW`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StudyMode::QuickReview => "QUICK_REVIEW",
            StudyMode::DeepStudy => "DEEP_STUDY",
            StudyMode::Revision => "REVISION",
            StudyMode::TestPrep => "TEST_PREP",
        }
    }

    #[must_use]
    pub fn meta(self) -> &'static ModeMeta {
        &MODE_META[self.index()]
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        self.meta().title
    }

    /// Look up the mode bound to a shortcut letter (case-insensitive).
    #[must_use]
    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|mode| mode.meta().shortcut == key)
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown study mode: {raw}")]
pub struct ParseStudyModeError {
    raw: String,
}

impl FromStr for StudyMode {
    type Err = ParseStudyModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseStudyModeError { raw: s.to_string() })
    }
}

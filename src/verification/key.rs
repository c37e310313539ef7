//! Typed cache key derivation.
//!
//! Keys render as `"<kind>_<subject>"` (or the bare subject for surfaces
//! keyed by subject alone). No [`CheckKind`] label contains `_`, so the first
//! underscore always separates kind from subject and two different
//! `(kind, subject)` pairs never render to the same string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters of free text used as a subject.
pub const TEXT_SUBJECT_CHARS: usize = 20;

/// Kind of check a verdict answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Article or blog post originality.
    Article,
    /// Repository code originality.
    Code,
    /// Free-text originality.
    Text,
    /// Current weather for a city.
    Weather,
    /// Cryptocurrency price.
    Crypto,
    /// News sentiment for a topic.
    Sentiment,
    /// GitHub pull request merged.
    Pr,
    /// GitHub issue closed.
    Issue,
    /// Webpage contains required text.
    Webpage,
}

impl CheckKind {
    /// All kinds.
    pub const ALL: [Self; 9] = [
        Self::Article,
        Self::Code,
        Self::Text,
        Self::Weather,
        Self::Crypto,
        Self::Sentiment,
        Self::Pr,
        Self::Issue,
        Self::Webpage,
    ];

    /// Label used as the key prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Code => "code",
            Self::Text => "text",
            Self::Weather => "weather",
            Self::Crypto => "crypto",
            Self::Sentiment => "sentiment",
            Self::Pr => "pr",
            Self::Issue => "issue",
            Self::Webpage => "webpage",
        }
    }

    /// Look a kind up by its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key a verdict is cached under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Kind-prefixed subject.
    Tagged {
        /// Kind of check.
        kind: CheckKind,
        /// Caller-supplied subject.
        subject: String,
    },
    /// Bare subject.
    Subject(String),
}

impl CacheKey {
    /// Key for `subject` checked as `kind`.
    #[must_use]
    pub fn tagged(kind: CheckKind, subject: impl Into<String>) -> Self {
        Self::Tagged {
            kind,
            subject: subject.into(),
        }
    }

    /// Key for free text: the subject is its first [`TEXT_SUBJECT_CHARS`] characters.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::tagged(
            CheckKind::Text,
            text.chars().take(TEXT_SUBJECT_CHARS).collect::<String>(),
        )
    }

    /// Key made of the subject alone.
    #[must_use]
    pub fn subject(subject: impl Into<String>) -> Self {
        Self::Subject(subject.into())
    }

    /// Parse a rendered kind-prefixed key.
    #[must_use]
    pub fn parse_tagged(raw: &str) -> Option<Self> {
        let (label, subject) = raw.split_once('_')?;
        CheckKind::from_label(label).map(|kind| Self::tagged(kind, subject))
    }

    /// Kind of check, if the key is tagged.
    #[must_use]
    pub const fn kind(&self) -> Option<CheckKind> {
        match self {
            Self::Tagged { kind, .. } => Some(*kind),
            Self::Subject(_) => None,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged { kind, subject } => write!(f, "{kind}_{subject}"),
            Self::Subject(subject) => f.write_str(subject),
        }
    }
}

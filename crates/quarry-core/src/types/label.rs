//! Binary class label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ground-truth label of an example.
///
/// Labels are always known in the experimental setting, but the label of a
/// reservoir example is withheld from training until the example is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Both labels, negative first.
    pub const ALL: [Label; 2] = [Label::Negative, Label::Positive];

    /// Parse the numeric form used by corpora (`0` or `1`).
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Negative),
            1 => Some(Self::Positive),
            _ => None,
        }
    }

    /// Parse a textual label: `0`/`1`, `neg`/`pos`, `negative`/`positive`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "neg" | "negative" => Some(Self::Negative),
            "1" | "pos" | "positive" => Some(Self::Positive),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    /// Target value used by the loss (0.0 or 1.0).
    pub fn target(self) -> f64 {
        f64::from(self.as_u8())
    }

    pub fn is_positive(self) -> bool {
        self == Self::Positive
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("negative"),
            Self::Positive => f.write_str("positive"),
        }
    }
}

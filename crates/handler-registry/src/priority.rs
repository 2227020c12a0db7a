//! Dispatch priorities.
//!
//! Priorities form a fixed total order. Subscriptions at a lower priority are
//! dispatched before those at a higher one, so `Monitor` handlers always see an
//! event last, after every other handler had its chance to act on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority of a subscription within an event category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    /// Dispatched first
    Lowest,
    Low,
    /// Standard priority (default)
    #[default]
    Normal,
    High,
    Highest,
    /// Dispatched last; observers only, should not modify the event
    Monitor,
}

impl EventPriority {
    /// Number of priority levels
    pub const COUNT: usize = 6;

    /// All priorities in dispatch order
    pub const ALL: [EventPriority; Self::COUNT] = [
        Self::Lowest,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::Highest,
        Self::Monitor,
    ];

    /// Position in dispatch order, `0..COUNT`
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lowest => "lowest",
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Highest => "highest",
            Self::Monitor => "monitor",
        }
    }
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown priority name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event priority: '{0}'")]
pub struct ParsePriorityError(pub String);

impl FromStr for EventPriority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

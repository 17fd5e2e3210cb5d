//! Time-of-day bucketing for revision sessions.
//!
//! Sessions and exams are grouped into three buckets by the hour of their
//! start time: morning (before 12), afternoon (12 to 17), night (18 onward).

use chrono::{NaiveTime, Timelike};

/// One of the three display buckets for a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Night,
}

impl TimeOfDay {
    /// Classify an hour of day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 18 {
            Self::Afternoon
        } else {
            Self::Night
        }
    }

    /// Classify a time of day.
    pub fn from_time(time: NaiveTime) -> Self {
        Self::from_hour(time.hour())
    }

    /// Classify an `HH:MM` string.
    ///
    /// Input that does not parse as an hour buckets as `Night`; this never
    /// panics on malformed input.
    pub fn parse(raw: &str) -> Self {
        raw.split(':')
            .next()
            .and_then(|hour| hour.trim().parse::<u32>().ok())
            .map(Self::from_hour)
            .unwrap_or(Self::Night)
    }

    /// Heading shown above the bucket's sessions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "\u{1F304} Morning",
            Self::Afternoon => "\u{2600}\u{FE0F} Afternoon",
            Self::Night => "\u{1F319} Night",
        }
    }

    /// Border accent color for sessions in this bucket.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::Morning => "#FDE047",
            Self::Afternoon => "#FDBA74",
            Self::Night => "#A5B4FC",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Afternoon => write!(f, "afternoon"),
            Self::Night => write!(f, "night"),
        }
    }
}

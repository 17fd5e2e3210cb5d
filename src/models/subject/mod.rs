//! Subject model for tagging revision sessions and exams.
//!
//! Subjects are the user's study areas (Maths, Chemistry, ...) with an
//! associated display color drawn from a fixed palette.

use serde::{Deserialize, Serialize};

/// Color used when an event or exam references a subject that no longer
/// exists.
pub const NEUTRAL_COLOR: &str = "#6B7280";

/// Name shown for a dangling subject reference.
pub const UNKNOWN_SUBJECT: &str = "Unknown Subject";

/// The fixed palette offered when creating a subject.
pub const SUBJECT_PALETTE: [&str; 9] = [
    "#EF4444", // red
    "#F97316", // orange
    "#EAB308", // yellow
    "#22C55E", // green
    "#14B8A6", // teal
    "#3B82F6", // blue
    "#6366F1", // indigo
    "#A855F7", // purple
    "#EC4899", // pink
];

/// A study subject that revision events and exams are tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    /// Display name of the subject
    pub name: String,
    /// Hex color code for the subject (e.g., "#3B82F6")
    pub color: String,
}

impl Subject {
    /// Create a new subject with the given name and color.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: color.into(),
        }
    }

    /// Validate the subject data.
    pub fn validate(&self) -> Result<(), SubjectValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SubjectValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(SubjectValidationError::NameTooLong);
        }

        if !is_valid_hex_color(&self.color) {
            return Err(SubjectValidationError::InvalidColor);
        }

        Ok(())
    }
}

/// Validation errors for Subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectValidationError {
    EmptyName,
    NameTooLong,
    InvalidColor,
}

impl std::fmt::Display for SubjectValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Subject name cannot be empty"),
            Self::NameTooLong => write!(f, "Subject name must be 50 characters or less"),
            Self::InvalidColor => write!(f, "Invalid color format (use hex like #FF0000)"),
        }
    }
}

impl std::error::Error for SubjectValidationError {}

/// The `{name, color}` pair displayed next to an event or exam.
///
/// Reads join this from the subjects table; a dangling subject reference
/// falls back to the "Unknown Subject" sentinel instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDisplay {
    pub name: String,
    pub color: String,
}

impl SubjectDisplay {
    /// The sentinel shown for a subject reference that no longer resolves.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_SUBJECT.to_string(),
            color: NEUTRAL_COLOR.to_string(),
        }
    }

    /// Look up the display attributes for a subject id in a loaded subject
    /// list. Returns the sentinel when no subject matches.
    pub fn for_id(subject_id: i64, subjects: &[Subject]) -> Self {
        subjects
            .iter()
            .find(|s| s.id == Some(subject_id))
            .map(|s| Self {
                name: s.name.clone(),
                color: s.color.clone(),
            })
            .unwrap_or_else(Self::unknown)
    }
}

/// Check if a string is a valid hex color code.
fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    if !color.starts_with('#') {
        return false;
    }
    let hex = &color[1..];
    // Accept 3, 6, or 8 character hex codes
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_new() {
        let subject = Subject::new("Maths", "#3B82F6");
        assert_eq!(subject.name, "Maths");
        assert_eq!(subject.color, "#3B82F6");
        assert!(subject.id.is_none());
    }

    #[test]
    fn test_validate_valid_subject() {
        let subject = Subject::new("Chemistry", "#22C55E");
        assert!(subject.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let subject = Subject::new("", "#3B82F6");
        assert_eq!(subject.validate(), Err(SubjectValidationError::EmptyName));
    }

    #[test]
    fn test_validate_whitespace_name() {
        let subject = Subject::new("   ", "#3B82F6");
        assert_eq!(subject.validate(), Err(SubjectValidationError::EmptyName));
    }

    #[test]
    fn test_validate_name_too_long() {
        let subject = Subject::new("a".repeat(51), "#3B82F6");
        assert_eq!(subject.validate(), Err(SubjectValidationError::NameTooLong));
    }

    #[test]
    fn test_validate_invalid_color_no_hash() {
        let subject = Subject::new("Maths", "3B82F6");
        assert_eq!(subject.validate(), Err(SubjectValidationError::InvalidColor));
    }

    #[test]
    fn test_validate_invalid_color_non_hex() {
        let subject = Subject::new("Maths", "#GGGGGG");
        assert_eq!(subject.validate(), Err(SubjectValidationError::InvalidColor));
    }

    #[test]
    fn test_palette_colors_are_valid() {
        for color in SUBJECT_PALETTE {
            assert!(is_valid_hex_color(color), "{} should be valid", color);
        }
        assert!(is_valid_hex_color(NEUTRAL_COLOR));
    }

    #[test]
    fn test_display_for_known_subject() {
        let subjects = vec![
            Subject {
                id: Some(1),
                name: "Maths".to_string(),
                color: "#EF4444".to_string(),
            },
            Subject {
                id: Some(2),
                name: "Physics".to_string(),
                color: "#3B82F6".to_string(),
            },
        ];

        let display = SubjectDisplay::for_id(2, &subjects);
        assert_eq!(display.name, "Physics");
        assert_eq!(display.color, "#3B82F6");
    }

    #[test]
    fn test_display_for_dangling_subject() {
        let subjects = vec![Subject {
            id: Some(1),
            name: "Maths".to_string(),
            color: "#EF4444".to_string(),
        }];

        let display = SubjectDisplay::for_id(99, &subjects);
        assert_eq!(display.name, UNKNOWN_SUBJECT);
        assert_eq!(display.color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_display_for_empty_subject_list() {
        let display = SubjectDisplay::for_id(1, &[]);
        assert_eq!(display, SubjectDisplay::unknown());
    }

    #[test]
    fn test_is_valid_hex_color() {
        assert!(is_valid_hex_color("#FFF"));
        assert!(is_valid_hex_color("#FFFFFF"));
        assert!(is_valid_hex_color("#FF0000FF"));
        assert!(is_valid_hex_color("#AbCdEf"));

        assert!(!is_valid_hex_color("FFF"));
        assert!(!is_valid_hex_color("#FFFF"));
        assert!(!is_valid_hex_color("#GGG"));
        assert!(!is_valid_hex_color(""));
    }
}

use serde::{Deserialize, Serialize};

/// One row of the portal's grade listing.
///
/// Every field is kept exactly as the portal renders it (trimmed), so a grade
/// like `"5.0"` or a date like `"2024-01-10"` is never parsed. `grade` and
/// `date` may be empty when the portal shows an in-progress entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradeRecord {
    subject: String,
    subject_type: String,
    grade: String,
    date: String,
}

impl GradeRecord {
    pub fn new(
        subject: impl Into<String>,
        subject_type: impl Into<String>,
        grade: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            subject_type: subject_type.into(),
            grade: grade.into(),
            date: date.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn subject_type(&self) -> &str {
        &self.subject_type
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Placeholder rows without a grade are never stored or announced.
    #[inline]
    #[must_use]
    pub fn is_graded(&self) -> bool {
        !self.grade.is_empty()
    }
}

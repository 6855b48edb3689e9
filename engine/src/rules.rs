//! Answer grading.

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Correct => "Correct",
            Verdict::Incorrect => "Incorrect",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Exact, case-sensitive comparison. Submitted answers are not trimmed
/// or normalized: "Paris" does not match "paris".
pub fn judge(expected: &str, submitted: &str) -> Verdict {
    if expected == submitted {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

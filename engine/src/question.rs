use serde::{Deserialize, Serialize};

/// Optional type tag for a question. All kinds are currently graded the
/// same way (exact text match); the tag exists so bank files can carry it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    FreeText,
    TrueFalse,
    MultipleChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Never serialized: clients must not see the answer before submitting.
    #[serde(skip_serializing)]
    pub answer: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<QuestionKind>,
}

use serde::Serialize;

/// One of the two seats in a duel. Lives and dies with its duel.
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub score: u32,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), score: 0 }
    }

    /// Scores only ever go up, by one point per correct answer.
    pub fn award_point(&mut self) {
        self.score += 1;
    }
}

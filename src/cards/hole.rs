use super::card::Card;
use serde::Deserialize;
use serde::Serialize;

/// A member's two private cards.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hole([Card; 2]);

impl Hole {
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        Self([a, b])
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}

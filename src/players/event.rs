use crate::Chips;
use crate::cards::Card;
use crate::cards::Hole;
use crate::players::Decision;

/// Notable changes a node reports to its local player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Someone entered the lobby.
    Joined(String),
    /// The leader closed registration.
    Started,
    /// A referee was chosen for the next round.
    Referee(String),
    /// This node's private cards.
    Hole(Hole),
    /// Newly revealed board cards.
    Board(Vec<Card>),
    /// A player's accepted decision.
    Decision(String, Decision),
    /// The round was settled.
    Settled { winners: Vec<(String, Chips)>, pot: Chips },
    /// A member was evicted as unreachable.
    Failed(String),
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Joined(name) => write!(f, "new player in lobby: {}", name),
            Event::Started => write!(f, "the leader is looking for a referee"),
            Event::Referee(name) => write!(f, "new referee is {}", name),
            Event::Hole(hole) => write!(f, "your cards: {}", hole),
            Event::Board(cards) => write!(
                f,
                "board: {}",
                cards
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            Event::Decision(name, decision) => write!(f, "{}: {}", name, decision),
            Event::Settled { winners, pot } => write!(
                f,
                "pot {} to {}",
                pot,
                winners
                    .iter()
                    .map(|(name, chips)| format!("{} (+{})", name, chips))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Event::Failed(name) => write!(f, "{} is unreachable and left the table", name),
        }
    }
}

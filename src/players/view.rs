use crate::Chips;
use crate::cards::Card;
use crate::cards::Hole;
use crate::phase::Phase;

/// What a member can see when asked for a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub phase: Phase,
    pub hole: Option<Hole>,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub bet: Chips,
    pub balance: Chips,
}

impl View {
    /// `check` is only accepted while nobody has bet this round.
    pub fn can_check(&self) -> bool {
        self.bet == 0
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let hole = self.hole.map(|h| h.to_string()).unwrap_or_else(|| "??".into());
        let board = self
            .board
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{} | hole {} | board [{}] | pot {} | to beat {} | balance {}",
            self.phase, hole, board, self.pot, self.bet, self.balance
        )
    }
}

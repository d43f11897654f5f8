use super::card::Card;
use super::hole::Hole;
use rand::seq::SliceRandom;

/// A freshly shuffled 52-card deck. Cards leave the deck as they are drawn,
/// so nothing repeats within the round that owns it.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        let mut cards = (0..52u8).map(Card::from).collect::<Vec<_>>();
        cards.shuffle(&mut rand::rng());
        Self(cards)
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    /// remove two cards from the deck
    /// to deal as a Hole
    pub fn hole(&mut self) -> Option<Hole> {
        let a = self.draw()?;
        let b = self.draw()?;
        Some(Hole::from((a, b)))
    }
    /// Draws `n` board cards, all or nothing.
    pub fn deal(&mut self, n: usize) -> Option<Vec<Card>> {
        match self.size() >= n {
            true => (0..n).map(|_| self.draw()).collect(),
            false => None,
        }
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        self.draw()
    }
}

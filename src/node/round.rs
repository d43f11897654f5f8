use crate::Chips;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Evaluator;
use crate::cards::Hole;
use crate::error::Error;
use crate::error::Result;
use crate::players::Decision;
use std::collections::BTreeMap;
use std::collections::VecDeque;

/// Referee-only bookkeeping for one round, from dealing to showdown.
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    hands: BTreeMap<String, Hole>,
    board: Vec<Card>,
    pot: Chips,
    bet: Chips,
    active: Vec<String>,
    stakes: BTreeMap<String, Chips>,
}

/// How the pot leaves the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub winners: Vec<(String, Chips)>,
    pub pot: Chips,
}

impl Round {
    /// A fresh round among `players`, in table order.
    pub fn new(players: Vec<String>) -> Self {
        Self {
            deck: Deck::new(),
            hands: BTreeMap::new(),
            board: Vec::new(),
            pot: 0,
            bet: 0,
            active: players,
            stakes: BTreeMap::new(),
        }
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn bet(&self) -> Chips {
        self.bet
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn active(&self) -> &[String] {
        &self.active
    }
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|p| p == name)
    }

    /// Two cards for every active player.
    pub fn deal(&mut self) -> Result<Vec<(String, Hole)>> {
        let mut dealt = Vec::with_capacity(self.active.len());
        for name in self.active.iter() {
            let hole = self.deck.hole().ok_or(Error::Exhausted)?;
            self.hands.insert(name.clone(), hole);
            dealt.push((name.clone(), hole));
        }
        Ok(dealt)
    }

    /// Draws `n` board cards.
    pub fn reveal(&mut self, n: usize) -> Result<Vec<Card>> {
        let cards = self.deck.deal(n).ok_or(Error::Exhausted)?;
        self.board.extend(cards.iter().copied());
        Ok(cards)
    }

    /// Opens a betting round: nobody has bet yet.
    pub fn open(&mut self) {
        self.bet = 0;
    }

    /// Parses an answer and checks it against the standing bet.
    pub fn admit(&self, answer: &str) -> Result<Decision> {
        match Decision::try_from(answer)? {
            Decision::Check if self.bet > 0 => Err(Error::Usage(format!(
                "cannot check while a bet of {} stands, bet or pass",
                self.bet
            ))),
            decision => Ok(decision),
        }
    }

    /// Records an accepted decision. The chips were already debited.
    pub fn apply(&mut self, player: &str, decision: Decision) {
        match decision {
            Decision::Pass => {
                self.fold(player);
            }
            Decision::Check => {}
            Decision::Bet(n) => {
                self.pot += n;
                self.bet = self.bet.max(n);
                *self.stakes.entry(player.to_string()).or_default() += n;
            }
        }
    }

    /// Drops a player from contention. Their stake stays in the pot.
    pub fn fold(&mut self, player: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|p| p != player);
        before != self.active.len()
    }

    /// Best score among active players holding cards takes the pot. Ties
    /// split it, the odd chips going one each to the earliest tied players.
    /// With nobody eligible every contributor gets their stake back.
    pub fn settle(&self, evaluator: &dyn Evaluator) -> Settlement {
        let scores = self
            .active
            .iter()
            .filter_map(|name| self.hands.get(name).map(|hole| (name, hole)))
            .map(|(name, hole)| (name, evaluator.evaluate(hole.cards(), &self.board)))
            .collect::<Vec<_>>();
        let winners = match scores.iter().map(|(_, score)| *score).max() {
            None => self
                .stakes
                .iter()
                .filter(|(_, stake)| **stake > 0)
                .map(|(name, stake)| (name.clone(), *stake))
                .collect(),
            Some(best) => {
                let tied = scores
                    .iter()
                    .filter(|(_, score)| *score == best)
                    .map(|(name, _)| (*name).clone())
                    .collect::<Vec<_>>();
                split(&tied, self.pot)
            }
        };
        Settlement {
            winners,
            pot: self.pot,
        }
    }
}

/// Even shares of `amount`, the odd chips one each to the earliest names.
fn split(names: &[String], amount: Chips) -> Vec<(String, Chips)> {
    let n = names.len() as Chips;
    if n == 0 {
        return Vec::new();
    }
    let share = amount / n;
    let odd = (amount % n) as usize;
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), share + if i < odd { 1 } else { 0 }))
        .collect()
}

/// Pays a settlement out one credit at a time. A winner that vanishes
/// before being credited leaves its share to the winners still owed, or
/// to those already paid when nobody is left to pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    owed: VecDeque<(String, Chips)>,
    paid: Vec<(String, Chips)>,
    forfeited: Chips,
}

impl Payout {
    pub fn new(settlement: Settlement) -> Self {
        Self {
            owed: settlement.winners.into(),
            paid: Vec::new(),
            forfeited: 0,
        }
    }
    /// The next credit to make.
    pub fn next(&mut self) -> Option<(String, Chips)> {
        self.owed.pop_front()
    }
    pub fn paid(&mut self, name: String, amount: Chips) {
        match self.paid.iter_mut().find(|(p, _)| *p == name) {
            Some((_, total)) => *total += amount,
            None => self.paid.push((name, amount)),
        }
    }
    /// The winner of `amount` could not be credited.
    pub fn vanished(&mut self, amount: Chips) {
        let mut heirs = Vec::<String>::new();
        for (name, _) in self.owed.iter().chain(self.paid.iter()) {
            if !heirs.contains(name) {
                heirs.push(name.clone());
            }
        }
        let heirs = match self.owed.is_empty() {
            true => heirs,
            false => heirs
                .into_iter()
                .filter(|name| self.owed.iter().any(|(p, _)| p == name))
                .collect(),
        };
        match heirs.is_empty() {
            true => self.forfeited += amount,
            false => self.owed.extend(
                split(&heirs, amount)
                    .into_iter()
                    .filter(|(_, share)| *share > 0),
            ),
        }
    }
    /// Chips nobody was left to receive.
    pub fn forfeited(&self) -> Chips {
        self.forfeited
    }
    pub fn into_paid(self) -> Vec<(String, Chips)> {
        self.paid
    }
}

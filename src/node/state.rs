use super::*;
use crate::Chips;
use crate::Config;
use crate::cards::Card;
use crate::cards::Hole;
use crate::error::Result;
use crate::peer::Directory;
use crate::peer::Peer;
use crate::phase::Phase;
use crate::players::View;
use crate::rpc::Status;
use std::collections::BTreeMap;

/// Everything a node knows, behind one lock. Every transition checks the
/// phase and mutates in the same critical section.
#[derive(Debug)]
pub struct State {
    pub phase: Phase,
    pub directory: Directory,
    /// Name of the member refereeing the current or last round.
    pub referee: Option<String>,
    /// Set by `grant_referee`, cleared once the round is concluded.
    pub refereeing: bool,
    pub balance: Chips,
    /// Believed balances of every member, from announcements.
    pub ledger: BTreeMap<String, Chips>,
    pub hole: Option<Hole>,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub bet: Chips,
    pub round: Option<Round>,
    starting: Chips,
}

impl State {
    pub fn new(me: Peer, config: &Config) -> Self {
        let mut ledger = BTreeMap::new();
        ledger.insert(me.name().to_string(), config.balance);
        Self {
            phase: Phase::Registering,
            directory: Directory::new(config.topology, me),
            referee: None,
            refereeing: false,
            balance: config.balance,
            ledger,
            hole: None,
            board: Vec::new(),
            pot: 0,
            bet: 0,
            round: None,
            starting: config.balance,
        }
    }

    /// Guards `op`, then moves to the next phase.
    pub fn advance(&mut self, op: &str, allowed: &[Phase]) -> Result<Phase> {
        self.phase.require(op, allowed)?;
        self.enter(self.phase.next());
        Ok(self.phase)
    }

    pub fn enter(&mut self, phase: Phase) {
        log::debug!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Admits a member and opens a ledger entry for it.
    pub fn admit(&mut self, peer: Peer) -> Result<bool> {
        let name = peer.name().to_string();
        let fresh = self.directory.admit(peer)?;
        if fresh {
            self.ledger.entry(name).or_insert(self.starting);
        }
        Ok(fresh)
    }

    /// Merges a membership list, returning the names not known before.
    pub fn adopt(&mut self, members: Vec<Peer>) -> Result<Vec<String>> {
        let before = self.directory.names();
        self.directory.adopt(members)?;
        let fresh = self
            .directory
            .names()
            .into_iter()
            .filter(|name| !before.contains(name))
            .collect::<Vec<_>>();
        for name in fresh.iter() {
            self.ledger.entry(name.clone()).or_insert(self.starting);
        }
        Ok(fresh)
    }

    /// Forgets an evicted member everywhere. False if already gone.
    pub fn evict(&mut self, name: &str) -> bool {
        match self.directory.remove(name) {
            None => false,
            Some(_) => {
                self.ledger.remove(name);
                if let Some(round) = self.round.as_mut() {
                    round.fold(name);
                }
                true
            }
        }
    }

    /// Drops this node's view of the last hand.
    pub fn clear_table(&mut self) {
        self.hole = None;
        self.board.clear();
        self.pot = 0;
        self.bet = 0;
    }

    pub fn view(&self, name: &str) -> View {
        View {
            name: name.to_string(),
            phase: self.phase,
            hole: self.hole,
            board: self.board.clone(),
            pot: self.pot,
            bet: self.bet,
            balance: self.balance,
        }
    }

    pub fn status(&self, me: &Peer) -> Status {
        Status {
            name: me.name().to_string(),
            phase: self.phase,
            members: self.directory.names(),
            balance: self.balance,
            referee: self.referee.clone(),
            leader: me.is_leader(),
            pot: self.pot,
            board: self.board.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn state() -> State {
        State::new(Peer::new("alice", "mem://alice").leading(), &Config::default())
    }

    #[test]
    fn rejected_advance_changes_nothing() {
        let mut state = state();
        let result = state.advance("end_gathering", &[Phase::PreflopBetting]);
        assert!(matches!(result, Err(Error::ProtocolViolation { .. })));
        assert_eq!(state.phase, Phase::Registering);
    }

    #[test]
    fn advance_follows_the_phase_table() {
        let mut state = state();
        assert_eq!(state.advance("start_game", &[Phase::Registering]), Ok(Phase::Electing));
        assert_eq!(state.advance("end_referee_voting", &Phase::ELECTIONS), Ok(Phase::Dealing));
    }

    #[test]
    fn ledger_tracks_membership() {
        let mut state = state();
        assert_eq!(state.admit(Peer::new("bob", "mem://bob")), Ok(true));
        assert_eq!(state.ledger.get("bob"), Some(&crate::STARTING_BALANCE));
        let fresh = state
            .adopt(vec![Peer::new("bob", "mem://bob"), Peer::new("carol", "mem://carol")])
            .unwrap();
        assert_eq!(fresh, vec!["carol".to_string()]);
        assert!(state.evict("bob"));
        assert!(!state.evict("bob"));
        assert!(!state.ledger.contains_key("bob"));
    }

    #[test]
    fn eviction_removes_from_the_round() {
        let mut state = state();
        state.admit(Peer::new("bob", "mem://bob")).unwrap();
        state.round = Some(Round::new(state.directory.names()));
        state.evict("bob");
        let round = state.round.as_ref().unwrap();
        assert!(!round.is_active("bob"));
        assert!(round.is_active("alice"));
    }
}

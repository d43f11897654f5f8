use super::*;
use crate::Chips;
use crate::PONG;
use crate::cards::Card;
use crate::cards::Hole;
use crate::error::Error;
use crate::error::Result;
use crate::peer::Peer;
use crate::phase::Phase;
use crate::players::Decision;
use crate::players::Event;
use crate::rpc::Service;
use crate::rpc::Status;

const REGISTERING: [Phase; 1] = [Phase::Registering];
const DEALING: [Phase; 2] = [Phase::Dealing, Phase::PreflopBetting];
const GATHERING: [Phase; 4] = [
    Phase::Dealing,
    Phase::FlopReveal,
    Phase::TurnReveal,
    Phase::RiverReveal,
];
const CLOSING: [Phase; 3] = [Phase::PreflopBetting, Phase::FlopBetting, Phase::TurnBetting];
const SHOWDOWN: [Phase; 1] = [Phase::RiverBetting];

#[async_trait::async_trait]
impl Service for Node {
    async fn join(&self, joiner: Peer) -> Result<Vec<Peer>> {
        let members = {
            let mut state = self.state.lock().await;
            state.phase.require("join", &REGISTERING)?;
            state.admit(joiner.clone())?;
            state.directory.members().to_vec()
        };
        log::info!("[{}] {} joined", self.me.name(), joiner);
        self.notify(Event::Joined(joiner.name().to_string())).await;
        self.announce(&joiner).await;
        self.spawn_quorum_check();
        Ok(members)
    }

    async fn admit(&self, peer: Peer) -> Result<()> {
        let fresh = {
            let mut state = self.state.lock().await;
            state.phase.require("admit", &REGISTERING)?;
            state.admit(peer.clone())?
        };
        if fresh {
            log::debug!("[{}] learned about {}", self.me.name(), peer);
            self.notify(Event::Joined(peer.name().to_string())).await;
            self.spawn_quorum_check();
        }
        Ok(())
    }

    async fn propagate(&self, ring: Vec<Peer>, origin: String, ttl: usize) -> Result<()> {
        let (fresh, next, view) = {
            let mut state = self.state.lock().await;
            state.phase.require("propagate", &REGISTERING)?;
            let fresh = state.adopt(ring)?;
            let next = state
                .directory
                .successor()
                .filter(|p| p.name() != origin && ttl > 1)
                .cloned();
            (fresh, next, state.directory.members().to_vec())
        };
        for name in fresh {
            self.notify(Event::Joined(name)).await;
        }
        if let Some(next) = next {
            if let Err(e) = self.stub(&next).propagate(view, origin, ttl - 1).await {
                log::warn!("[{}] ring forwarding to {} failed: {}", self.me.name(), next, e);
            }
        }
        self.spawn_quorum_check();
        Ok(())
    }

    async fn start_game(&self) -> Result<()> {
        self.state
            .lock()
            .await
            .advance("start_game", &REGISTERING)?;
        self.notify(Event::Started).await;
        Ok(())
    }

    async fn grant_referee(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.phase.require("grant_referee", &Phase::ELECTIONS)?;
        state.refereeing = true;
        log::info!("[{}] granted the referee role", self.me.name());
        Ok(())
    }

    async fn end_referee_voting(&self, referee: Peer) -> Result<()> {
        let runs = {
            let mut state = self.state.lock().await;
            state.phase.require("end_referee_voting", &Phase::ELECTIONS)?;
            state.enter(Phase::Dealing);
            state.referee = Some(referee.name().to_string());
            state.clear_table();
            referee.name() == self.me.name() && state.refereeing
        };
        self.notify(Event::Referee(referee.name().to_string())).await;
        if runs {
            self.spawn_round();
        } else if referee.name() == self.me.name() {
            log::warn!("[{}] named referee without a grant", self.me.name());
        }
        Ok(())
    }

    async fn deliver_hole(&self, hole: Hole) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.phase.require("deliver_hole", &DEALING)?;
            state.hole = Some(hole);
        }
        self.notify(Event::Hole(hole)).await;
        Ok(())
    }

    async fn begin_gathering(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.advance("begin_gathering", &GATHERING)?;
        state.bet = 0;
        Ok(())
    }

    async fn request_decision(&self) -> Result<String> {
        let view = {
            let state = self.state.lock().await;
            state.phase.require("request_decision", &Phase::BETTING)?;
            state.view(self.me.name())
        };
        Ok(self.player.lock().await.decide(&view).await)
    }

    async fn announce_decision(&self, player: String, decision: Decision) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.phase.require("announce_decision", &Phase::BETTING)?;
            if let Decision::Bet(n) = decision {
                state.pot += n;
                state.bet = state.bet.max(n);
                if let Some(balance) = state.ledger.get_mut(&player) {
                    *balance -= n;
                }
            }
        }
        self.notify(Event::Decision(player, decision)).await;
        Ok(())
    }

    async fn end_gathering(&self) -> Result<()> {
        self.state
            .lock()
            .await
            .advance("end_gathering", &CLOSING)
            .map(|_| ())
    }

    async fn reveal_board(&self, cards: Vec<Card>) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.phase.require("reveal_board", &Phase::REVEALS)?;
            state.board.extend(cards.iter().copied());
        }
        self.notify(Event::Board(cards)).await;
        Ok(())
    }

    async fn end_game(&self, winners: Vec<(String, Chips)>, pot: Chips) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.advance("end_game", &SHOWDOWN)?;
            for (name, amount) in winners.iter() {
                if let Some(balance) = state.ledger.get_mut(name) {
                    *balance += amount;
                }
            }
            state.clear_table();
        }
        log::info!("[{}] round settled, pot {}", self.me.name(), pot);
        self.notify(Event::Settled { winners, pot }).await;
        Ok(())
    }

    async fn credit(&self, amount: Chips) -> Result<Chips> {
        let mut state = self.state.lock().await;
        state.phase.require("credit", &SHOWDOWN)?;
        state.balance += amount;
        Ok(state.balance)
    }

    async fn debit(&self, amount: Chips) -> Result<Chips> {
        let mut state = self.state.lock().await;
        state.phase.require("debit", &Phase::BETTING)?;
        match amount {
            n if n <= 0 => Err(Error::Usage(format!("cannot debit {}", n))),
            n if n > state.balance => Err(Error::Usage(format!(
                "bet of {} exceeds balance {}",
                n, state.balance
            ))),
            n => {
                state.balance -= n;
                Ok(state.balance)
            }
        }
    }

    async fn balance(&self) -> Result<Chips> {
        Ok(self.state.lock().await.balance)
    }

    async fn ping(&self) -> Result<String> {
        Ok(PONG.to_string())
    }

    async fn peer_failed(&self, name: String) -> Result<()> {
        log::debug!("[{}] told that {} failed", self.me.name(), name);
        self.spawn_detector();
        Ok(())
    }

    async fn status(&self) -> Result<Status> {
        Ok(self.snapshot().await)
    }
}

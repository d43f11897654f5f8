use super::*;
use crate::error::Error;
use crate::error::Result;
use crate::error::Role;
use crate::peer::Peer;
use crate::phase::Phase;
use crate::rpc::Service;

impl Node {
    /// Chooses the next referee and moves every member to dealing.
    ///
    /// Runs on the leader when the game starts and on the outgoing referee
    /// once a round is settled. Returns `None` when the local player
    /// declines to nominate anyone, which closes the table, and
    /// `Unreachable` when the winner is evicted after accepting.
    pub async fn elect(&self) -> Result<Option<Peer>> {
        {
            let state = self.state.lock().await;
            state.phase.require("elect", &Phase::ELECTIONS)?;
            let entitled = match state.phase {
                Phase::Electing => self.me.is_leader(),
                _ => state.referee.as_deref() == Some(self.me.name()),
            };
            if !entitled {
                return Err(Error::MissingRole {
                    op: "elect".into(),
                    role: match state.phase {
                        Phase::Electing => Role::Leader,
                        _ => Role::Referee,
                    },
                });
            }
        }
        let winner = loop {
            let Some(winner) = self.nominate().await else {
                log::info!("[{}] no referee nominated, closing the table", self.me.name());
                return Ok(None);
            };
            match self.stub(&winner).grant_referee().await {
                Ok(()) => break winner,
                Err(e) if e.is_unreachable() => self.detect_failures().await,
                Err(e) => return Err(e),
            }
        };
        log::info!("[{}] {} referees the next round", self.me.name(), winner.name());
        let voters = self
            .members()
            .await
            .into_iter()
            .filter(|p| p.name() != winner.name())
            .chain(std::iter::once(winner.clone()))
            .collect::<Vec<_>>();
        for peer in voters {
            match self.stub(&peer).end_referee_voting(winner.clone()).await {
                Ok(()) => {}
                Err(e) if e.is_unreachable() => self.detect_failures().await,
                Err(e) => return Err(e),
            }
        }
        if self.member(winner.name()).await.is_none() {
            log::error!(
                "[{}] referee {} was evicted before dealing, the table has stalled",
                self.me.name(),
                winner.name()
            );
            return Err(Error::Unreachable(winner.addr().clone()));
        }
        Ok(Some(winner))
    }

    /// Asks the local player for a member name until one resolves.
    async fn nominate(&self) -> Option<Peer> {
        loop {
            let names = self.state.lock().await.directory.names();
            let name = self.player.lock().await.nominate(&names).await?;
            match self.state.lock().await.directory.resolve(&name) {
                Ok(peer) => return Some(peer),
                Err(e) => log::warn!("[{}] {}, nominate again", self.me.name(), e),
            }
        }
    }
}

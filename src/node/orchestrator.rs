use super::*;
use crate::Chips;
use crate::error::Error;
use crate::error::Result;
use crate::error::Role;
use crate::phase::Phase;
use crate::players::Decision;
use crate::rpc::Request;
use crate::rpc::Service;

/// Referee side of a round: deal, gather, reveal, showdown, conclude.
impl Node {
    pub(super) fn spawn_round(&self) {
        if let Some(node) = self.this.upgrade() {
            tokio::spawn(async move {
                if let Err(e) = node.referee().await {
                    log::error!("[{}] round aborted: {}", node.me.name(), e);
                }
            });
        }
    }

    /// Runs one round from dealing to the next election.
    pub async fn referee(&self) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.phase.require("referee", &[Phase::Dealing])?;
            if !state.refereeing {
                return Err(Error::MissingRole {
                    op: "referee".into(),
                    role: Role::Referee,
                });
            }
            let players = state.directory.names();
            state.round = Some(Round::new(players));
        }
        log::info!("[{}] refereeing a new round", self.me.name());
        self.deal().await?;
        loop {
            self.gather().await?;
            if self.phase().await == Phase::RiverBetting {
                break;
            }
            self.broadcast(Request::EndGathering).await?;
            self.reveal().await?;
        }
        self.showdown().await?;
        self.conclude().await
    }

    /// Runs `f` against the round this node is refereeing.
    async fn with_round<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Round) -> T,
    {
        self.state
            .lock()
            .await
            .round
            .as_mut()
            .map(f)
            .ok_or_else(|| Error::MissingRole {
                op: "orchestrate".into(),
                role: Role::Referee,
            })
    }

    /// Sends `request` to every member, the referee included. An
    /// unreachable member is handed to the failure detector and retried
    /// only if it survives.
    async fn broadcast(&self, request: Request) -> Result<()> {
        for peer in self.members().await {
            loop {
                match self.transport.call(peer.addr(), request.clone()).await {
                    Ok(_) => break,
                    Err(e) if e.is_unreachable() => {
                        self.detect_failures().await;
                        if self.member(peer.name()).await.is_none() {
                            break;
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    async fn deal(&self) -> Result<()> {
        let hands = self.with_round(|round| round.deal()).await??;
        for (name, hole) in hands {
            while let Some(peer) = self.member(&name).await {
                match self.stub(&peer).deliver_hole(hole).await {
                    Ok(()) => break,
                    Err(e) if e.is_unreachable() => self.detect_failures().await,
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    /// One betting round: every active player decides once.
    async fn gather(&self) -> Result<()> {
        self.broadcast(Request::BeginGathering).await?;
        let players = self
            .with_round(|round| {
                round.open();
                round.active().to_vec()
            })
            .await?;
        for name in players {
            self.solicit(&name).await?;
        }
        Ok(())
    }

    /// Asks `name` until an acceptable decision arrives, then announces it.
    async fn solicit(&self, name: &str) -> Result<()> {
        loop {
            let Some(peer) = self.member(name).await else {
                return Ok(());
            };
            if !self.with_round(|round| round.is_active(name)).await? {
                return Ok(());
            }
            let stub = self.stub(&peer);
            let answer = match stub.request_decision().await {
                Ok(answer) => answer,
                Err(e) if e.is_unreachable() => {
                    self.detect_failures().await;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let decision = match self.with_round(|round| round.admit(&answer)).await? {
                Ok(decision) => decision,
                Err(e) => {
                    log::warn!("[{}] {} answered {:?}: {}", self.me.name(), name, answer, e);
                    continue;
                }
            };
            if let Decision::Bet(n) = decision {
                match stub.debit(n).await {
                    Ok(_) => {}
                    Err(e) if e.is_retryable() => {
                        log::warn!("[{}] {} cannot bet: {}", self.me.name(), name, e);
                        continue;
                    }
                    Err(e) if e.is_unreachable() => {
                        self.detect_failures().await;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            self.with_round(|round| round.apply(name, decision)).await?;
            log::info!("[{}] {}: {}", self.me.name(), name, decision);
            return self
                .broadcast(Request::AnnounceDecision {
                    player: name.to_string(),
                    decision,
                })
                .await;
        }
    }

    async fn reveal(&self) -> Result<()> {
        let n = self.phase().await.reveal_size().ok_or_else(|| Error::Usage(
            "no board cards to reveal in this phase".into(),
        ))?;
        let cards = self.with_round(|round| round.reveal(n)).await??;
        self.broadcast(Request::RevealBoard { cards }).await
    }

    /// Pays out the pot and settles every member.
    async fn showdown(&self) -> Result<()> {
        let settlement = self
            .with_round(|round| round.settle(self.evaluator.as_ref()))
            .await?;
        let pot = settlement.pot;
        let mut payout = Payout::new(settlement);
        while let Some((name, amount)) = payout.next() {
            match self.pay(&name, amount).await? {
                true => payout.paid(name, amount),
                false => payout.vanished(amount),
            }
        }
        if payout.forfeited() > 0 {
            log::warn!(
                "[{}] {} chips forfeited, no winner left",
                self.me.name(),
                payout.forfeited()
            );
        }
        let paid = payout.into_paid();
        log::info!("[{}] pot {} paid to {:?}", self.me.name(), pot, paid);
        self.broadcast(Request::EndGame {
            winners: paid,
            pot,
        })
        .await
    }

    /// Credits a winner, false once it has been evicted.
    async fn pay(&self, name: &str, amount: Chips) -> Result<bool> {
        while let Some(peer) = self.member(name).await {
            match self.stub(&peer).credit(amount).await {
                Ok(_) => return Ok(true),
                Err(e) if e.is_unreachable() => self.detect_failures().await,
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    /// Drops the round and hands the table to the next referee.
    async fn conclude(&self) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.round = None;
            state.refereeing = false;
        }
        self.elect().await.map(|_| ())
    }
}

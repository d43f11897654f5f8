use super::*;
use crate::Config;
use crate::cards::Evaluator;
use crate::cards::Ranker;
use crate::error::Error;
use crate::error::Result;
use crate::error::Role;
use crate::peer::Peer;
use crate::peer::Topology;
use crate::phase::Phase;
use crate::players::Event;
use crate::players::Player;
use crate::rpc::Service;
use crate::rpc::Status;
use crate::rpc::Stub;
use crate::rpc::Transport;
use std::sync::Arc;
use std::sync::Weak;
use tokio::sync::Mutex;

/// One participant. Serves its peers through [`Service`] and drives the
/// game through the same interface on theirs.
///
/// State sits behind a single lock that is never held across an outbound
/// call, so a node calling itself through the transport cannot deadlock.
pub struct Node {
    pub(super) me: Peer,
    pub(super) config: Config,
    pub(super) this: Weak<Node>,
    pub(super) state: Mutex<State>,
    pub(super) player: Mutex<Box<dyn Player>>,
    pub(super) evaluator: Arc<dyn Evaluator>,
    pub(super) transport: Arc<dyn Transport>,
}

impl Node {
    pub fn new(
        me: Peer,
        config: Config,
        player: Box<dyn Player>,
        transport: Arc<dyn Transport>,
    ) -> Arc<Self> {
        Self::with_evaluator(me, config, player, Arc::new(Ranker), transport)
    }

    pub fn with_evaluator(
        me: Peer,
        config: Config,
        player: Box<dyn Player>,
        evaluator: Arc<dyn Evaluator>,
        transport: Arc<dyn Transport>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            state: Mutex::new(State::new(me.clone(), &config)),
            player: Mutex::new(player),
            this: this.clone(),
            me,
            config,
            evaluator,
            transport,
        })
    }

    pub fn me(&self) -> &Peer {
        &self.me
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }
    pub async fn members(&self) -> Vec<Peer> {
        self.state.lock().await.directory.members().to_vec()
    }
    pub async fn member(&self, name: &str) -> Option<Peer> {
        self.state.lock().await.directory.get(name).cloned()
    }
    pub async fn snapshot(&self) -> Status {
        self.state.lock().await.status(&self.me)
    }

    pub(super) fn stub(&self, peer: &Peer) -> Stub {
        Stub::new(peer.addr().clone(), self.transport.clone())
    }

    /// Reports to the local player. Never called with the state locked.
    pub(super) async fn notify(&self, event: Event) {
        log::debug!("[{}] {}", self.me.name(), event);
        self.player.lock().await.notify(&event).await;
    }
}

/// Registration.
impl Node {
    /// Joins the game through the member at `target` and adopts the
    /// membership it answers with.
    pub async fn enter(&self, target: &str) -> Result<Vec<String>> {
        self.state
            .lock()
            .await
            .phase
            .require("join", &[Phase::Registering])?;
        let members = Stub::new(target.to_string(), self.transport.clone())
            .join(self.me.clone())
            .await?;
        let fresh = self.state.lock().await.adopt(members)?;
        log::info!("[{}] joined through {}", self.me.name(), target);
        for name in fresh.iter() {
            self.notify(Event::Joined(name.clone())).await;
        }
        self.spawn_quorum_check();
        Ok(self.state.lock().await.directory.names())
    }

    /// Tells everyone this node knows about a new arrival. Under the ring
    /// topology the news travels one hop at a time until it comes back.
    pub(super) async fn announce(&self, joiner: &Peer) {
        let (fanout, ring) = {
            let state = self.state.lock().await;
            (
                state.directory.fanout(joiner.name()),
                state.directory.members().to_vec(),
            )
        };
        for peer in fanout {
            let result = match self.config.topology {
                Topology::Broadcast => self.stub(&peer).admit(joiner.clone()).await,
                Topology::Ring => {
                    let ttl = ring.len();
                    self.stub(&peer)
                        .propagate(ring.clone(), self.me.name().to_string(), ttl)
                        .await
                }
            };
            if let Err(e) = result {
                log::warn!("[{}] could not tell {} about {}: {}", self.me.name(), peer, joiner, e);
            }
        }
    }

    pub(super) fn spawn_quorum_check(&self) {
        if let Some(node) = self.this.upgrade() {
            tokio::spawn(async move { node.maybe_start().await });
        }
    }

    async fn maybe_start(&self) {
        let ready = {
            let state = self.state.lock().await;
            self.me.is_leader()
                && state.phase == Phase::Registering
                && state.directory.len() >= self.config.quorum
        };
        if ready {
            match self.start().await {
                Ok(()) => {}
                Err(e) if e.is_violation() => log::debug!("game already started: {}", e),
                Err(e) => log::error!("[{}] could not start the game: {}", self.me.name(), e),
            }
        }
    }

    /// Closes registration on every member and runs the first election.
    pub async fn start(&self) -> Result<()> {
        if !self.me.is_leader() {
            return Err(Error::MissingRole {
                op: "start".into(),
                role: Role::Leader,
            });
        }
        let others = {
            let mut state = self.state.lock().await;
            state.phase.require("start", &[Phase::Registering])?;
            if state.directory.len() < self.config.quorum {
                return Err(Error::Usage(format!(
                    "{} of {} members registered",
                    state.directory.len(),
                    self.config.quorum
                )));
            }
            state.enter(Phase::Electing);
            state.directory.others()
        };
        log::info!("[{}] quorum reached, starting the game", self.me.name());
        for peer in others {
            match self.stub(&peer).start_game().await {
                Ok(()) => {}
                Err(e) if e.is_unreachable() => self.detect_failures().await,
                Err(e) => return Err(e),
            }
        }
        self.notify(Event::Started).await;
        self.elect().await.map(|_| ())
    }
}

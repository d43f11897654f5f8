use super::*;
use crate::Address;
use crate::Chips;
use crate::cards::Card;
use crate::cards::Hole;
use crate::error::Error;
use crate::error::Result;
use crate::peer::Peer;
use crate::players::Decision;
use std::sync::Arc;

/// Client-side handle onto a remote node. Implements [`Service`] by
/// sending every operation through a [`Transport`].
#[derive(Clone)]
pub struct Stub {
    addr: Address,
    transport: Arc<dyn Transport>,
}

impl Stub {
    pub fn new(addr: Address, transport: Arc<dyn Transport>) -> Self {
        Self { addr, transport }
    }
    pub fn addr(&self) -> &Address {
        &self.addr
    }
    async fn call(&self, request: Request) -> Result<Reply> {
        self.transport.call(&self.addr, request).await
    }
    async fn ack(&self, request: Request) -> Result<()> {
        match self.call(request).await? {
            Reply::Ack => Ok(()),
            other => Err(self.garbled(other)),
        }
    }
    async fn chips(&self, request: Request) -> Result<Chips> {
        match self.call(request).await? {
            Reply::Chips(n) => Ok(n),
            other => Err(self.garbled(other)),
        }
    }
    /// A reply of the wrong shape means the peer does not speak our protocol.
    fn garbled(&self, reply: Reply) -> Error {
        log::warn!("unexpected reply from {}: {:?}", self.addr, reply);
        Error::Unreachable(self.addr.clone())
    }
}

#[async_trait::async_trait]
impl Service for Stub {
    async fn join(&self, joiner: Peer) -> Result<Vec<Peer>> {
        match self.call(Request::Join { joiner }).await? {
            Reply::Members(members) => Ok(members),
            other => Err(self.garbled(other)),
        }
    }
    async fn admit(&self, peer: Peer) -> Result<()> {
        self.ack(Request::Admit { peer }).await
    }
    async fn propagate(&self, ring: Vec<Peer>, origin: String, ttl: usize) -> Result<()> {
        self.ack(Request::Propagate { ring, origin, ttl }).await
    }
    async fn start_game(&self) -> Result<()> {
        self.ack(Request::StartGame).await
    }
    async fn grant_referee(&self) -> Result<()> {
        self.ack(Request::GrantReferee).await
    }
    async fn end_referee_voting(&self, referee: Peer) -> Result<()> {
        self.ack(Request::EndRefereeVoting { referee }).await
    }
    async fn deliver_hole(&self, hole: Hole) -> Result<()> {
        self.transport
            .cast(&self.addr, Request::DeliverHole { hole })
            .await
    }
    async fn begin_gathering(&self) -> Result<()> {
        self.ack(Request::BeginGathering).await
    }
    async fn request_decision(&self) -> Result<String> {
        match self.call(Request::RequestDecision).await? {
            Reply::Decision(answer) => Ok(answer),
            other => Err(self.garbled(other)),
        }
    }
    async fn announce_decision(&self, player: String, decision: Decision) -> Result<()> {
        self.ack(Request::AnnounceDecision { player, decision }).await
    }
    async fn end_gathering(&self) -> Result<()> {
        self.ack(Request::EndGathering).await
    }
    async fn reveal_board(&self, cards: Vec<Card>) -> Result<()> {
        self.ack(Request::RevealBoard { cards }).await
    }
    async fn end_game(&self, winners: Vec<(String, Chips)>, pot: Chips) -> Result<()> {
        self.ack(Request::EndGame { winners, pot }).await
    }
    async fn credit(&self, amount: Chips) -> Result<Chips> {
        self.chips(Request::Credit { amount }).await
    }
    async fn debit(&self, amount: Chips) -> Result<Chips> {
        self.chips(Request::Debit { amount }).await
    }
    async fn balance(&self) -> Result<Chips> {
        self.chips(Request::Balance).await
    }
    async fn ping(&self) -> Result<String> {
        match self.call(Request::Ping).await? {
            Reply::Token(token) => Ok(token),
            other => Err(self.garbled(other)),
        }
    }
    async fn peer_failed(&self, name: String) -> Result<()> {
        self.transport
            .cast(&self.addr, Request::PeerFailed { name })
            .await
    }
    async fn status(&self) -> Result<Status> {
        match self.call(Request::Status).await? {
            Reply::Status(status) => Ok(status),
            other => Err(self.garbled(other)),
        }
    }
}

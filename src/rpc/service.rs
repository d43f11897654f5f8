use super::*;
use crate::Chips;
use crate::cards::Card;
use crate::cards::Hole;
use crate::error::Result;
use crate::peer::Peer;
use crate::players::Decision;

/// The fixed capability set every node exposes to its peers.
///
/// Each operation is legal only in certain phases and fails with a
/// protocol violation otherwise. `deliver_hole` and `peer_failed` are
/// one-way: a remote caller never waits for them to finish.
#[async_trait::async_trait]
pub trait Service: Send + Sync {
    /// Registers `joiner` here, announces it to the table and returns the
    /// resulting membership.
    async fn join(&self, joiner: Peer) -> Result<Vec<Peer>>;
    /// A member learned about a new arrival.
    async fn admit(&self, peer: Peer) -> Result<()>;
    /// One hop of ring membership forwarding.
    async fn propagate(&self, ring: Vec<Peer>, origin: String, ttl: usize) -> Result<()>;
    async fn start_game(&self) -> Result<()>;
    async fn grant_referee(&self) -> Result<()>;
    async fn end_referee_voting(&self, referee: Peer) -> Result<()>;
    async fn deliver_hole(&self, hole: Hole) -> Result<()>;
    async fn begin_gathering(&self) -> Result<()>;
    /// Asks the local player, returns the raw answer unparsed.
    async fn request_decision(&self) -> Result<String>;
    async fn announce_decision(&self, player: String, decision: Decision) -> Result<()>;
    async fn end_gathering(&self) -> Result<()>;
    async fn reveal_board(&self, cards: Vec<Card>) -> Result<()>;
    async fn end_game(&self, winners: Vec<(String, Chips)>, pot: Chips) -> Result<()>;
    async fn credit(&self, amount: Chips) -> Result<Chips>;
    async fn debit(&self, amount: Chips) -> Result<Chips>;
    async fn balance(&self) -> Result<Chips>;
    async fn ping(&self) -> Result<String>;
    async fn peer_failed(&self, name: String) -> Result<()>;
    async fn status(&self) -> Result<Status>;
}

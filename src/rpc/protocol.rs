use super::*;
use crate::Chips;
use crate::cards::Card;
use crate::cards::Hole;
use crate::error::Result;
use crate::peer::Peer;
use crate::phase::Phase;
use crate::players::Decision;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// One remote operation and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Join {
        joiner: Peer,
    },
    Admit {
        peer: Peer,
    },
    Propagate {
        ring: Vec<Peer>,
        origin: String,
        ttl: usize,
    },
    StartGame,
    GrantReferee,
    EndRefereeVoting {
        referee: Peer,
    },
    DeliverHole {
        hole: Hole,
    },
    BeginGathering,
    RequestDecision,
    AnnounceDecision {
        player: String,
        decision: Decision,
    },
    EndGathering,
    RevealBoard {
        cards: Vec<Card>,
    },
    EndGame {
        winners: Vec<(String, Chips)>,
        pot: Chips,
    },
    Credit {
        amount: Chips,
    },
    Debit {
        amount: Chips,
    },
    Balance,
    Ping,
    PeerFailed {
        name: String,
    },
    Status,
}

/// Successful results. Failures travel as [`crate::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Ack,
    Members(Vec<Peer>),
    Decision(String),
    Chips(Chips),
    Token(String),
    Status(Status),
}

/// Snapshot of a node, answered by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub name: String,
    pub phase: Phase,
    pub members: Vec<String>,
    pub balance: Chips,
    pub referee: Option<String>,
    pub leader: bool,
    pub pot: Chips,
    pub board: Vec<Card>,
    /// Every member's balance as announced at the table.
    pub ledger: BTreeMap<String, Chips>,
}

/// A request as framed on a stream transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub oneway: bool,
    pub request: Request,
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Join { .. } => "join",
            Request::Admit { .. } => "admit",
            Request::Propagate { .. } => "propagate",
            Request::StartGame => "start_game",
            Request::GrantReferee => "grant_referee",
            Request::EndRefereeVoting { .. } => "end_referee_voting",
            Request::DeliverHole { .. } => "deliver_hole",
            Request::BeginGathering => "begin_gathering",
            Request::RequestDecision => "request_decision",
            Request::AnnounceDecision { .. } => "announce_decision",
            Request::EndGathering => "end_gathering",
            Request::RevealBoard { .. } => "reveal_board",
            Request::EndGame { .. } => "end_game",
            Request::Credit { .. } => "credit",
            Request::Debit { .. } => "debit",
            Request::Balance => "balance",
            Request::Ping => "ping",
            Request::PeerFailed { .. } => "peer_failed",
            Request::Status => "status",
        }
    }

    /// Requests the caller never waits on.
    pub fn is_oneway(&self) -> bool {
        matches!(self, Request::DeliverHole { .. } | Request::PeerFailed { .. })
    }

    /// Invokes the matching capability on a local service.
    pub async fn dispatch(self, service: &dyn Service) -> Result<Reply> {
        log::trace!("dispatching {}", self.name());
        match self {
            Request::Join { joiner } => service.join(joiner).await.map(Reply::Members),
            Request::Admit { peer } => service.admit(peer).await.map(|_| Reply::Ack),
            Request::Propagate { ring, origin, ttl } => service
                .propagate(ring, origin, ttl)
                .await
                .map(|_| Reply::Ack),
            Request::StartGame => service.start_game().await.map(|_| Reply::Ack),
            Request::GrantReferee => service.grant_referee().await.map(|_| Reply::Ack),
            Request::EndRefereeVoting { referee } => service
                .end_referee_voting(referee)
                .await
                .map(|_| Reply::Ack),
            Request::DeliverHole { hole } => service.deliver_hole(hole).await.map(|_| Reply::Ack),
            Request::BeginGathering => service.begin_gathering().await.map(|_| Reply::Ack),
            Request::RequestDecision => service.request_decision().await.map(Reply::Decision),
            Request::AnnounceDecision { player, decision } => service
                .announce_decision(player, decision)
                .await
                .map(|_| Reply::Ack),
            Request::EndGathering => service.end_gathering().await.map(|_| Reply::Ack),
            Request::RevealBoard { cards } => service.reveal_board(cards).await.map(|_| Reply::Ack),
            Request::EndGame { winners, pot } => {
                service.end_game(winners, pot).await.map(|_| Reply::Ack)
            }
            Request::Credit { amount } => service.credit(amount).await.map(Reply::Chips),
            Request::Debit { amount } => service.debit(amount).await.map(Reply::Chips),
            Request::Balance => service.balance().await.map(Reply::Chips),
            Request::Ping => service.ping().await.map(Reply::Token),
            Request::PeerFailed { name } => service.peer_failed(name).await.map(|_| Reply::Ack),
            Request::Status => service.status().await.map(Reply::Status),
        }
    }
}

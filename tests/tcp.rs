mod common;

use common::*;
use peerpoker::*;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn serve(name: &str) -> (Arc<Node>, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let node = Node::new(
        Peer::new(name, address.as_str()),
        config(4, Topology::Broadcast),
        Box::new(Script::default()),
        Arc::new(Tcp),
    );
    tokio::spawn(Tcp::listen(listener, node.clone()));
    (node, address)
}

#[tokio::test]
async fn calls_travel_over_tcp() {
    let (node, address) = serve("bob").await;
    let stub = Stub::new(address, Arc::new(Tcp));
    assert_eq!(stub.ping().await, Ok(PONG.to_string()));
    assert_eq!(stub.balance().await, Ok(STARTING_BALANCE));
    assert_eq!(stub.status().await.map(|s| s.name), Ok("bob".to_string()));
    stub.start_game().await.unwrap();
    assert_eq!(node.phase().await, Phase::Electing);
}

#[tokio::test]
async fn violations_come_back_structured() {
    let (_, address) = serve("bob").await;
    let stub = Stub::new(address, Arc::new(Tcp));
    let error = stub.begin_gathering().await.unwrap_err();
    assert_eq!(
        error,
        Error::ProtocolViolation {
            op: "begin_gathering".into(),
            expected: vec![
                Phase::Dealing,
                Phase::FlopReveal,
                Phase::TurnReveal,
                Phase::RiverReveal,
            ],
            actual: Phase::Registering,
        }
    );
}

#[tokio::test]
async fn members_join_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let alice = Node::new(
        Peer::new("alice", address.as_str()).leading(),
        config(4, Topology::Broadcast),
        Box::new(Script::default()),
        Arc::new(Tcp),
    );
    tokio::spawn(Tcp::listen(listener, alice.clone()));
    let (bob, _) = serve("bob").await;
    let members = bob.enter(&address).await.unwrap();
    assert_eq!(members, vec!["alice", "bob"]);
    assert_eq!(alice.snapshot().await.members, vec!["alice", "bob"]);
}

#[tokio::test]
async fn closed_ports_are_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    let stub = Stub::new(address.clone(), Arc::new(Tcp));
    assert_eq!(stub.ping().await, Err(Error::Unreachable(address.clone())));
    assert_eq!(
        stub.peer_failed("carol".into()).await,
        Err(Error::Unreachable(address))
    );
}

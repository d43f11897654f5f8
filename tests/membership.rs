mod common;

use common::*;
use peerpoker::*;

const NAMES: [&str; 4] = ["alice", "bob", "carol", "dave"];

async fn lobby(topology: Topology) -> Table {
    let mut table = Table::new(config(10, topology));
    table.seat("alice", true, Script::default()).await;
    for name in NAMES.iter().skip(1) {
        table.seat(name, false, Script::default()).await;
    }
    table
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

#[tokio::test]
async fn broadcast_membership_converges_after_every_join() {
    let table = lobby(Topology::Broadcast).await;
    for (i, name) in NAMES.iter().enumerate().skip(1) {
        let members = table.node(name).enter(&addr("alice")).await.unwrap();
        let expected = sorted(NAMES[..=i].iter().map(|s| s.to_string()).collect());
        assert_eq!(members, expected);
        for known in NAMES[..=i].iter() {
            assert_eq!(table.node(known).snapshot().await.members, expected);
        }
    }
}

#[tokio::test]
async fn ring_membership_converges_after_one_rotation() {
    let table = lobby(Topology::Ring).await;
    for (i, name) in NAMES.iter().enumerate().skip(1) {
        table.node(name).enter(&addr("alice")).await.unwrap();
        let expected = sorted(NAMES[..=i].iter().map(|s| s.to_string()).collect());
        for known in NAMES[..=i].iter() {
            let members = table.node(known).snapshot().await.members;
            assert_eq!(members[0], *known);
            assert_eq!(sorted(members), expected);
        }
    }
}

#[tokio::test]
async fn joining_through_any_member_reaches_everyone() {
    let table = lobby(Topology::Broadcast).await;
    table.node("bob").enter(&addr("alice")).await.unwrap();
    table.node("carol").enter(&addr("bob")).await.unwrap();
    table.node("dave").enter(&addr("carol")).await.unwrap();
    for status in table.statuses().await {
        assert_eq!(status.members, NAMES.to_vec());
    }
}

#[tokio::test]
async fn repeated_join_notices_never_duplicate_members() {
    let table = lobby(Topology::Broadcast).await;
    table.node("bob").enter(&addr("alice")).await.unwrap();
    let stub = Stub::new(addr("alice"), table.board.clone());
    stub.admit(table.node("bob").me().clone()).await.unwrap();
    stub.admit(table.node("bob").me().clone()).await.unwrap();
    assert_eq!(table.node("alice").snapshot().await.members, vec!["alice", "bob"]);
}

#[tokio::test]
async fn name_clashes_and_second_leaders_are_rejected() {
    let table = lobby(Topology::Broadcast).await;
    table.node("bob").enter(&addr("alice")).await.unwrap();
    let stub = Stub::new(addr("alice"), table.board.clone());
    let impostor = stub.join(Peer::new("bob", "mem://elsewhere")).await;
    assert!(matches!(impostor, Err(Error::Conflict(_))));
    let usurper = stub.join(Peer::new("mallory", "mem://mallory").leading()).await;
    assert!(matches!(usurper, Err(Error::Conflict(_))));
    assert_eq!(table.node("alice").snapshot().await.members, vec!["alice", "bob"]);
}

#[tokio::test]
async fn joining_is_rejected_once_the_game_started() {
    let mut table = Table::new(config(2, Topology::Broadcast));
    table.seat("alice", true, Script::default()).await;
    table.seat("bob", false, Script::default()).await;
    table.seat("carol", false, Script::default()).await;
    table.node("bob").enter(&addr("alice")).await.unwrap();
    eventually("the leader to start", || async {
        table.node("alice").phase().await != Phase::Registering
    })
    .await;
    let late = table.node("carol").enter(&addr("alice")).await;
    assert!(matches!(
        late,
        Err(Error::ProtocolViolation { ref op, actual: Phase::Electing, .. }) if op == "join"
    ));
    assert_eq!(table.node("alice").snapshot().await.members, vec!["alice", "bob"]);
}

#[tokio::test]
async fn only_the_leader_starts_and_only_with_a_quorum() {
    let table = lobby(Topology::Broadcast).await;
    table.node("bob").enter(&addr("alice")).await.unwrap();
    assert!(matches!(
        table.node("bob").start().await,
        Err(Error::MissingRole { role: Role::Leader, .. })
    ));
    assert!(matches!(table.node("alice").start().await, Err(Error::Usage(_))));
    assert_eq!(table.node("alice").phase().await, Phase::Registering);
}

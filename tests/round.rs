mod common;

use common::*;
use peerpoker::*;
use std::collections::HashSet;

const NAMES: [&str; 4] = ["alice", "bob", "carol", "dave"];

async fn register(table: &Table) {
    for name in NAMES.iter().skip(1) {
        table.node(name).enter(&addr("alice")).await.unwrap();
    }
}

async fn settled(table: &Table, journals: &[Journal]) {
    eventually("every member to see the settlement", || async {
        journals.iter().all(|j| {
            j.events()
                .iter()
                .any(|e| matches!(e, Event::Settled { .. }))
        })
    })
    .await;
    for status in table.statuses().await {
        assert_eq!(status.phase, Phase::Settled, "{} did not settle", status.name);
    }
}

fn settlement(journal: &Journal) -> (Vec<(String, Chips)>, Chips) {
    journal
        .events()
        .into_iter()
        .find_map(|e| match e {
            Event::Settled { winners, pot } => Some((winners, pot)),
            _ => None,
        })
        .expect("settled")
}

#[tokio::test]
async fn four_players_play_a_full_round() {
    let alice = Script::new(["bet 10", "check", "check", "check"], ["zed", "bob"]);
    let bob = Script::new(["check", "bet 10", "check", "check", "check"], Vec::<String>::new());
    let carol = Script::new(["pass"], Vec::<String>::new());
    let dave = Script::new(["bet 20", "check", "check", "check"], Vec::<String>::new());
    let journals = [&alice, &bob, &carol, &dave].map(|s| s.journal());
    let mut table = Table::new(config(4, Topology::Broadcast));
    table.seat("alice", true, alice).await;
    table.seat("bob", false, bob).await;
    table.seat("carol", false, carol).await;
    table.seat("dave", false, dave).await;
    register(&table).await;
    settled(&table, &journals).await;

    // the unknown nominee was asked again
    assert_eq!(journals[0].nominations(), 2);
    for status in table.statuses().await {
        assert_eq!(status.referee.as_deref(), Some("bob"));
    }

    // two distinct cards each, none repeated on the board
    let holes = journals
        .iter()
        .map(|j| {
            j.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Hole(hole) => Some(hole),
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    assert!(holes.iter().all(|h| h.len() == 1));
    let board = journals[0]
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Board(cards) => Some(cards),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(board.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 1, 1]);
    let cards = holes
        .iter()
        .flatten()
        .flat_map(|h| h.cards().to_vec())
        .chain(board.into_iter().flatten())
        .collect::<HashSet<_>>();
    assert_eq!(cards.len(), 13);

    // bob's check into a standing bet was refused and bob asked again
    let decisions = journals[2].decisions();
    assert_eq!(
        decisions[..4].to_vec(),
        vec![
            ("alice".to_string(), Decision::Bet(10)),
            ("bob".to_string(), Decision::Bet(10)),
            ("carol".to_string(), Decision::Pass),
            ("dave".to_string(), Decision::Bet(20)),
        ]
    );
    assert_eq!(decisions.len(), 4 + 3 * 3);
    assert!(decisions[4..].iter().all(|(name, d)| name != "carol" && *d == Decision::Check));
    assert_eq!(journals[1].prompts(), 5);
    assert_eq!(journals[2].prompts(), 1);

    // the pot is exactly the accepted bets, paid out in full
    let (winners, pot) = settlement(&journals[3]);
    assert_eq!(pot, 40);
    assert_eq!(winners.iter().map(|(_, n)| n).sum::<Chips>(), 40);
    assert!(winners.iter().all(|(name, _)| name != "carol"));
    let statuses = table.statuses().await;
    let total = statuses.iter().map(|s| s.balance).sum::<Chips>();
    assert_eq!(total, 4 * STARTING_BALANCE);
    let carol = statuses.iter().find(|s| s.name == "carol").unwrap();
    assert_eq!(carol.balance, STARTING_BALANCE);
    for status in statuses.iter() {
        assert_eq!(status.pot, 0);
        assert!(status.board.is_empty());
    }

    // every member's ledger agrees with the actual balances
    for status in statuses.iter() {
        let balances = statuses
            .iter()
            .map(|s| (s.name.clone(), s.balance))
            .collect::<std::collections::BTreeMap<_, _>>();
        assert_eq!(status.ledger, balances, "{}'s ledger drifted", status.name);
    }
}

#[tokio::test]
async fn survivors_finish_the_round_without_the_failed_member() {
    let mut table = Table::new(config(4, Topology::Broadcast));
    let alice = Script::new(["bet 10", "check", "check", "check"], ["bob"]);
    let bob = Script::new(["bet 10", "check", "check", "check"], Vec::<String>::new());
    let carol = Script::new(["bet 50"], Vec::<String>::new());
    let dave = Script::new(["bet 10", "check", "check", "check"], Vec::<String>::new());
    let journals = [&alice, &bob, &carol, &dave].map(|s| s.journal());
    let saboteur = Saboteur {
        inner: alice,
        board: table.board.clone(),
        target: addr("carol"),
    };
    table.seat("alice", true, saboteur).await;
    table.seat("bob", false, bob).await;
    table.seat("carol", false, carol).await;
    table.seat("dave", false, dave).await;
    register(&table).await;

    let survivors = [0, 1, 3].map(|i| journals[i].clone());
    settled_among(&table, &survivors).await;
    eventually("every survivor to evict carol", || async {
        let mut converged = true;
        for name in ["alice", "bob", "dave"] {
            let members = table.node(name).snapshot().await.members;
            converged &= members == vec!["alice", "bob", "dave"];
        }
        converged
    })
    .await;
    for journal in survivors.iter() {
        assert!(journal.events().contains(&Event::Failed("carol".into())));
    }
    assert_eq!(journals[2].prompts(), 0);

    let (winners, pot) = settlement(&journals[1]);
    assert_eq!(pot, 30);
    assert!(winners.iter().all(|(name, _)| name != "carol"));
    let mut total = 0;
    for name in ["alice", "bob", "dave"] {
        let status = table.node(name).snapshot().await;
        assert_eq!(status.phase, Phase::Settled);
        total += status.balance;
    }
    assert_eq!(total, 3 * STARTING_BALANCE);
}

async fn settled_among(table: &Table, journals: &[Journal]) {
    eventually("the survivors to see the settlement", || async {
        journals.iter().all(|j| {
            j.events()
                .iter()
                .any(|e| matches!(e, Event::Settled { .. }))
        })
    })
    .await;
    for name in ["alice", "bob", "dave"] {
        assert_eq!(table.node(name).phase().await, Phase::Settled);
    }
}

#[tokio::test]
async fn the_referee_may_hand_the_table_to_itself() {
    let mut table = Table::new(config(3, Topology::Ring));
    let alice = Script::new(Vec::<String>::new(), ["carol"]);
    let bob = Script::new(Vec::<String>::new(), Vec::<String>::new());
    let carol = Script::new(Vec::<String>::new(), ["carol"]);
    let journals = [&alice, &bob, &carol].map(|s| s.journal());
    table.seat("alice", true, alice).await;
    table.seat("bob", false, bob).await;
    table.seat("carol", false, carol).await;
    table.node("bob").enter(&addr("alice")).await.unwrap();
    table.node("carol").enter(&addr("bob")).await.unwrap();
    eventually("two rounds to settle", || async {
        journals.iter().all(|j| {
            j.events()
                .iter()
                .filter(|e| matches!(e, Event::Settled { .. }))
                .count()
                == 2
        })
    })
    .await;
    eventually("the table to close", || async {
        journals[2].nominations() == 2
    })
    .await;
    let statuses = table.statuses().await;
    assert!(statuses.iter().all(|s| s.phase == Phase::Settled));
    assert_eq!(statuses.iter().map(|s| s.balance).sum::<Chips>(), 3 * STARTING_BALANCE);
}

//! Poker Node Binary
//!
//! Runs one seat at the table: serves peers over TCP and, unless it
//! opens the lobby itself, joins the game through an existing member.

use clap::Parser;
use peerpoker::*;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, help = "Name shown to the other players, unique per game")]
    name: String,
    #[arg(long, default_value = "127.0.0.1:7000", help = "Address to serve peers on")]
    bind: String,
    #[arg(long, help = "Address of a member to join through; omit to open the lobby as leader")]
    join: Option<String>,
    #[arg(long, default_value_t = QUORUM, help = "Members required before the game starts")]
    quorum: usize,
    #[arg(long, default_value_t = Topology::Broadcast, help = "broadcast or ring")]
    topology: Topology,
    #[arg(long, default_value_t = STARTING_BALANCE, help = "Starting balance")]
    balance: Chips,
    #[arg(long, help = "Let a random bot play this seat")]
    bot: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    kys();
    let args = Args::parse();
    let config = Config {
        quorum: args.quorum,
        topology: args.topology,
        balance: args.balance,
    }
    .validate()?;
    let me = match args.join {
        None => Peer::new(args.name.as_str(), args.bind.as_str()).leading(),
        Some(_) => Peer::new(args.name.as_str(), args.bind.as_str()),
    };
    let player: Box<dyn Player> = match args.bot {
        true => Box::new(Fish),
        false => Box::new(Human),
    };
    let listener = tokio::net::TcpListener::bind(args.bind.as_str()).await?;
    let node = Node::new(me, config, player, Arc::new(Tcp));
    let server = tokio::spawn(Tcp::listen(listener, node.clone()));
    if let Some(target) = args.join {
        let members = node.enter(&target).await?;
        log::info!("at the table with {}", members.join(", "));
    }
    server.await?
}

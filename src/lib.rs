//! Serverless multi-party Texas Hold-Em.
//!
//! Every participant runs the same [`Node`]: it answers remote calls from
//! its peers and issues its own. There is no coordinator process. A leader
//! opens the lobby and starts the game once a quorum has registered, after
//! which a referee, chosen once per round, deals, gathers decisions, reveals
//! the board and settles the pot. Unreachable peers are evicted by a
//! flood-style failure detector so the survivors can finish the round.
//!
//! ## Modules
//!
//! - [`cards`]: cards, deck and the hand [`Evaluator`] seam
//! - [`phase`]: the eleven game phases and the guard every operation runs
//! - [`peer`]: peer identities and the membership [`Directory`]
//! - [`players`]: decision sources (console, bots, scripts) and their events
//! - [`rpc`]: the remote [`Service`] contract, stubs and transports
//! - [`node`]: the node itself: election, round orchestration, failure detection
pub mod cards;
pub mod error;
pub mod node;
pub mod peer;
pub mod phase;
pub mod players;
pub mod rpc;

pub use cards::*;
pub use error::*;
pub use node::*;
pub use peer::*;
pub use phase::*;
pub use players::*;
pub use rpc::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Balances, bets and pots.
pub type Chips = i64;
/// Transport-level address of a peer (`host:port`, or `mem://name` in-process).
pub type Address = String;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Members required before the leader starts the game.
pub const QUORUM: usize = 3;
/// Balance every member starts with.
pub const STARTING_BALANCE: Chips = 10_000;
/// Liveness token returned by `ping`.
pub const PONG: &str = "pong";
/// Cards dealt to every member.
pub const HOLE_SIZE: usize = 2;
/// Cards revealed on the flop.
pub const FLOP_SIZE: usize = 3;

// ============================================================================
// CONFIGURATION
// ============================================================================
/// Per-deployment settings, fixed before the node starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub quorum: usize,
    pub topology: Topology,
    pub balance: Chips,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quorum: QUORUM,
            topology: Topology::Broadcast,
            balance: STARTING_BALANCE,
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<Self> {
        match self.quorum {
            0 | 1 => Err(Error::Usage(format!("quorum {} is below 2", self.quorum))),
            _ => Ok(self),
        }
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// All game state is in memory, so there is nothing to flush.
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, leaving the table");
            std::process::exit(0);
        }
    });
}

use crate::error::Error;
use crate::error::Result;
use serde::Deserialize;
use serde::Serialize;

/// The single source of truth for what a node may do right now.
///
/// Phases are numbered 0..=10 and advance only when a referee-driven step
/// completes. Odd phases from 3 to 9 are betting rounds, the even phases
/// between them are board reveals.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    Registering = 0,
    Electing = 1,
    Dealing = 2,
    PreflopBetting = 3,
    FlopReveal = 4,
    FlopBetting = 5,
    TurnReveal = 6,
    TurnBetting = 7,
    RiverReveal = 8,
    RiverBetting = 9,
    Settled = 10,
}

impl Phase {
    pub const BETTING: [Phase; 4] = [
        Phase::PreflopBetting,
        Phase::FlopBetting,
        Phase::TurnBetting,
        Phase::RiverBetting,
    ];
    pub const REVEALS: [Phase; 3] = [Phase::FlopReveal, Phase::TurnReveal, Phase::RiverReveal];
    pub const ELECTIONS: [Phase; 2] = [Phase::Electing, Phase::Settled];

    /// Fails with a violation unless this phase is one of `allowed`.
    /// Runs before any mutation, so a rejected call leaves state untouched.
    pub fn require(self, op: &str, allowed: &[Phase]) -> Result<()> {
        match allowed.contains(&self) {
            true => Ok(()),
            false => Err(Error::ProtocolViolation {
                op: op.to_string(),
                expected: allowed.to_vec(),
                actual: self,
            }),
        }
    }

    /// The phase reached by completing this one. `Settled` wraps to `Dealing`
    /// when a new referee is chosen.
    pub fn next(self) -> Phase {
        match self {
            Phase::Registering => Phase::Electing,
            Phase::Electing => Phase::Dealing,
            Phase::Dealing => Phase::PreflopBetting,
            Phase::PreflopBetting => Phase::FlopReveal,
            Phase::FlopReveal => Phase::FlopBetting,
            Phase::FlopBetting => Phase::TurnReveal,
            Phase::TurnReveal => Phase::TurnBetting,
            Phase::TurnBetting => Phase::RiverReveal,
            Phase::RiverReveal => Phase::RiverBetting,
            Phase::RiverBetting => Phase::Settled,
            Phase::Settled => Phase::Dealing,
        }
    }

    pub fn is_betting(self) -> bool {
        Self::BETTING.contains(&self)
    }

    /// Board cards drawn in a reveal phase.
    pub fn reveal_size(self) -> Option<usize> {
        match self {
            Phase::FlopReveal => Some(crate::FLOP_SIZE),
            Phase::TurnReveal | Phase::RiverReveal => Some(1),
            _ => None,
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        phase as u8
    }
}
impl TryFrom<u8> for Phase {
    type Error = String;
    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        match n {
            0 => Ok(Phase::Registering),
            1 => Ok(Phase::Electing),
            2 => Ok(Phase::Dealing),
            3 => Ok(Phase::PreflopBetting),
            4 => Ok(Phase::FlopReveal),
            5 => Ok(Phase::FlopBetting),
            6 => Ok(Phase::TurnReveal),
            7 => Ok(Phase::TurnBetting),
            8 => Ok(Phase::RiverReveal),
            9 => Ok(Phase::RiverBetting),
            10 => Ok(Phase::Settled),
            _ => Err(format!("no phase {}", n)),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Phase::Registering => "registering",
            Phase::Electing => "referee pending",
            Phase::Dealing => "dealing",
            Phase::PreflopBetting => "betting round 1",
            Phase::FlopReveal => "flop reveal",
            Phase::FlopBetting => "betting round 2",
            Phase::TurnReveal => "turn reveal",
            Phase::TurnBetting => "betting round 3",
            Phase::RiverReveal => "river reveal",
            Phase::RiverBetting => "betting round 4",
            Phase::Settled => "settled",
        };
        write!(f, "{} ({})", u8::from(*self), label)
    }
}

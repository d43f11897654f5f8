use crate::Chips;
use crate::error::Error;
use serde::Deserialize;
use serde::Serialize;

/// A parsed betting decision: `pass`, `check` or `bet <amount>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Pass,
    Check,
    Bet(Chips),
}

impl TryFrom<&str> for Decision {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let words = s.split_whitespace().collect::<Vec<_>>();
        match words.as_slice() {
            ["pass"] => Ok(Decision::Pass),
            ["check"] => Ok(Decision::Check),
            ["bet", amount] => match amount.parse::<Chips>() {
                Ok(n) if n > 0 => Ok(Decision::Bet(n)),
                Ok(n) => Err(Error::Usage(format!("bet must be positive, got {}", n))),
                Err(_) => Err(Error::Usage(format!("cannot parse bet amount {:?}", amount))),
            },
            _ => Err(Error::Usage(format!(
                "cannot parse decision {:?}, expected pass | check | bet <amount>",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Decision::Pass => write!(f, "pass"),
            Decision::Check => write!(f, "check"),
            Decision::Bet(n) => write!(f, "bet {}", n),
        }
    }
}

/// How membership is ordered and how a new member's arrival spreads.
///
/// - `Broadcast`: every node holds the full set; the contacted member tells
///   every other member directly.
/// - `Ring`: membership is a ring; the contacted member inserts the joiner
///   after itself and the updated ring travels one hop at a time until it
///   returns to its origin.
///
/// One strategy is picked per deployment. Mixing them in one game is not
/// supported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    #[default]
    Broadcast,
    Ring,
}

impl std::str::FromStr for Topology {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "broadcast" => Ok(Topology::Broadcast),
            "ring" => Ok(Topology::Ring),
            _ => Err(format!("unknown topology {:?}, expected broadcast or ring", s)),
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Topology::Broadcast => write!(f, "broadcast"),
            Topology::Ring => write!(f, "ring"),
        }
    }
}

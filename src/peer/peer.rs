use crate::Address;
use serde::Deserialize;
use serde::Serialize;

/// Identity every node knows about every other: a name unique within the
/// game and the address the transport reaches it at. Never mutated.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    name: String,
    addr: Address,
    leader: bool,
}

impl Peer {
    pub fn new(name: impl Into<String>, addr: impl Into<Address>) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
            leader: false,
        }
    }
    pub fn leading(self) -> Self {
        Self {
            leader: true,
            ..self
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn addr(&self) -> &Address {
        &self.addr
    }
    pub fn is_leader(&self) -> bool {
        self.leader
    }
}

impl std::fmt::Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.addr)
    }
}

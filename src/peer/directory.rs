use super::peer::Peer;
use super::topology::Topology;
use crate::error::Error;
use crate::error::Result;

/// One node's view of the membership, itself included, unique by name.
///
/// Under `Broadcast` the order carries no meaning and is kept sorted by name
/// so every node lists members identically. Under `Ring` the sequence is the
/// ring rotated to start at this node, so `successor` is always index 1.
#[derive(Debug, Clone)]
pub struct Directory {
    topology: Topology,
    me: String,
    peers: Vec<Peer>,
}

impl Directory {
    pub fn new(topology: Topology, me: Peer) -> Self {
        Self {
            topology,
            me: me.name().to_string(),
            peers: vec![me],
        }
    }
    pub fn len(&self) -> usize {
        self.peers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
    pub fn members(&self) -> &[Peer] {
        &self.peers
    }
    pub fn names(&self) -> Vec<String> {
        self.peers.iter().map(|p| p.name().to_string()).collect()
    }
    pub fn others(&self) -> Vec<Peer> {
        self.peers
            .iter()
            .filter(|p| p.name() != self.me)
            .cloned()
            .collect()
    }
    pub fn get(&self, name: &str) -> Option<&Peer> {
        self.peers.iter().find(|p| p.name() == name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
    pub fn leader(&self) -> Option<&Peer> {
        self.peers.iter().find(|p| p.is_leader())
    }
    /// Resolves a nominated name to a member.
    pub fn resolve(&self, name: &str) -> Result<Peer> {
        self.get(name.trim())
            .cloned()
            .ok_or_else(|| Error::NameNotFound(name.trim().to_string()))
    }
}

impl Directory {
    /// Inserts a member. Returns false when it was already known, so
    /// repeated notifications never duplicate an entry.
    pub fn admit(&mut self, peer: Peer) -> Result<bool> {
        if let Some(known) = self.get(peer.name()) {
            return match known.addr() == peer.addr() {
                true => Ok(false),
                false => Err(Error::Conflict(format!(
                    "name {} is taken by {}",
                    peer.name(),
                    known.addr()
                ))),
            };
        }
        if let Some(leader) = self.leader().filter(|_| peer.is_leader()) {
            return Err(Error::Conflict(format!(
                "{} claims leadership held by {}",
                peer.name(),
                leader.name()
            )));
        }
        match self.topology {
            Topology::Broadcast => {
                let i = self.peers.partition_point(|p| p.name() < peer.name());
                self.peers.insert(i, peer);
            }
            Topology::Ring => self.peers.insert(1.min(self.peers.len()), peer),
        }
        Ok(true)
    }

    /// Merges a membership list received from a peer. Under `Ring` the
    /// received order wins and is rotated to start here; members known
    /// locally but missing from the list are kept at the end.
    pub fn adopt(&mut self, members: Vec<Peer>) -> Result<()> {
        match self.topology {
            Topology::Broadcast => members
                .into_iter()
                .map(|peer| self.admit(peer).map(|_| ()))
                .collect(),
            Topology::Ring => {
                let mut ring = Vec::<Peer>::with_capacity(members.len());
                for peer in members {
                    if ring.iter().all(|p| p.name() != peer.name()) {
                        ring.push(peer);
                    }
                }
                match ring.iter().position(|p| p.name() == self.me) {
                    Some(i) => ring.rotate_left(i),
                    None => ring.insert(0, self.peers[0].clone()),
                }
                for peer in self.peers.drain(..) {
                    if ring.iter().all(|p| p.name() != peer.name()) {
                        ring.push(peer);
                    }
                }
                self.peers = ring;
                Ok(())
            }
        }
    }

    /// Removes a member. Removing an absent member is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Peer> {
        match name == self.me {
            true => None,
            false => self
                .peers
                .iter()
                .position(|p| p.name() == name)
                .map(|i| self.peers.remove(i)),
        }
    }

    /// The next member around the ring, if anyone else is left.
    pub fn successor(&self) -> Option<&Peer> {
        self.peers.get(1)
    }

    /// Members a new arrival must be announced to by this node.
    pub fn fanout(&self, joiner: &str) -> Vec<Peer> {
        match self.topology {
            Topology::Broadcast => self
                .others()
                .into_iter()
                .filter(|p| p.name() != joiner)
                .collect(),
            Topology::Ring => self.successor().into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(name: &str) -> Peer {
        Peer::new(name, format!("mem://{}", name))
    }

    #[test]
    fn admit_is_idempotent() {
        let mut dir = Directory::new(Topology::Broadcast, peer("alice").leading());
        assert_eq!(dir.admit(peer("bob")), Ok(true));
        assert_eq!(dir.admit(peer("bob")), Ok(false));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn broadcast_order_is_by_name() {
        let mut dir = Directory::new(Topology::Broadcast, peer("carol"));
        dir.admit(peer("dave")).unwrap();
        dir.admit(peer("alice")).unwrap();
        dir.admit(peer("bob")).unwrap();
        assert_eq!(dir.names(), vec!["alice", "bob", "carol", "dave"]);
    }

    #[test]
    fn ring_inserts_after_self() {
        let mut dir = Directory::new(Topology::Ring, peer("alice"));
        dir.admit(peer("bob")).unwrap();
        dir.admit(peer("carol")).unwrap();
        assert_eq!(dir.names(), vec!["alice", "carol", "bob"]);
        assert_eq!(dir.successor().map(Peer::name), Some("carol"));
    }

    #[test]
    fn ring_adopts_rotated_view() {
        let mut dir = Directory::new(Topology::Ring, peer("carol"));
        dir.adopt(vec![peer("alice"), peer("bob"), peer("carol"), peer("dave")])
            .unwrap();
        assert_eq!(dir.names(), vec!["carol", "dave", "alice", "bob"]);
    }

    #[test]
    fn remove_twice_equals_remove_once() {
        let mut dir = Directory::new(Topology::Broadcast, peer("alice"));
        dir.admit(peer("bob")).unwrap();
        dir.admit(peer("carol")).unwrap();
        assert!(dir.remove("bob").is_some());
        let once = dir.names();
        assert!(dir.remove("bob").is_none());
        assert_eq!(once, dir.names());
    }

    #[test]
    fn self_is_never_removed() {
        let mut dir = Directory::new(Topology::Ring, peer("alice"));
        assert!(dir.remove("alice").is_none());
        assert!(dir.contains("alice"));
    }

    #[test]
    fn name_clash_and_second_leader_conflict() {
        let mut dir = Directory::new(Topology::Broadcast, peer("alice").leading());
        assert!(matches!(
            dir.admit(Peer::new("alice", "mem://elsewhere")),
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            dir.admit(peer("mallory").leading()),
            Err(Error::Conflict(_))
        ));
    }

    #[test]
    fn resolve_reports_unknown_names() {
        let dir = Directory::new(Topology::Broadcast, peer("alice"));
        assert_eq!(dir.resolve(" alice ").map(|p| p.name().to_string()), Ok("alice".into()));
        assert_eq!(dir.resolve("zed"), Err(Error::NameNotFound("zed".into())));
    }

    #[test]
    fn fanout_by_topology() {
        let mut broadcast = Directory::new(Topology::Broadcast, peer("alice"));
        let mut ring = Directory::new(Topology::Ring, peer("alice"));
        for name in ["bob", "carol", "dave"] {
            broadcast.admit(peer(name)).unwrap();
            ring.admit(peer(name)).unwrap();
        }
        assert_eq!(broadcast.fanout("dave").len(), 2);
        assert_eq!(ring.fanout("dave").len(), 1);
    }
}

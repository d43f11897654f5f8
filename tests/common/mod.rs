#![allow(dead_code)]
use peerpoker::*;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub fn addr(name: &str) -> String {
    format!("mem://{}", name)
}

pub fn config(quorum: usize, topology: Topology) -> Config {
    Config {
        quorum,
        topology,
        ..Config::default()
    }
}

/// A table of nodes wired to one in-process switchboard.
pub struct Table {
    pub board: Arc<Switchboard>,
    pub config: Config,
    pub nodes: Vec<Arc<Node>>,
}

impl Table {
    pub fn new(config: Config) -> Self {
        Self {
            board: Arc::new(Switchboard::default()),
            config,
            nodes: Vec::new(),
        }
    }

    /// Creates a node and registers it, without joining anyone.
    pub async fn seat<P>(&mut self, name: &str, leader: bool, player: P) -> Arc<Node>
    where
        P: Player + 'static,
    {
        let me = match leader {
            true => Peer::new(name, addr(name)).leading(),
            false => Peer::new(name, addr(name)),
        };
        let node = Node::new(me, self.config, Box::new(player), self.board.clone());
        self.board.register(addr(name), node.clone()).await;
        self.nodes.push(node.clone());
        node
    }

    pub fn node(&self, name: &str) -> &Arc<Node> {
        self.nodes
            .iter()
            .find(|n| n.me().name() == name)
            .expect("seated")
    }

    pub async fn statuses(&self) -> Vec<Status> {
        let mut statuses = Vec::new();
        for node in self.nodes.iter() {
            statuses.push(node.snapshot().await);
        }
        statuses
    }
}

/// Polls `check` until it holds, failing the test after a few seconds.
pub async fn eventually<F, Fut>(what: &str, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let polling = async {
        while !check().await {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(10), polling)
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {}", what));
}

/// Wraps a scripted player and cuts `target` off the switchboard the
/// first time it is asked to decide.
pub struct Saboteur {
    pub inner: Script,
    pub board: Arc<Switchboard>,
    pub target: String,
}

#[async_trait::async_trait]
impl Player for Saboteur {
    async fn decide(&mut self, view: &View) -> String {
        self.board.sever(&self.target).await;
        self.inner.decide(view).await
    }
    async fn nominate(&mut self, names: &[String]) -> Option<String> {
        self.inner.nominate(names).await
    }
    async fn notify(&mut self, event: &Event) {
        self.inner.notify(event).await
    }
}

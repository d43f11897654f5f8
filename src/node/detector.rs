use super::*;
use crate::PONG;
use crate::players::Event;
use crate::rpc::Service;
use futures::FutureExt;
use futures::future::BoxFuture;

/// Flood-style failure detection.
impl Node {
    pub(super) fn spawn_detector(&self) {
        if let Some(node) = self.this.upgrade() {
            tokio::spawn(async move { node.detect_failures().await });
        }
    }

    /// Pings every other member and evicts whoever does not answer with
    /// the liveness token.
    pub async fn detect_failures(&self) {
        let others = self.state.lock().await.directory.others();
        let pings = others.into_iter().map(|peer| async move {
            let alive = matches!(self.stub(&peer).ping().await, Ok(token) if token == PONG);
            (peer, alive)
        });
        for (peer, alive) in futures::future::join_all(pings).await {
            if !alive {
                self.evict(peer.name()).await;
            }
        }
    }

    /// Removes `name` from the directory and the round, then tells the
    /// survivors. A survivor that cannot be told is evicted in turn.
    /// Evicting an absent member does nothing.
    pub fn evict<'a>(&'a self, name: &'a str) -> BoxFuture<'a, ()> {
        async move {
            let survivors = {
                let mut state = self.state.lock().await;
                match state.evict(name) {
                    true => state.directory.others(),
                    false => return,
                }
            };
            log::warn!("[{}] evicted {}", self.me.name(), name);
            self.notify(Event::Failed(name.to_string())).await;
            for peer in survivors {
                if let Err(e) = self.stub(&peer).peer_failed(name.to_string()).await {
                    log::debug!("[{}] {} missed the notice: {}", self.me.name(), peer, e);
                    self.evict(peer.name()).await;
                }
            }
        }
        .boxed()
    }
}

use super::*;
use crate::Address;
use crate::error::Error;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process transport. Routes requests straight to registered services,
/// so a whole table can run inside one runtime.
#[derive(Default)]
pub struct Switchboard {
    services: RwLock<HashMap<Address, Arc<dyn Service>>>,
}

impl Switchboard {
    pub async fn register(&self, addr: impl Into<Address>, service: Arc<dyn Service>) {
        self.services.write().await.insert(addr.into(), service);
    }
    /// Disconnects an address. Every later request to it is unreachable.
    pub async fn sever(&self, addr: &str) -> bool {
        self.services
            .write()
            .await
            .remove(addr)
            .inspect(|_| log::debug!("severed {}", addr))
            .is_some()
    }
    async fn resolve(&self, to: &Address) -> Result<Arc<dyn Service>> {
        self.services
            .read()
            .await
            .get(to)
            .cloned()
            .ok_or_else(|| Error::Unreachable(to.clone()))
    }
}

#[async_trait::async_trait]
impl Transport for Switchboard {
    async fn call(&self, to: &Address, request: Request) -> Result<Reply> {
        let service = self.resolve(to).await?;
        request.dispatch(service.as_ref()).await
    }
    async fn cast(&self, to: &Address, request: Request) -> Result<()> {
        let service = self.resolve(to).await?;
        let to = to.clone();
        tokio::spawn(async move {
            let op = request.name();
            if let Err(e) = request.dispatch(service.as_ref()).await {
                log::debug!("one-way {} to {} failed: {}", op, to, e);
            }
        });
        Ok(())
    }
}

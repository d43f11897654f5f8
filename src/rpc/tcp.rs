use super::*;
use crate::Address;
use crate::error::Error;
use crate::error::Result;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::net::TcpStream;

/// Newline-delimited JSON over TCP, one connection per request.
///
/// A request frame is an [`Envelope`]. Unless it is one-way the server
/// answers with a single `Result<Reply, Error>` frame and closes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tcp;

impl Tcp {
    /// Accepts connections forever, answering each with `service`.
    pub async fn listen(listener: TcpListener, service: Arc<dyn Service>) -> anyhow::Result<()> {
        log::info!("listening on {}", listener.local_addr()?);
        loop {
            let (stream, peer) = listener.accept().await?;
            let service = service.clone();
            tokio::spawn(async move {
                if let Err(e) = Self::answer(stream, service).await {
                    log::debug!("connection from {} dropped: {}", peer, e);
                }
            });
        }
    }

    async fn answer(stream: TcpStream, service: Arc<dyn Service>) -> anyhow::Result<()> {
        let (read, mut write) = stream.into_split();
        let mut line = String::new();
        BufReader::new(read).read_line(&mut line).await?;
        let (oneway, reply) = match serde_json::from_str::<Envelope>(&line) {
            Ok(envelope) => (
                envelope.oneway,
                envelope.request.dispatch(service.as_ref()).await,
            ),
            Err(e) => (false, Err(Error::Usage(format!("malformed frame: {}", e)))),
        };
        if let Err(ref e) = reply {
            log::debug!("answering with failure: {}", e);
        }
        if !oneway {
            let mut frame = serde_json::to_string(&reply)?;
            frame.push('\n');
            write.write_all(frame.as_bytes()).await?;
            write.shutdown().await?;
        }
        Ok(())
    }

    async fn exchange(to: &Address, envelope: &Envelope) -> std::io::Result<Option<String>> {
        let stream = TcpStream::connect(to.as_str()).await?;
        let (read, mut write) = stream.into_split();
        let mut frame = serde_json::to_string(envelope)?;
        frame.push('\n');
        write.write_all(frame.as_bytes()).await?;
        write.flush().await?;
        if envelope.oneway {
            return Ok(None);
        }
        let mut line = String::new();
        BufReader::new(read).read_line(&mut line).await?;
        Ok(Some(line))
    }
}

#[async_trait::async_trait]
impl Transport for Tcp {
    async fn call(&self, to: &Address, request: Request) -> Result<Reply> {
        let envelope = Envelope {
            oneway: false,
            request,
        };
        let line = Self::exchange(to, &envelope)
            .await
            .inspect_err(|e| log::debug!("{} to {} failed: {}", envelope.request.name(), to, e))
            .ok()
            .flatten()
            .ok_or_else(|| Error::Unreachable(to.clone()))?;
        serde_json::from_str::<std::result::Result<Reply, Error>>(&line)
            .map_err(|_| Error::Unreachable(to.clone()))?
    }
    async fn cast(&self, to: &Address, request: Request) -> Result<()> {
        let envelope = Envelope {
            oneway: true,
            request,
        };
        Self::exchange(to, &envelope)
            .await
            .map(|_| ())
            .map_err(|e| {
                log::debug!("{} to {} failed: {}", envelope.request.name(), to, e);
                Error::Unreachable(to.clone())
            })
    }
}

use super::*;
use crate::Address;
use crate::error::Result;

/// Moves requests between nodes.
///
/// Any call may fail with [`crate::Error::Unreachable`]. A `cast` only
/// reports whether the request was handed off; whatever the callee does
/// with it is never observed by the caller.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, to: &Address, request: Request) -> Result<Reply>;
    async fn cast(&self, to: &Address, request: Request) -> Result<()>;
}

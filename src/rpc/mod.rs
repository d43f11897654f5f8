mod memory;
mod protocol;
mod service;
mod stub;
mod tcp;
mod transport;

pub use memory::*;
pub use protocol::*;
pub use service::*;
pub use stub::*;
pub use tcp::*;
pub use transport::*;

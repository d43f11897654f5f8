pub mod directory;
pub use directory::*;

pub mod peer;
pub use peer::*;

pub mod topology;
pub use topology::*;

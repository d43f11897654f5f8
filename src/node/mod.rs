mod detector;
mod election;
mod handlers;
mod node;
mod orchestrator;
mod round;
mod state;

pub use node::*;
pub use round::*;
pub use state::*;

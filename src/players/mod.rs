mod decision;
mod event;
mod fish;
#[cfg(feature = "cli")]
mod human;
mod player;
mod script;
mod view;

pub use decision::*;
pub use event::*;
pub use fish::*;
#[cfg(feature = "cli")]
pub use human::*;
pub use player::*;
pub use script::*;
pub use view::*;

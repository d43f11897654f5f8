use super::event::*;
use super::view::*;

/// The decision source behind a node: a human at the console, a bot, or a
/// script in tests. The node asks it for betting decisions and referee
/// nominations and tells it what happens at the table.
///
/// Answers are free-form text. The referee parses them and re-prompts on
/// anything malformed.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Answer `pass`, `check` or `bet <amount>`.
    async fn decide(&mut self, view: &View) -> String;

    /// Name the next referee among `names`. `None` closes the table.
    async fn nominate(&mut self, names: &[String]) -> Option<String>;

    /// Receive notification of table events.
    async fn notify(&mut self, event: &Event);
}

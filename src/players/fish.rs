use super::*;
use rand::Rng;
use rand::seq::IndexedRandom;

/// CPU player that decides at random among plausible decisions and
/// nominates a random member. Never closes the table.
#[derive(Debug, Default)]
pub struct Fish;

#[async_trait::async_trait]
impl Player for Fish {
    async fn decide(&mut self, view: &View) -> String {
        let ref mut rng = rand::rng();
        let cap = view.balance.min(100);
        let call = view.bet.max(1);
        match (view.can_check(), rng.random_range(0..4u8), cap >= call) {
            (_, 0, _) => Decision::Pass,
            (true, 1 | 2, _) => Decision::Check,
            (_, _, true) => Decision::Bet(rng.random_range(call..=cap)),
            (_, _, false) => Decision::Pass,
        }
        .to_string()
    }
    async fn nominate(&mut self, names: &[String]) -> Option<String> {
        names.choose(&mut rand::rng()).cloned()
    }
    async fn notify(&mut self, event: &Event) {
        log::debug!("[fish] {}", event);
    }
}

use super::*;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

/// Everything a scripted player saw, shared with whoever holds a handle.
#[derive(Debug, Default)]
pub struct Record {
    pub events: Vec<Event>,
    pub prompts: usize,
    pub nominations: usize,
}

/// Cloneable handle onto a [`Script`]'s record.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Record>>);

impl Journal {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().map(|r| r.events.clone()).unwrap_or_default()
    }
    pub fn prompts(&self) -> usize {
        self.0.lock().map(|r| r.prompts).unwrap_or_default()
    }
    pub fn nominations(&self) -> usize {
        self.0.lock().map(|r| r.nominations).unwrap_or_default()
    }
    /// Accepted decisions in announcement order.
    pub fn decisions(&self) -> Vec<(String, Decision)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Decision(name, decision) => Some((name, decision)),
                _ => None,
            })
            .collect()
    }
    fn record<F>(&self, f: F)
    where
        F: FnOnce(&mut Record),
    {
        if let Ok(mut record) = self.0.lock() {
            f(&mut record)
        }
    }
}

/// Player that answers from fixed queues. Once the decisions run out it
/// passes, once the nominations run out it closes the table.
#[derive(Debug, Default)]
pub struct Script {
    decisions: VecDeque<String>,
    nominations: VecDeque<String>,
    journal: Journal,
}

impl Script {
    pub fn new<D, N>(decisions: D, nominations: N) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            decisions: decisions.into_iter().map(Into::into).collect(),
            nominations: nominations.into_iter().map(Into::into).collect(),
            journal: Journal::default(),
        }
    }
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

#[async_trait::async_trait]
impl Player for Script {
    async fn decide(&mut self, _: &View) -> String {
        self.journal.record(|r| r.prompts += 1);
        self.decisions
            .pop_front()
            .unwrap_or_else(|| Decision::Pass.to_string())
    }
    async fn nominate(&mut self, _: &[String]) -> Option<String> {
        self.journal.record(|r| r.nominations += 1);
        self.nominations.pop_front()
    }
    async fn notify(&mut self, event: &Event) {
        let event = event.clone();
        self.journal.record(move |r| r.events.push(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    fn view() -> View {
        View {
            name: "bot".into(),
            phase: Phase::FlopBetting,
            hole: None,
            board: vec![],
            pot: 0,
            bet: 0,
            balance: 100,
        }
    }

    #[tokio::test]
    async fn answers_in_order_then_passes() {
        let mut script = Script::new(["bet 10", "check"], Vec::<String>::new());
        let journal = script.journal();
        assert_eq!(script.decide(&view()).await, "bet 10");
        assert_eq!(script.decide(&view()).await, "check");
        assert_eq!(script.decide(&view()).await, "pass");
        assert_eq!(journal.prompts(), 3);
    }

    #[tokio::test]
    async fn closes_the_table_when_out_of_nominations() {
        let mut script = Script::new(Vec::<String>::new(), ["bob"]);
        let names = vec!["bob".to_string()];
        assert_eq!(script.nominate(&names).await, Some("bob".into()));
        assert_eq!(script.nominate(&names).await, None);
    }

    #[tokio::test]
    async fn journal_keeps_decisions() {
        let mut script = Script::default();
        let journal = script.journal();
        script.notify(&Event::Started).await;
        script
            .notify(&Event::Decision("alice".into(), Decision::Bet(10)))
            .await;
        assert_eq!(journal.events().len(), 2);
        assert_eq!(journal.decisions(), vec![("alice".into(), Decision::Bet(10))]);
    }
}

use super::*;
use colored::Colorize;
use dialoguer::Input;
use dialoguer::Select;

/// Console player. Prompts on the terminal and prints table events.
#[derive(Debug, Default)]
pub struct Human;

#[async_trait::async_trait]
impl Player for Human {
    async fn decide(&mut self, view: &View) -> String {
        let prompt = format!("{}\nyour decision (pass | check | bet <amount>)", view);
        tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(prompt)
                .validate_with(|i: &String| -> Result<(), String> {
                    Decision::try_from(i.as_str())
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .unwrap_or_else(|e| {
                    log::warn!("console input failed: {}", e);
                    Decision::Pass.to_string()
                })
        })
        .await
        .unwrap_or_else(|_| Decision::Pass.to_string())
    }
    async fn nominate(&mut self, names: &[String]) -> Option<String> {
        let items = names.to_vec();
        tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt("choose the next referee")
                .report(false)
                .items(&items)
                .default(0)
                .interact_opt()
                .ok()
                .flatten()
                .and_then(|i| items.get(i).cloned())
        })
        .await
        .ok()
        .flatten()
    }
    async fn notify(&mut self, event: &Event) {
        let line = event.to_string();
        match event {
            Event::Joined(_) | Event::Started => println!("{}", line.white()),
            Event::Referee(_) => println!("{}", line.cyan()),
            Event::Hole(_) | Event::Board(_) => println!("{}", line.yellow()),
            Event::Decision(..) => println!("{}", line.normal()),
            Event::Settled { .. } => println!("{}", line.green()),
            Event::Failed(_) => println!("{}", line.red()),
        }
    }
}

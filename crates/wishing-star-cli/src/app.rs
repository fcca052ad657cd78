use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use wishing_star_core::{CompletionGateway, StarError};

use crate::commands::{handle_command, CommandResult};

/// What to tell the user when a chat call fails, or `None` when the error
/// should abort the host instead.
pub fn failure_reply(err: &StarError) -> Option<String> {
    match err {
        StarError::RateLimitExceeded { retry_after_ms } => Some(format!(
            "I'm still catching my breath, please wish again in {:.1}s.",
            *retry_after_ms as f64 / 1000.0
        )),
        StarError::EmptyResponse | StarError::MalformedResponse(_) => {
            Some("Sorry, I couldn't come up with an answer this time.".to_string())
        }
        e if e.is_transport() => Some(format!("Sorry, I couldn't reach my wishing star: {e}")),
        _ => None,
    }
}

pub fn status_line(gateway: &CompletionGateway, user_id: u64) -> String {
    let turns = gateway.ledger(user_id).map(|l| l.len()).unwrap_or(0);
    let usage = gateway.usage();
    format!(
        "model: {} | user: {} | turns: {} | users: {} | requests: {} | tokens: {} prompt / {} completion",
        gateway.model(),
        user_id,
        turns,
        gateway.ledger_count(),
        usage.request_count,
        usage.total_prompt_tokens,
        usage.total_completion_tokens,
    )
}

async fn send(gateway: &mut CompletionGateway, user_id: u64, message: &str) -> Result<()> {
    match gateway.chat(message, user_id).await {
        Ok(reply) => println!("{reply}"),
        Err(e) => match failure_reply(&e) {
            Some(text) => {
                tracing::warn!("Chat request failed: {}", e);
                eprintln!("{text}");
            }
            None => return Err(e.into()),
        },
    }
    Ok(())
}

pub async fn run_single_prompt(
    gateway: &mut CompletionGateway,
    user_id: u64,
    prompt: &str,
) -> Result<()> {
    send(gateway, user_id, prompt).await
}

pub async fn run_repl(mut gateway: CompletionGateway, mut user_id: u64) -> Result<()> {
    eprintln!(
        "Chatting with {} as user {}. Type /help for commands.",
        gateway.persona().name(),
        user_id
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_command(line) {
            CommandResult::NotACommand => send(&mut gateway, user_id, line).await?,
            CommandResult::Message(text) => eprintln!("{text}"),
            CommandResult::Quit => break,
            CommandResult::SwitchUser(id) => {
                user_id = id;
                eprintln!("Now chatting as user {user_id}.");
            }
            CommandResult::Forget => {
                if gateway.forget(user_id) {
                    eprintln!("Forgot the conversation with user {user_id}.");
                } else {
                    eprintln!("Nothing to forget for user {user_id}.");
                }
            }
            CommandResult::ShowStatus => eprintln!("{}", status_line(&gateway, user_id)),
        }
    }

    Ok(())
}

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Continue the conversation as a different user id.
    SwitchUser(u64),
    /// Drop the current user's chat history.
    Forget,
    /// Show status (model, history length, token usage).
    ShowStatus,
    /// Not a command - send as a chat message.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    if !input.starts_with('/') {
        return CommandResult::NotACommand;
    }

    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/forget" | "/reset" => CommandResult::Forget,
        "/status" => CommandResult::ShowStatus,
        "/user" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /user <numeric-id>".into())
            } else {
                match arg.parse::<u64>() {
                    Ok(id) => CommandResult::SwitchUser(id),
                    Err(_) => CommandResult::Message(format!("Invalid user id: {arg}")),
                }
            }
        }
        _ => CommandResult::Message(format!(
            "Unknown command: {cmd}. Type /help for available commands."
        )),
    }
}

fn show_help() -> CommandResult {
    CommandResult::Message(
        "Wishing Star Commands:\n\
         \x20 /help, /h          Show this help\n\
         \x20 /user <id>         Chat as another user id\n\
         \x20 /forget, /reset    Drop the current user's history\n\
         \x20 /status            Show model, history and token usage\n\
         \x20 /quit, /exit, /q   Leave"
            .into(),
    )
}

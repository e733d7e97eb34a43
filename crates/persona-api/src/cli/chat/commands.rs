//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and drive the session controller: switching
//! personality, extracting memory, showing the comparison, and resetting the
//! conversation.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Show the personality catalog.
    Personas,
    /// Show (no argument) or switch the selected personality.
    Persona(Option<String>),
    /// Extract memory from the whole conversation.
    Extract,
    /// Show the last extracted memory.
    Memory,
    /// Show the before/after comparison from the last reply.
    Compare,
    /// Show the conversation so far.
    History,
    /// Show the memory the service has stored for this user.
    Stored,
    /// Clear the conversation, memory, and comparison.
    Reset,
    /// Clear the terminal screen.
    ClearScreen,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), Some(rest.trim()).filter(|a| !a.is_empty())),
        None => (trimmed.to_lowercase(), None),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/personas" | "/personalities" => ChatCommand::Personas,
        "/persona" | "/p" => ChatCommand::Persona(arg.map(str::to_string)),
        "/extract" | "/x" => ChatCommand::Extract,
        "/memory" | "/mem" => ChatCommand::Memory,
        "/compare" | "/cmp" => ChatCommand::Compare,
        "/history" => ChatCommand::History,
        "/stored" => ChatCommand::Stored,
        "/clear" | "/new" => ChatCommand::Reset,
        "/cls" => ChatCommand::ClearScreen,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/personas", "List available personalities"),
        ("/persona [id]", "Show or switch the personality"),
        ("/extract", "Extract memory from this conversation"),
        ("/memory", "Show the last extracted memory"),
        ("/compare", "Show default vs. persona reply"),
        ("/history", "Show the conversation so far"),
        ("/stored", "Show memory stored for your user"),
        ("/clear", "Start a new conversation"),
        ("/cls", "Clear the screen"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, desc) in rows {
        println!("  {}  {}", style(format!("{cmd:<14}")).cyan(), desc);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit. The personality can change at any time; it applies to the next message.")
            .dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_persona_with_and_without_id() {
        assert_eq!(
            parse("/persona therapist"),
            Some(ChatCommand::Persona(Some("therapist".to_string())))
        );
        assert_eq!(
            parse("/persona   Witty Friend "),
            Some(ChatCommand::Persona(Some("Witty Friend".to_string())))
        );
        assert_eq!(parse("/persona"), Some(ChatCommand::Persona(None)));
        assert_eq!(parse("/persona   "), Some(ChatCommand::Persona(None)));
    }

    #[test]
    fn test_parse_clear_vs_cls() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Reset));
        assert_eq!(parse("/new"), Some(ChatCommand::Reset));
        assert_eq!(parse("/cls"), Some(ChatCommand::ClearScreen));
    }

    #[test]
    fn test_parse_memory_commands() {
        assert_eq!(parse("/extract"), Some(ChatCommand::Extract));
        assert_eq!(parse("/memory"), Some(ChatCommand::Memory));
        assert_eq!(parse("/stored"), Some(ChatCommand::Stored));
        assert_eq!(parse("/compare"), Some(ChatCommand::Compare));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse("/EXIT"), Some(ChatCommand::Exit));
        assert_eq!(parse("  /Quit  "), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("I use a/b testing"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo bar"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}

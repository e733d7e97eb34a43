//! Welcome banner shown when a chat session starts.

use console::style;

use persona_core::personality::Personality;
use persona_types::message::MAX_MESSAGES;

/// Print the personality, service URL, and session id, plus a command hint.
pub fn print_welcome_banner(personality: &Personality, base_url: &str, session_id: &str) {
    println!();
    println!(
        "  {} {}",
        style("*").cyan(),
        style("Persona Chat").cyan().bold()
    );
    println!(
        "  {}",
        style("Chat with AI personalities that remember what matters to you").dim()
    );
    println!();
    println!(
        "  {}  {} {}",
        style("Persona:").bold(),
        style(personality.name).cyan(),
        style(format!("({})", personality.description)).dim()
    );
    println!(
        "  {}  {}",
        style("Service:").bold(),
        style(base_url).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!(
        "  {}    {}",
        style("Limit:").bold(),
        style(format!("{MAX_MESSAGES} messages per conversation")).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

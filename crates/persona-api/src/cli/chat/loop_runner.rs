//! Main chat loop orchestration.
//!
//! Reads input, dispatches slash commands, and routes messages through the
//! [`SessionController`]. The spinner runs for exactly as long as the
//! controller reports busy. After each reply the comparison and memory panels
//! are printed unless the session runs with `--quiet`.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use persona_core::personality::{self, Personality};
use persona_core::service::PersonaService;
use persona_core::session::{SessionController, SessionState};
use persona_types::error::SessionError;
use persona_types::message::{MAX_MESSAGES, MessageRole};

use crate::cli::memory::{print_memory_view, print_stored_memory, total_memory_line};
use crate::cli::personality::personality_table;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, accent_color, format_reply_panels};

/// Longest history line before it is cut with an ellipsis.
const HISTORY_PREVIEW_CHARS: usize = 100;

/// Run the interactive chat loop.
///
/// With `show_panels`, every successful reply is followed by the before/after
/// comparison and the extracted memory.
pub async fn run_chat_loop(
    state: &AppState,
    personality_id: Option<&str>,
    show_panels: bool,
) -> anyhow::Result<()> {
    let initial = match personality_id {
        Some(id) => personality::find(id).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown personality '{id}'. Available: {}",
                catalog_ids()
            )
        })?,
        None => personality::default_personality(),
    };

    let controller = SessionController::new(state.client.clone(), state.config.user_id.clone());
    controller.select_personality(initial);

    print_welcome_banner(
        initial,
        state.client.base_url(),
        &controller.session_id().to_string(),
    );

    let mut renderer = ChatRenderer::new(accent_color(initial));
    let (mut chat_input, _writer) = ChatInput::new(prompt_for(&controller.snapshot()))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        chat_input.update_prompt(&prompt_for(&controller.snapshot()));

        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        let Some(cmd) = commands::parse(&text) else {
            send(&controller, &renderer, &text, show_panels).await;
            continue;
        };

        match cmd {
            ChatCommand::Help => commands::print_help(),
            ChatCommand::Personas => {
                let selected = controller.snapshot().selected_personality();
                println!();
                println!("{}", personality_table(Some(selected)));
                println!();
            }
            ChatCommand::Persona(None) => {
                let current = controller.snapshot().selected_personality();
                println!(
                    "\n  {} {} {}\n",
                    style("Current personality:").dim(),
                    style(current.name).cyan().bold(),
                    style(format!("({})", current.id)).dim()
                );
            }
            ChatCommand::Persona(Some(id)) => match personality::find(&id) {
                Some(p) => {
                    controller.select_personality(p);
                    renderer.set_accent(accent_color(p));
                    println!(
                        "\n  {} Now chatting with {}\n",
                        style("*").cyan().bold(),
                        style(p.name).cyan().bold()
                    );
                }
                None => {
                    println!(
                        "\n  {} Unknown personality: {}. Available: {}\n",
                        style("?").yellow().bold(),
                        style(&id).dim(),
                        catalog_ids()
                    );
                }
            },
            ChatCommand::Extract => {
                let snapshot = controller.snapshot();
                if !snapshot.can_extract() {
                    print_session_error(&if snapshot.is_busy() {
                        SessionError::Busy
                    } else {
                        SessionError::NothingToExtract
                    });
                    continue;
                }
                let spinner = start_spinner("extracting memory...");
                let result = controller.extract_memory().await;
                spinner.finish_and_clear();
                match result {
                    Ok(response) => {
                        print_memory_view(&controller.snapshot().memory_view());
                        if let Some(total) = &response.total_memory {
                            println!(
                                "  {}\n",
                                style(total_memory_line(controller.user_id(), total)).dim()
                            );
                        }
                    }
                    Err(e) => print_session_error(&e),
                }
            }
            ChatCommand::Memory => print_memory_view(&controller.snapshot().memory_view()),
            ChatCommand::Compare => match controller.snapshot().comparison_view() {
                Some(view) => renderer.print_comparison(&view),
                None => println!(
                    "\n  {}\n",
                    style("No comparison yet. Send a message first.").dim()
                ),
            },
            ChatCommand::History => print_history(&controller.snapshot()),
            ChatCommand::Stored => {
                let spinner = start_spinner("loading stored memory...");
                let result = state.client.stored_memory(controller.user_id()).await;
                spinner.finish_and_clear();
                match result {
                    Ok(stored) => print_stored_memory(controller.user_id(), stored.as_ref()),
                    Err(e) => {
                        debug!(error = %e, "Stored memory lookup failed");
                        eprintln!(
                            "\n  {} Could not load stored memory: {e}\n",
                            style("!").red().bold()
                        );
                    }
                }
            }
            ChatCommand::Reset if !controller.snapshot().can_clear() => {
                print_session_error(&SessionError::Busy)
            }
            ChatCommand::Reset => match controller.clear() {
                Ok(()) => println!(
                    "\n  {} Conversation cleared. Still chatting with {}.\n",
                    style("*").cyan().bold(),
                    style(controller.snapshot().selected_personality().name).cyan()
                ),
                Err(e) => print_session_error(&e),
            },
            ChatCommand::ClearScreen => chat_input.clear(),
            ChatCommand::Exit => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            ChatCommand::Unknown(name) => {
                println!(
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                );
            }
        }
    }

    Ok(())
}

async fn send<S: PersonaService>(
    controller: &SessionController<S>,
    renderer: &ChatRenderer,
    text: &str,
    show_panels: bool,
) {
    let snapshot = controller.snapshot();
    if !snapshot.can_send() {
        print_session_error(&if snapshot.is_busy() {
            SessionError::Busy
        } else {
            SessionError::conversation_full()
        });
        return;
    }

    let personality = snapshot.selected_personality();
    let spinner = start_spinner(&format!("{} is thinking...", personality.name));
    let result = controller.send_message(text).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            renderer.print_reply(personality, &response.response);
            if show_panels {
                let after = controller.snapshot();
                print!(
                    "{}",
                    format_reply_panels(after.comparison_view().as_ref(), &after.memory_view())
                );
            }
        }
        Err(e) => print_session_error(&e),
    }
}

/// `[n/30] You > `. The count turns yellow once no further exchange fits and
/// red at the cap.
fn prompt_for(state: &SessionState) -> String {
    let count = format!("[{}/{MAX_MESSAGES}]", state.message_count());
    let count = if state.is_full() {
        style(count).red()
    } else if !state.can_send() {
        style(count).yellow()
    } else {
        style(count).dim()
    };
    format!("  {} {} ", count, style("You >").green().bold())
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print a failed or refused operation to stderr.
fn print_session_error(error: &SessionError) {
    eprint!("{}", format_session_error(error));
}

/// Validation refusals get a yellow one-liner; remote failures a red notice
/// with the underlying cause and a retry hint.
fn format_session_error(error: &SessionError) -> String {
    match error {
        SessionError::ConversationFull { max } => format!(
            "\n  {} Conversation is full ({max} messages). Use /clear to start a new one.\n\n",
            style("!").yellow().bold()
        ),
        SessionError::NothingToExtract => format!(
            "\n  {} Send a message first; there is nothing to extract yet.\n\n",
            style("!").yellow().bold()
        ),
        e if e.is_validation() => format!("\n  {} {e}\n\n", style("!").yellow().bold()),
        e => {
            let mut out = format!(
                "\n  {} {}\n",
                style("!").red().bold(),
                capitalize(&e.to_string())
            );
            if let Some(cause) = std::error::Error::source(e) {
                out.push_str(&format!("  {}\n", style(cause.to_string()).dim()));
            }
            out.push_str(&format!(
                "  {}\n\n",
                style("Type a message to retry, /exit to quit.").dim()
            ));
            out
        }
    }
}

fn print_history(state: &SessionState) {
    println!();
    if state.messages().is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return;
    }

    let assistant = state.selected_personality().name;
    for msg in state.messages() {
        let label = match msg.role {
            MessageRole::User => style("You").green().bold(),
            MessageRole::Assistant => style(assistant).cyan().bold(),
        };
        println!("  {} {}", label, preview(&msg.content));
    }
    println!();
    println!(
        "  {}",
        style(format!("{}/{MAX_MESSAGES} messages", state.message_count())).dim()
    );
    println!();
}

fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > HISTORY_PREVIEW_CHARS {
        let cut: String = flat.chars().take(HISTORY_PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn catalog_ids() -> String {
    personality::all()
        .iter()
        .map(|p: &Personality| p.id)
        .collect::<Vec<_>>()
        .join(", ")
}

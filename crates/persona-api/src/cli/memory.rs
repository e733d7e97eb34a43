//! Memory display: the session's extracted memory and the service's stored
//! memory for a user.

use anyhow::Result;
use console::style;

use persona_core::memory::view::{MemoryItemView, MemoryView};
use persona_types::memory::StoredMemory;

use crate::state::AppState;

/// `persona memory`: fetch and print the stored memory for the configured user.
pub async fn show_stored_memory(state: &AppState, json: bool) -> Result<()> {
    let user_id = &state.config.user_id;
    let stored = state.client.stored_memory(user_id).await?;

    if json {
        let value = match &stored {
            Some(stored) => serde_json::to_value(stored)?,
            None => serde_json::Value::Null,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_stored_memory(user_id, stored.as_ref());
    Ok(())
}

/// Print stored memory with its header line.
pub fn print_stored_memory(user_id: &str, stored: Option<&StoredMemory>) {
    println!();
    println!(
        "  {} Stored memory for {}",
        style("🧠").bold(),
        style(user_id).cyan()
    );
    match stored {
        None => {
            println!();
            println!("  {}", style("No memory found for this user.").dim());
            println!();
        }
        Some(stored) if stored.memory.is_empty() => {
            println!();
            println!("  {}", style("Stored memory is empty.").dim());
            println!();
        }
        Some(stored) => {
            if let Some(updated_at) = stored.updated_at {
                println!(
                    "  {}",
                    style(format!("Updated {}", updated_at.format("%Y-%m-%d %H:%M"))).dim()
                );
            }
            print_memory_view(&MemoryView::from(Some(&stored.memory)));
        }
    }
}

/// Print a memory view: a notice when there is nothing to show, otherwise one
/// block per non-empty section.
pub fn print_memory_view(view: &MemoryView) {
    println!();
    print!("{}", format_memory_view(view));
}

/// Render a memory view as indented terminal lines, ending with a blank line.
pub fn format_memory_view(view: &MemoryView) -> String {
    let mut out = String::new();
    match view {
        MemoryView::Absent | MemoryView::Empty => {
            out.push_str(&format!("  {}\n\n", style(view.notice().unwrap_or_default()).dim()));
        }
        MemoryView::Sections(sections) => {
            for section in sections {
                out.push_str(&format!(
                    "  {}\n",
                    style(section.kind.title()).bold().underlined()
                ));
                for item in &section.items {
                    push_item(&mut out, item);
                }
                out.push('\n');
            }
        }
    }
    out
}

/// One-line summary of the service's accumulated memory after an extraction.
pub fn total_memory_line(user_id: &str, total: &StoredMemory) -> String {
    let count = total.memory.item_count();
    let noun = if count == 1 { "item" } else { "items" };
    format!("{count} memory {noun} stored in total for {user_id}")
}

fn push_item(out: &mut String, item: &MemoryItemView) {
    out.push_str(&format!("    {} {}\n", style("•").cyan(), item.headline));
    for detail in &item.details {
        out.push_str(&format!("      {}\n", style(detail).dim()));
    }
    if let Some(context) = &item.context {
        out.push_str(&format!(
            "      {}\n",
            style(format!("Context: {context}")).dim().italic()
        ));
    }
}

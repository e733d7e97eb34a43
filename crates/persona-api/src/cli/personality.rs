//! Personality catalog listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use persona_core::personality::{self, Personality};

/// `persona personalities`: print the catalog as a table or JSON.
pub fn list_personalities(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(personality::all())?);
        return Ok(());
    }

    println!();
    println!("{}", personality_table(None));
    println!();
    println!(
        "  {} {}",
        style("Default:").dim(),
        style(personality::default_personality().id).cyan()
    );
    println!();
    Ok(())
}

/// Build the catalog table, marking `selected` with a bullet.
pub fn personality_table(selected: Option<&Personality>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for p in personality::all() {
        let marker = if selected.is_some_and(|s| s.id == p.id) {
            Cell::new("●").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            marker,
            Cell::new(p.id).fg(Color::Cyan),
            Cell::new(p.name).fg(Color::White),
            Cell::new(p.description),
        ]);
    }

    table
}

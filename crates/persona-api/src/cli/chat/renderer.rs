//! Terminal rendering of replies and the comparison panel.
//!
//! Replies are markdown rendered through `termimad`, tinted with an accent
//! color per personality. The comparison is a two-column `comfy-table`; it and
//! the extracted memory follow each reply as the reply panels.

use comfy_table::{Cell, ContentArrangement, Table, presets};
use console::style;
use crossterm::style::Color;
use termimad::MadSkin;

use persona_core::comparison::ComparisonView;
use persona_core::memory::view::MemoryView;
use persona_core::personality::Personality;

use crate::cli::memory::format_memory_view;

/// Accent color for a personality's name and markdown emphasis.
pub fn accent_color(personality: &Personality) -> Color {
    match personality.id {
        "calm_mentor" => Color::Cyan,
        "witty_friend" => Color::Yellow,
        "therapist" => Color::Magenta,
        _ => Color::Green,
    }
}

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new(accent: Color) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        let mut renderer = Self { skin };
        renderer.set_accent(accent);
        renderer
    }

    /// Re-tint headers and bold text, e.g. after a personality switch.
    pub fn set_accent(&mut self, accent: Color) {
        let tc = crossterm_to_termimad(accent);
        self.skin.bold.set_fg(tc);
        self.skin.headers[0].set_fg(tc);
        self.skin.headers[1].set_fg(tc);
    }

    /// Render a markdown reply for the terminal.
    pub fn render_final(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print an assistant reply under the personality's name.
    pub fn print_reply(&self, personality: &Personality, reply: &str) {
        println!();
        println!(
            "  {}",
            style(personality.name)
                .fg(console_color(accent_color(personality)))
                .bold()
        );
        for line in self.render_final(reply).lines() {
            println!("  {line}");
        }
        println!();
    }

    /// Print the before/after comparison side by side.
    pub fn print_comparison(&self, view: &ComparisonView) {
        println!();
        println!("{}", comparison_table(view));
        println!();
    }
}

/// Build the two-column before/after table.
pub fn comparison_table(view: &ComparisonView) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new(view.before_title).fg(comfy_table::Color::DarkGrey),
        Cell::new(&view.after_title).fg(comfy_table::Color::Cyan),
    ]);
    table.add_row(vec![Cell::new(&view.before), Cell::new(&view.after)]);

    table
}

/// The output printed after a reply: the comparison table (when the reply
/// carried one) and the extracted memory under a `Memory` heading.
pub fn format_reply_panels(comparison: Option<&ComparisonView>, memory: &MemoryView) -> String {
    let mut out = String::new();
    if let Some(view) = comparison {
        out.push_str(&format!("{}\n\n", comparison_table(view)));
    }
    out.push_str(&format!("  {}\n", style("Memory").bold()));
    out.push_str(&format_memory_view(memory));
    out
}

/// Convert a crossterm Color to termimad's re-exported crossterm Color.
fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
    match color {
        Color::Cyan => termimad::crossterm::style::Color::Cyan,
        Color::Green => termimad::crossterm::style::Color::Green,
        Color::Yellow => termimad::crossterm::style::Color::Yellow,
        Color::Magenta => termimad::crossterm::style::Color::Magenta,
        Color::Blue => termimad::crossterm::style::Color::Blue,
        Color::Red => termimad::crossterm::style::Color::Red,
        Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
        _ => termimad::crossterm::style::Color::Cyan,
    }
}

fn console_color(color: Color) -> console::Color {
    match color {
        Color::Cyan => console::Color::Cyan,
        Color::Green => console::Color::Green,
        Color::Yellow => console::Color::Yellow,
        Color::Magenta => console::Color::Magenta,
        Color::Blue => console::Color::Blue,
        Color::Red => console::Color::Red,
        _ => console::Color::White,
    }
}

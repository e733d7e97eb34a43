//! CLI command definitions for the `persona` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod memory;
pub mod personality;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with AI personalities and see what they remember about you.
#[derive(Parser)]
#[command(name = "persona", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Persona service base URL (overrides config.toml).
    #[arg(long, global = true, env = "PERSONA_API_URL")]
    pub api_url: Option<String>,

    /// User id sent with every request (overrides config.toml).
    #[arg(long, global = true, env = "PERSONA_USER_ID")]
    pub user: Option<String>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Personality to start with (e.g. calm_mentor, witty_friend, therapist).
        #[arg(short, long)]
        personality: Option<String>,
    },

    /// List the available personalities.
    #[command(alias = "ls")]
    Personalities,

    /// Show the memory the service has stored for the user.
    Memory,

    /// Check that the persona service is reachable.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

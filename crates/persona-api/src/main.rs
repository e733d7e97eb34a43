//! Persona CLI entry point.
//!
//! Binary name: `persona`
//!
//! Parses CLI arguments, loads the client configuration, then dispatches to
//! the interactive chat or one of the one-shot commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = persona_observe::filter_for_verbosity(cli.verbose, cli.quiet);
    persona_observe::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    persona_observe::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions and the catalog don't need a client
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "persona", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Personalities => {
            return cli::personality::list_personalities(cli.json);
        }
        _ => {}
    }

    let state = AppState::init(cli.api_url.clone(), cli.user.clone()).await?;

    match cli.command {
        Commands::Chat { personality } => {
            cli::chat::loop_runner::run_chat_loop(&state, personality.as_deref(), !cli.quiet)
                .await?;
        }
        Commands::Memory => {
            cli::memory::show_stored_memory(&state, cli.json).await?;
        }
        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }
        Commands::Completions { .. } | Commands::Personalities => unreachable!("handled above"),
    }

    Ok(())
}

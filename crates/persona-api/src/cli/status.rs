//! Service status command.

use std::time::Instant;

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// `persona status`: ping the service and show the client configuration.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let started = Instant::now();
    let health = state.client.health().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "base_url": state.client.base_url(),
            "user_id": state.config.user_id,
            "data_dir": state.data_dir.display().to_string(),
            "reachable": health.is_ok(),
            "message": health.as_ref().ok().map(|s| s.message.clone()),
            "error": health.as_ref().err().map(|e| e.to_string()),
            "latency_ms": latency_ms,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Persona v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Service ──").dim());
    println!("  URL:      {}", style(state.client.base_url()).cyan());
    match &health {
        Ok(s) => {
            println!(
                "  Status:   {} {}",
                style("● reachable").green(),
                style(format!("({latency_ms} ms)")).dim()
            );
            println!("  Message:  {}", style(&s.message).dim());
        }
        Err(e) => {
            println!("  Status:   {}", style("○ unreachable").red());
            println!("  Error:    {}", style(e).dim());
        }
    }
    println!();

    println!("  {}", style("── Client ──").dim());
    println!("  User:     {}", style(&state.config.user_id).bold());
    println!("  Timeout:  {}s", state.config.request_timeout_secs);
    println!("  Data:     {}", style(state.data_dir.display()).dim());
    println!();

    Ok(())
}

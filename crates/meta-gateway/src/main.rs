//! meta-gateway main binary
//!
//! Minimal tool-calling host over stdio: one JSON object per input line
//! (`{"tool": name, "arguments": {...}}`), one JSON envelope per output
//! line. `{"tool": "list_tools"}` advertises the registered tools with
//! their input schemas. Logs go to stderr as JSON so stdout stays clean
//! for the protocol.

use std::sync::Arc;

use meta_gateway::{register_tools, MetaClient};
use serde_json::{json, Value as JsonValue};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use meta_core::{ErrorEnvelope, MetaError, Settings, ToolManager};

/// Run mode
enum RunMode {
    /// Serve tool calls over stdio
    Serve,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("meta-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Serve => {}
    }

    // Load .env file
    dotenvy::dotenv().ok();

    let settings = Settings::load().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    // stdout carries the tool protocol; logs must stay on stderr.
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    tracing::info!(demo_mode = settings.demo_mode, "starting meta-gateway");

    let client = Arc::new(MetaClient::new(settings));
    let mut manager = ToolManager::new();
    register_tools(&mut manager, client);

    tracing::info!(
        tools = ?manager.tool_names(),
        "registered {} tools",
        manager.len()
    );

    serve_stdio(manager).await
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }
    RunMode::Serve
}

/// Print help message
fn print_help() {
    println!("meta-gateway - Meta platform tool gateway");
    println!();
    println!("Usage:");
    println!("  meta-gateway           Serve tool calls over stdio");
    println!("                         ({{\"tool\": \"list_tools\"}} lists the tools)");
    println!("  meta-gateway --help    Show this help message");
    println!("  meta-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  FACEBOOK_PAGE_ACCESS_TOKEN  Facebook Page token");
    println!("  INSTAGRAM_ACCESS_TOKEN      Instagram token");
    println!("  WHATSAPP_ACCESS_TOKEN       WhatsApp Cloud token");
    println!("  WHATSAPP_PHONE_NUMBER_ID    WhatsApp phone number id");
    println!("  META_API_VERSION            Graph API version (default: v21.0)");
    println!("  DEMO_MODE                   Use the mock adapter everywhere");
    println!("  LOG_LEVEL                   Log level filter (default: info)");
}

/// Read tool calls from stdin line by line and answer on stdout.
async fn serve_stdio(manager: ToolManager) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = handle_line(&manager, line).await;
        let serialized = serde_json::to_string(&output)?;
        stdout.write_all(serialized.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

async fn handle_line(manager: &ToolManager, line: &str) -> JsonValue {
    let call: JsonValue = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            let err = MetaError::validation(format!("Invalid tool call: {e}"));
            return json!(ErrorEnvelope::new(&err, None));
        }
    };

    let Some(tool) = call["tool"].as_str() else {
        let err = MetaError::validation("Tool call must carry a 'tool' name");
        return json!(ErrorEnvelope::new(&err, None));
    };

    if tool == "list_tools" {
        return json!({"tools": manager.definitions()});
    }

    let arguments = call.get("arguments").cloned().unwrap_or(json!({}));

    manager.execute(tool, arguments).await.output
}

//! request-gate
//!
//! Serves a declared route table with schema-checked request fields and
//! uniform JSON responses.
//!
//! ```text
//!     Client Request
//!     ─────────────▶ axum router ─▶ validate body/query ─▶ handler
//!                                          │                  │
//!     Client Response                      ▼ UserError        ▼ Ok / Err
//!     ◀───────────── 200 result | 400/500 {"result":"failure",...}
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_gate::api::HandlerRegistry;
use request_gate::lifecycle::{startup, Shutdown};
use request_gate::observability::init_logging;

#[derive(Parser)]
#[command(name = "request-gate")]
#[command(about = "Schema-checked JSON API gateway", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Validate the configuration, print the route table and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = startup::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind.to_string();
    }

    init_logging(&config.observability);
    tracing::info!("request-gate v{} starting", env!("CARGO_PKG_VERSION"));

    if cli.check {
        for route in &config.routes {
            println!("{:<7} {:<30} -> {}", route.method.to_uppercase(), route.endpoint, route.handler);
        }
    }

    let handlers = HandlerRegistry::with_builtins();
    let server = startup::build_server(config, &handlers)?;
    if cli.check {
        println!("Configuration OK");
        return Ok(());
    }

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

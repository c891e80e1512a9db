//! WebSocket chat hub server.
//!
//! Fans messages from each client out to every connected client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server -- --port 8080
//! ```

use std::path::PathBuf;

use clap::Parser;
use hearth_server::ServerConfig;
use hearth_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hearth-server", version, about = "In-memory WebSocket chat hub")]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Capacity of each client mailbox; messages are dropped for a client whose mailbox is full
    #[arg(long, default_value_t = hearth_server::usecase::DEFAULT_MAILBOX_CAPACITY)]
    mailbox_capacity: usize,

    /// Capacity of the hub event channel
    #[arg(long, default_value_t = hearth_server::usecase::DEFAULT_HUB_BUFFER)]
    hub_buffer: usize,

    /// Directory of static files served at `/`
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            mailbox_capacity: args.mailbox_capacity,
            hub_buffer: args.hub_buffer,
            static_dir: args.static_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = hearth_server::run(args.into()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

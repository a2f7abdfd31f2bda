use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use chatbot::{
    chat, constants, tui,
    web_server::{self, EchoResponder},
    ChatConfig, HttpBackend,
};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Chat with the backend.
    Chat {
        #[arg(long, env = "CHATBOT_URL", default_value_t = constants::CHAT_URL.clone(), help = "Chat endpoint to POST messages to.")]
        url: String,
        #[arg(long, help = "Line-by-line chat on stdin/stdout instead of the full-screen UI.")]
        plain: bool,
        #[arg(long, env = "CHATBOT_INSECURE", help = "Accept self-signed TLS certificates.")]
        insecure: bool,
        #[arg(long, default_value_t = constants::LOG_FILE.clone(), help = "Log file used while the full-screen UI is running.")]
        log_file: String,
    },
    /// Run the reference chat backend, which echoes every prompt.
    Serve {
        #[arg(long, default_value = constants::DEFAULT_SERVE_HOST, help = "Address to bind.")]
        host: String,
        #[arg(long, default_value_t = constants::DEFAULT_SERVE_PORT, help = "Port for the web server.")]
        port: u16,
    },
}

// Reads the log level from RUST_LOG (e.g. RUST_LOG=info,chatbot=debug).
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

// The TUI owns the terminal, so logs go to a file instead.
fn init_file_logging(path: &str) -> WorkerGuard {
    let path = std::path::Path::new(path);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| constants::DEFAULT_LOG_FILE.into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chatbot=info")),
        )
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for settings like CHATBOT_URL)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            url,
            plain,
            insecure,
            log_file,
        } => {
            let _guard = if plain {
                init_stderr_logging();
                None
            } else {
                Some(init_file_logging(&log_file))
            };

            let config = ChatConfig::new(url).accept_invalid_certs(insecure);
            info!(url = %config.url, insecure, "Starting chat session");
            let backend = HttpBackend::new(&config).context("Failed to build HTTP client")?;

            if plain {
                chat::run_line_chat(&backend, BufReader::new(tokio::io::stdin()), std::io::stdout())
                    .await
                    .context("Chat session failed")?;
            } else {
                tui::run(Arc::new(backend))
                    .await
                    .context("Chat session failed")?;
            }
        }
        Commands::Serve { host, port } => {
            init_stderr_logging();
            let ip = host
                .parse()
                .with_context(|| format!("Invalid host address: {}", host))?;
            let addr = SocketAddr::new(ip, port);
            info!("Starting chat backend on {}...", addr);
            web_server::start_web_server(addr, Arc::new(EchoResponder)).await?;
        }
    }

    Ok(())
}

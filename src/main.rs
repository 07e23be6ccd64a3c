use std::net::SocketAddr;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spotrelay::{
    config::{self, Config},
    error, info,
    server::{AppState, start_api_server},
    success, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the relay server
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub addr: Option<SocketAddr>,

    /// Open the login page in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    match config::load_env().await {
        Ok(paths) if paths.is_empty() => {
            warning!("No .env file found, using process environment only")
        }
        Ok(paths) => {
            for path in paths {
                info!("Loaded environment from {}", path.display());
            }
        }
        Err(e) => warning!("Cannot load environment. Err: {}", e),
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    // After load_env, so a RUST_LOG set in .env applies.
    init_tracing(&config.log_filter);

    let http = match reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
    {
        Ok(http) => http,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    let addr = opt.addr.unwrap_or(config.server_addr);
    let state = AppState::new(config, http);

    let login_url = format!("http://{addr}/login");
    success!("Starting relay on {}", addr);
    info!("Authorize at {}", login_url);

    if opt.open && webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    if let Err(e) = start_api_server(state, addr).await {
        error!("Server stopped with an error: {}", e);
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, warn};

use xtrec_backend::api::{self, AppState};
use xtrec_backend::config::AppConfig;
use xtrec_backend::email::{DisabledMailer, EmailSender, ResendMailer};
use xtrec_backend::store;

/// Backend service for the Xtrec marketing site
#[derive(Parser)]
#[command(name = "xtrec-backend")]
#[command(about = "Xtrec marketing site backend", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Override the listen port from configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        2 => "trace",
        _ => "trace,hyper=debug,tower=debug", // -vvv shows everything including dependencies
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(cli.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(cli.verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("Xtrec backend started with verbosity level: {}", cli.verbose);

    if let Err(e) = run(cli).await {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let store = store::create_store(&config.store);
    let mailer: Arc<dyn EmailSender> = match &config.resend_api_key {
        Some(key) => Arc::new(ResendMailer::new(key.clone())),
        None => {
            warn!("RESEND_API_KEY not set; email delivery disabled");
            Arc::new(DisabledMailer)
        }
    };

    let state = Arc::new(AppState {
        store,
        mailer,
        sender_email: config.sender_email.clone(),
    });

    api::serve(&config, state).await
}

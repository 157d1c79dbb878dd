use std::path::PathBuf;

use clap::Parser;

use folio::chat::{generate_fingerprint, ChatController, QuotaStore};
use folio::gemini::{GeminiClient, GeminiConfig};
use folio::profile::ProfileStore;
use folio::ui::{self, App};

#[derive(Parser)]
#[command(name = "folio", version, about = "A portfolio for your terminal")]
struct Cli {
    /// Path to the profile document (JSON or TOML)
    #[arg(default_value = "profile.json")]
    profile: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // Logs go to stderr; stdout belongs to the TUI
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting folio version {}", env!("CARGO_PKG_VERSION"));

    // A missing or invalid profile degrades the page instead of aborting
    let profile = ProfileStore::load(&cli.profile);
    if let Err(ref e) = profile {
        tracing::warn!("Profile unavailable: {}", e);
    }

    // Without a key the chat shows its fixed unavailable message
    let client = GeminiConfig::from_env().and_then(|config| match GeminiClient::new(config) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!("Gemini client disabled: {}", e);
            None
        }
    });

    let fingerprint = generate_fingerprint();
    let store = QuotaStore::open_default()?;
    let chat = ChatController::new(store, &fingerprint);

    let mut terminal = ui::init().map_err(|e| anyhow::anyhow!(e))?;
    let mut app = App::new(profile, client, chat);
    let result = app.run(&mut terminal);
    ui::restore().map_err(|e| anyhow::anyhow!(e))?;

    result.map_err(|e| anyhow::anyhow!(e))
}

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use mindmate::core::config::{self, EnvOverrides, MindmateConfig};
use mindmate::core::state::App;
use mindmate::service::{ChatService, HttpChatService};
use mindmate::tui;

#[derive(Parser)]
#[command(name = "mindmate", about = "Terminal companion for emotional support")]
struct Args {
    /// Base URL of the MindMate service (overrides config and MINDMATE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Where to write the log file
    #[arg(long, env = "MINDMATE_LOG_FILE", default_value = "mindmate.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Don't probe the service's /health endpoint at startup
    #[arg(long)]
    skip_health_check: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // File logger only: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match File::create(&args.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "Warning: could not open log file {}: {}",
            args.log_file.display(),
            e
        ),
    }

    info!("MindMate starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {}; using defaults", e);
            warn!("Failed to load config, using defaults: {}", e);
            MindmateConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, &EnvOverrides::from_env(), args.api_url.as_deref());
    debug!("Resolved config: {:?}", resolved);

    let service = HttpChatService::new(&resolved.base_url, resolved.request_timeout)
        .map_err(std::io::Error::other)?;
    info!(
        "Using {} service at {} (timeout {}s)",
        service.name(),
        service.base_url(),
        resolved.request_timeout.as_secs()
    );
    let app = App::from_config(Arc::new(service), &resolved);

    tui::run(app, &resolved, !args.skip_health_check)
}

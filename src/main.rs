use clap::Parser;
use concierge::LogLevel;
use concierge::core::config::{self, CliOverrides, ConciergeConfig, ConfigNote};
use concierge::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "concierge", about = "Browse hotels by city")]
struct Args {
    /// Backend base URL (default: http://127.0.0.1:8000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Log verbosity
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Log file path (default: concierge.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let mut notes = Vec::new();
    let file_config = match config::load_config(&mut notes) {
        Ok(c) => c,
        Err(e) => {
            notes.push(ConfigNote {
                level: log::Level::Warn,
                message: format!("{e}. Using defaults."),
            });
            ConciergeConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        log_level: args.log_level.map(Into::into),
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &cli, &mut notes);

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config was read before the logger existed
    for note in &notes {
        if note.level <= log::Level::Warn {
            eprintln!("Warning: {}", note.message);
        }
        log::log!(note.level, "{}", note.message);
    }

    log::info!("Concierge starting up against {}", resolved.base_url);

    tui::run(resolved)
}

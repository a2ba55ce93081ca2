use clap::Parser;
use monitora::StartScreen;
use monitora::core::config::{self, CliOverrides, ConfigNote};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "monitora", about = "Terminal client for the monitoring REST backend")]
struct Args {
    /// Backend base URL (overrides config file and MONITORA_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Screen to open on start
    #[arg(short, long, value_enum)]
    screen: Option<StartScreen>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Nothing can be logged until the log file is known; collect instead
    let mut notes: Vec<ConfigNote> = Vec::new();
    let file_config = match config::load_config(&mut notes) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Ignoring unreadable config: {e}");
            notes.push(ConfigNote {
                level: log::Level::Warn,
                message: format!("Ignoring unreadable config: {e}"),
            });
            config::MonitoraConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            start_screen: args.screen,
        },
        &mut notes,
    );

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
            for note in &notes {
                note.log();
            }
        }
        Err(e) => {
            eprintln!("Cannot open log file {}: {e}", resolved.log_file);
            for note in notes.iter().filter(|n| n.level <= log::Level::Warn) {
                eprintln!("{}", note.message);
            }
        }
    }

    log::info!(
        "Monitora starting up against {} (start screen: {:?})",
        resolved.base_url,
        resolved.start_screen
    );

    monitora::tui::run(resolved)
}

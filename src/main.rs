use calpick::{calendar, commands, config, tui};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "calpick")]
#[command(about = "Terminal date picker", long_about = "Terminal date picker\n\nIf no command is specified, the picker starts in interactive mode and prints the chosen date (YYYY-MM-DD) on exit.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Initial date in YYYY-MM-DD format (optional)
    #[arg(short, long)]
    date: Option<String>,

    /// Label shown above the input (optional, defaults to "Enter Date")
    #[arg(short = 'l', long)]
    label: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid
    Grid {
        /// Month 1-12 (optional, defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (optional, defaults to the current year)
        #[arg(short, long, allow_negative_numbers = true)]
        year: Option<i32>,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!();
    println!("[press]");
    println!("initial_delay_ms: {}", cfg.press.initial_delay_ms);
    println!("repeat_interval_ms: {}", cfg.press.repeat_interval_ms);
    println!();
    let labels = cfg.labels.calendar_labels();
    println!("[labels]");
    println!("weekdays: {}", labels.weekdays().join(", "));
    println!("months: {}", labels.months().join(", "));
    println!();
    println!("[theme]");
    println!("use_unicode: {}", cfg.theme.use_unicode);
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("today_fg: {:?}", cfg.theme.today_fg);
    println!("outside_month_fg: {:?}", cfg.theme.outside_month_fg);
    println!("pressed_fg: {:?}{}",
        cfg.theme.pressed_fg(),
        if cfg.theme.pressed_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Run the interactive picker and print the final value
async fn run_picker(config: &config::Config, date: Option<String>, label: Option<String>) -> anyhow::Result<()> {
    let initial = commands::parse_date_arg(date.as_deref())?;
    let value = initial.map(|d| calendar::to_iso_date(Some(d))).transpose()?;

    let result = tui::run(config, value.as_deref(), label).await?;
    println!("{}", result.unwrap_or_default());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let (config, config_error) = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }
    if let Some(e) = config_error {
        tracing::warn!("Using default configuration: {}", e);
    }

    let result = match cli.command {
        None => run_picker(&config, cli.date, cli.label).await,
        Some(Commands::Config) => {
            handle_config_command(&config);
            Ok(())
        }
        Some(Commands::Grid { month, year }) => commands::grid::run(month, year, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

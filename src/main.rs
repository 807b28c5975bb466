use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

use atlas::cli;
use atlas::config::{self, Theme};
use atlas::countries::RestCountriesClient;

#[derive(Parser)]
#[command(name = "atlas", about = "Country information client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every country
    List,
    /// Search countries by name (case-insensitive substring)
    Search { query: String },
    /// Show details for one country, by exact name
    Show { name: String },
    /// Show the current theme, or set a new one
    Theme {
        #[arg(value_enum)]
        theme: Option<Theme>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Atlas starting up");

    let loaded = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&loaded);

    // Theme get/set needs no network.
    if let Command::Theme { theme } = &args.command {
        return run_theme(*theme, resolved.theme);
    }

    let client = match RestCountriesClient::new(Some(resolved.base_url), resolved.timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Command::List => cli::list(&client).await,
        Command::Search { query } => cli::search(&client, &query).await,
        Command::Show { name } => cli::show(&client, &name).await,
        Command::Theme { .. } => unreachable!("handled above"),
    };

    match result {
        Ok(text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Command failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_theme(requested: Option<Theme>, current: Theme) -> ExitCode {
    match requested {
        None => {
            println!("{}", current.label());
            ExitCode::SUCCESS
        }
        Some(theme) => match config::store_theme(theme) {
            Ok(()) => {
                println!("Theme set to {}", theme.label());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

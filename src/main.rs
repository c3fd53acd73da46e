use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use food_scanner::commands::{with_spinner, CommandHandler};
use food_scanner::{FoodScanner, HttpGateway, ScannerConfig, ScannerError, StateStore, Tab};
use log::info;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Food health scanner", long_about = None)]
struct Args {
    /// Backend base URL (overrides FOOD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Size of the healthy-foods sample (overrides FOOD_HEALTHY_LIMIT)
    #[arg(long)]
    healthy_limit: Option<u32>,

    /// Tab to start in: search or scan
    #[arg(long, default_value = "search")]
    tab: Tab,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = ScannerConfig::from_env()?;
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(limit) = args.healthy_limit {
        config = config.with_healthy_limit(limit)?;
    }

    let gateway = HttpGateway::new(&config).context("Failed to set up the backend client")?;
    info!("Using backend at {}", gateway.base_url());

    let scanner = FoodScanner::new(
        Arc::new(gateway),
        Arc::new(StateStore::with_tab(args.tab)),
        config.healthy_limit,
    );
    with_spinner("Loading categories and healthy foods...", scanner.bootstrap()).await;

    let mut command_handler = CommandHandler::new(scanner);

    // Show initial help menu and the starting tab
    command_handler.handle_command("help").await.ok();
    command_handler.handle_command("show").await.ok();

    let mut rl = Editor::<(), DefaultHistory>::new().map_err(ScannerError::from)?;

    loop {
        match rl.readline("🥗 ") {
            Ok(line) => {
                let input = line.trim();
                if !input.is_empty() {
                    let _ = rl.add_history_entry(input);
                }

                if let Err(e) = command_handler.handle_command(input).await {
                    println!("{}", e.red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(ScannerError::from(err).into()),
        }
    }
    Ok(())
}

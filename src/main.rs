// main.rs
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use huizhen::cli::{self, Args, Commands};
use huizhen::config::Config;

fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::new(args.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "❌ 設定讀取失敗:".red().bold(), e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_filter.as_deref());
    config.report_fallback();
    if !config.color {
        colored::control::set_override(false);
    }

    let result = match args.command.unwrap_or_default() {
        Commands::Chat { hour, seed } => cli::handle_chat(config, hour, seed).await,
        Commands::Say { message, hour, seed, affection } => {
            cli::handle_say(config, &message, hour, seed, affection)
        }
        Commands::Schedule { hour } => cli::handle_schedule(&config, hour),
        Commands::Profile => cli::handle_profile(),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "❌ 錯誤:".red().bold(), e);
        std::process::exit(1);
    }
}

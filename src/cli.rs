use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use crate::clock::Clock;
use crate::config::Config;
use crate::core::{resolve, Affection, Session, SessionRandom, HUIZHEN};
use crate::display::SessionFormatter;
use crate::shell::ShellMode;

#[derive(Parser, Debug)]
#[command(name = "huizhen")]
#[command(about = "Chat with 惠貞, a scripted virtual companion", long_about = None)]
#[command(version)]
pub struct Args {
    /// Directory holding config.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Pretend the local hour is this (0-23)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
        /// Seed the random source for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Send one message to a fresh session and print the result
    Say {
        message: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Starting affection instead of the configured one
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
        affection: Option<i32>,
    },
    /// Show her daily routine
    Schedule {
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },
    /// Show her profile
    Profile,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Chat { hour: None, seed: None }
    }
}

pub async fn handle_chat(config: Config, hour: Option<u32>, seed: Option<u64>) -> Result<()> {
    let clock = Clock::pick(hour, config.fixed_hour).context("Invalid clock setting")?;
    let mut shell = ShellMode::new(config, clock, seed);
    shell.run().await
}

pub fn handle_say(
    config: Config,
    message: &str,
    hour: Option<u32>,
    seed: Option<u64>,
    affection: Option<i32>,
) -> Result<()> {
    let clock = Clock::pick(hour, config.fixed_hour).context("Invalid clock setting")?;
    let mut rng = SessionRandom::from_seed(seed);
    let mut session = Session::new(Affection::new(affection.unwrap_or(config.initial_affection)));
    session.seed_greeting(&mut rng);

    let Some(turn) = session.submit(message, clock.hour(), &mut rng) else {
        println!("{}", "Nothing to send.".yellow());
        return Ok(());
    };

    let view = session.view(turn.slot, clock.display());
    println!("{}", SessionFormatter::format_transcript(view.history, HUIZHEN.name));
    if config.show_feedback {
        if let Some(feedback) = turn.change.feedback {
            println!("{}", feedback.message().dimmed());
        }
    }
    println!();
    println!("{}", SessionFormatter::format_stage(&view, session.reference_images(), HUIZHEN.name));
    println!("{}", SessionFormatter::format_status(&view));
    Ok(())
}

pub fn handle_schedule(config: &Config, hour: Option<u32>) -> Result<()> {
    let clock = Clock::pick(hour, config.fixed_hour).context("Invalid clock setting")?;
    let hour = clock.hour();
    println!("{}", "惠貞的一天".cyan().bold());
    println!("{}", SessionFormatter::format_schedule(hour));
    println!("\n{} {}", "Now:".dimmed(), resolve(hour).description);
    Ok(())
}

pub fn handle_profile() -> Result<()> {
    println!("{}", SessionFormatter::format_profile(&HUIZHEN));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chat() {
        let args = Args::try_parse_from(["huizhen"]).unwrap();
        assert!(args.command.is_none());
        assert!(matches!(Commands::default(), Commands::Chat { hour: None, seed: None }));
    }

    #[test]
    fn test_say_args() {
        let args = Args::try_parse_from(["huizhen", "say", "村上春樹", "--hour", "21", "--seed", "3"]).unwrap();
        match args.command {
            Some(Commands::Say { message, hour, seed, affection }) => {
                assert_eq!(message, "村上春樹");
                assert_eq!(hour, Some(21));
                assert_eq!(seed, Some(3));
                assert_eq!(affection, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_hour_range_enforced() {
        assert!(Args::try_parse_from(["huizhen", "chat", "--hour", "24"]).is_err());
        assert!(Args::try_parse_from(["huizhen", "schedule", "--hour", "23"]).is_ok());
        assert!(Args::try_parse_from(["huizhen", "say", "hi", "--affection", "101"]).is_err());
    }

    #[test]
    fn test_global_config_dir() {
        let args = Args::try_parse_from(["huizhen", "profile", "--config-dir", "/tmp/hz"]).unwrap();
        assert_eq!(args.config_dir, Some(PathBuf::from("/tmp/hz")));
    }

    #[test]
    fn test_say_runs_without_error() {
        assert!(handle_say(Config::default(), "辛苦了", Some(21), Some(9), None).is_ok());
        assert!(handle_say(Config::default(), "   ", Some(21), None, Some(10)).is_ok());
    }
}

use anyhow::Result;
use colored::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::clock::Clock;
use crate::config::Config;
use crate::core::{resolve, Affection, ImageHandle, Profile, Session, SessionRandom, HUIZHEN};
use crate::display::SessionFormatter;

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive chat: owns one session from start to exit.
pub struct ShellMode {
    config: Config,
    clock: Clock,
    profile: Profile,
    session: Session,
    rng: SessionRandom,
}

impl ShellMode {
    pub fn new(config: Config, clock: Clock, seed: Option<u64>) -> Self {
        let session = Session::new(Affection::new(config.initial_affection));
        ShellMode {
            config,
            clock,
            profile: HUIZHEN,
            session,
            rng: SessionRandom::from_seed(seed),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(session = %self.session.id, clock = ?self.clock, "chat session started");

        println!("{}", format!("💬 {} Interactive Chat", self.profile.name).cyan().bold());
        println!("{}", "Type '/help' for commands, '/exit' to quit".dimmed());

        self.session.seed_greeting(&mut self.rng);
        self.render();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}", "> ".green().bold());
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!("\n{}", "再見。".cyan());
                break;
            };

            match self.handle_input(&line) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => println!("{}: {}", "Error".red().bold(), e),
            }
        }

        tracing::info!(
            session = %self.session.id,
            turns = self.session.history().len(),
            affection = self.session.affection().value(),
            "chat session ended"
        );
        Ok(())
    }

    /// Commands are recognised on the trimmed line; messages go through as typed.
    pub fn handle_input(&mut self, input: &str) -> Result<Flow> {
        match input.trim() {
            "" => {}
            "exit" | "quit" | "/exit" | "/quit" => {
                println!("{}", "再見。".cyan());
                return Ok(Flow::Exit);
            }
            "help" | "/help" => self.show_help(),
            command if command.starts_with('/') => self.execute_slash_command(command)?,
            _ => self.handle_message(input),
        }
        Ok(Flow::Continue)
    }

    fn show_help(&self) {
        println!("\n{}", "Commands:".yellow().bold());
        println!("  {} - Show this help", "/help".green());
        println!("  {} - Show affection, mood and routine", "/status".green());
        println!("  {} - Show her profile", "/profile".green());
        println!("  {} - Show her daily routine", "/schedule".green());
        println!("  {} - Load reference pictures (jpg/png)", "/upload <files...>".green());
        println!("  {} - Show the conversation so far", "/history".green());
        println!("  {} - Clear the screen", "/clear".green());
        println!("  {} - Leave", "/exit".green());
        println!("\n  Anything else is sent to {}.", self.profile.name);
    }

    fn execute_slash_command(&mut self, input: &str) -> Result<()> {
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();

        match command {
            "/status" => {
                let view = self.session.view(*resolve(self.clock.hour()), self.clock.display());
                println!("{}", SessionFormatter::format_status(&view));
            }
            "/profile" => println!("{}", SessionFormatter::format_profile(&self.profile)),
            "/schedule" => println!("{}", SessionFormatter::format_schedule(self.clock.hour())),
            "/upload" => self.upload(parts.collect()),
            "/history" => println!(
                "{}",
                SessionFormatter::format_transcript(self.session.history(), self.profile.name)
            ),
            "/clear" => {
                print!("\x1B[2J\x1B[1;1H");
                std::io::stdout().flush()?;
                self.render();
            }
            _ => {
                println!("{}: {}", "Unknown command".red().bold(), command);
                println!("Type '{}' for available commands", "/help".green());
            }
        }
        Ok(())
    }

    fn upload(&mut self, paths: Vec<&str>) {
        let mut accepted = Vec::new();
        for path in paths {
            match ImageHandle::from_path(path) {
                Ok(handle) => accepted.push(handle),
                Err(e) => {
                    tracing::warn!(path, "rejected upload");
                    println!("{} {}", "⚠️".yellow(), e);
                }
            }
        }

        if accepted.is_empty() {
            println!("{}", format!("請上傳圖片以生成「{}」", self.profile.name).yellow());
            return;
        }

        let count = accepted.len();
        if self.session.attach_images(accepted) {
            println!("{}", format!("已載入 {} 張圖片，神經渲染模型 Ready。", count).green());
            self.render();
        } else {
            println!("{}", "已經載入過參考圖片了。".yellow());
        }
    }

    fn handle_message(&mut self, text: &str) {
        let hour = self.clock.hour();
        if let Some(turn) = self.session.submit(text, hour, &mut self.rng) {
            println!(
                "{}",
                SessionFormatter::format_turn(&turn, self.profile.name, self.config.show_feedback)
            );
            self.render();
        }
    }

    fn render(&self) {
        println!("{}", self.screen());
    }

    /// Full redraw from the session: picture area, transcript, status panel.
    fn screen(&self) -> String {
        let view = self.session.view(*resolve(self.clock.hour()), self.clock.display());
        format!(
            "\n{}\n\n{}\n\n{}",
            SessionFormatter::format_stage(&view, self.session.reference_images(), self.profile.name),
            SessionFormatter::format_transcript(view.history, self.profile.name),
            SessionFormatter::format_status(&view)
        )
    }
}

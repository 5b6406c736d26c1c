// DailyUp - CLI entry point
// Commands: prompt, checkin, journal, profile, config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use daily_up::commands::{
    self, CheckInArgs, CheckInView, JournalView, ProfileArgs, PromptView,
};
use daily_up::{AppConfig, AppError, AppState, CommandResponse};
use daily_up_core::{CoreError, Profile, TimeSlot, Tone};

#[derive(Parser)]
#[command(name = "daily-up")]
#[command(version, about = "DailyUp - a tiny motivational coach for your day")]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an opening question and nudge for a check-in
    Prompt {
        /// morning, midday or evening (defaults to the current time)
        #[arg(short, long)]
        slot: Option<TimeSlot>,
    },

    /// Check in with a short note and get a three-step plan
    Checkin {
        /// morning, midday or evening (defaults to the current time)
        #[arg(short, long)]
        slot: Option<TimeSlot>,
        /// Override the profile tone for this check-in
        #[arg(short, long)]
        tone: Option<Tone>,
        /// How you feel and what is on your plate
        #[arg(required = true, trailing_var_arg = true)]
        note: Vec<String>,
    },

    /// List journal entries
    Journal {
        /// Show only the most recent N entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show or edit the coaching profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show,
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tone: Option<Tone>,
        /// Long-term goal (pass "" to clear)
        #[arg(long)]
        goal: Option<String>,
        /// Work or study context (pass "" to clear)
        #[arg(long)]
        work_context: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daily_up=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Commands::Prompt { slot } = &cli.command {
        let view = commands::get_prompt(slot.unwrap_or_else(commands::current_slot), &mut rand::thread_rng());
        return emit(json, Ok(view), print_prompt);
    }

    let state = AppState::new().context("Failed to initialize DailyUp")?;

    match cli.command {
        Commands::Prompt { .. } => Ok(()),
        Commands::Checkin { slot, tone, note } => {
            let args = CheckInArgs {
                note: note.join(" "),
                slot: slot.unwrap_or_else(commands::current_slot),
                tone,
            };
            let result = commands::run_checkin(&state, args).await;
            if let Err(AppError::Core(CoreError::EmptyInput(msg))) = &result {
                if !json {
                    eprintln!("Please write a short note first ({}).", msg);
                    std::process::exit(2);
                }
            }
            emit(json, result, print_checkin)
        }
        Commands::Journal { limit } => emit(json, commands::list_journal(&state, limit), print_journal),
        Commands::Profile { action } => match action {
            ProfileAction::Show => emit(json, Ok(commands::show_profile(&state).await), print_profile),
            ProfileAction::Set {
                name,
                tone,
                goal,
                work_context,
            } => {
                let args = ProfileArgs {
                    name,
                    tone,
                    goal,
                    work_context,
                };
                emit(json, commands::update_profile(&state, args).await, print_profile)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => emit(json, Ok(commands::show_config(&state).await), print_config),
            ConfigAction::Path => emit(json, Ok(commands::config_path(&state).await), print_path),
        },
    }
}

/// Print a command result as JSON envelope or human text.
fn emit<T: Serialize>(
    json: bool,
    result: Result<T, AppError>,
    render: fn(&T),
) -> Result<()> {
    if json {
        let failed = result.is_err();
        let response: CommandResponse<T> = result.into();
        println!("{}", serde_json::to_string_pretty(&response)?);
        if failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    let value = result?;
    render(&value);
    Ok(())
}

fn print_prompt(view: &PromptView) {
    println!("{}", view.nudge);
    println!();
    println!("{}: {}", view.title, view.question);
}

fn print_checkin(view: &CheckInView) {
    if let Some(notice) = view.notice {
        println!("[{}]", notice);
    }
    println!(
        "Mood: {} ({:+.2})   Topics: {}",
        view.sentiment.label, view.sentiment.score, view.topics
    );
    println!();
    println!("{}", view.analysis);
    println!();
    for (i, step) in view.plan_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
    println!("Mantra: {}", view.mantra);
}

fn print_journal(view: &JournalView) {
    if view.entries.is_empty() {
        println!("Journal is empty ({} backend).", view.backend);
        return;
    }
    for entry in &view.entries {
        let check_in = &entry.check_in;
        println!(
            "{}  {:<7}  {} ({:+.2})  [{}]",
            check_in.timestamp.format("%Y-%m-%d %H:%M"),
            check_in.time_slot,
            check_in.sentiment_label,
            check_in.sentiment_score,
            entry.response.source
        );
        println!("    {}", check_in.note);
        for step in &entry.response.plan_steps {
            println!("    - {}", step);
        }
        println!("    \"{}\"", entry.response.mantra);
    }
    println!(
        "\n{} of {} entries ({} backend)",
        view.entries.len(),
        view.total,
        view.backend
    );
}

fn print_profile(profile: &Profile) {
    println!("Name:         {}", profile.name);
    println!("Tone:         {}", profile.tone);
    println!("Goal:         {}", profile.goal.as_deref().unwrap_or("-"));
    println!("Work context: {}", profile.work_context.as_deref().unwrap_or("-"));
}

fn print_config(config: &AppConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render config: {}", e),
    }
}

#[allow(clippy::ptr_arg)]
fn print_path(path: &PathBuf) {
    println!("{}", path.display());
}

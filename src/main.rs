use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use aics_core::cards::field_label;
use aics_core::{
    Config, Conversation, Delivery, Message, ResponseCatalog, SubmitOutcome,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod form;
mod handler;
mod tui;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "aics")]
#[command(version)]
#[command(about = "Calling setup assistant: canned answers, setup checklist and forms in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive console (default)
    Tui,
    /// Ask one question and print the assistant's reply
    Ask {
        /// Your question
        #[arg(required = true)]
        text: Vec<String>,
        /// Print the resulting messages as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the response catalog in match order
    Topics,
    /// Print the setup checklist
    Steps,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A broken config file should not keep the assistant from starting
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::new(), Some(err)),
    };

    if let Err(err) = init_logging(&config) {
        eprintln!("{} logging disabled: {:#}", "warning:".yellow(), err);
    }
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "could not load config, using defaults");
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(config).await?,
        Commands::Ask { text, json } => ask(&text.join(" "), json)?,
        Commands::Topics => list_topics()?,
        Commands::Steps => list_steps(),
    }

    Ok(())
}

/// Log to a file in the config directory so the TUI owns the terminal.
/// RUST_LOG wins over the configured filter.
fn init_logging(config: &Config) -> Result<()> {
    let dir = Config::config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    let log_path = dir.join("aics.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("installing log subscriber")?;

    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    let tick_rate = config.tick_rate();
    let mut app = App::new(config)?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(tick_rate);
    tracing::info!("console started");

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;
            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event)?,
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    tracing::info!(
        messages = app.conversation.messages().len(),
        "console closed"
    );
    result
}

fn ask(question: &str, json: bool) -> Result<()> {
    let catalog = Arc::new(ResponseCatalog::builtin()?);
    let mut conversation = Conversation::new(catalog);
    let first_new = conversation.messages().len();

    let outcome = conversation.submit(question);
    let delivery = match &outcome {
        SubmitOutcome::Reply(pending) => conversation.deliver(pending.clone()),
        _ => Delivery::default(),
    };
    let new_messages = &conversation.messages()[first_new..];

    if json {
        let output = serde_json::json!({
            "messages": new_messages,
            "matched_entry": delivery.matched_entry,
            "completed_tasks": delivery.completed_tasks,
            "panel": conversation.panel(),
            "pending_changes": conversation.pending_changes(),
            "modal": conversation.modal(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        SubmitOutcome::Ignored => {
            println!("{}", "Nothing to ask. Type a question about your calling setup.".yellow());
            return Ok(());
        }
        SubmitOutcome::OpenModal(modal) => {
            println!(
                "{} {}",
                "→".bold().blue(),
                format!("Opens the {} form (run `aics` to fill it in)", modal.title()).dimmed()
            );
            return Ok(());
        }
        SubmitOutcome::Reply(_) => {}
    }

    for message in new_messages.iter().filter(|m| !m.is_user()) {
        print_message(message);
    }

    if !delivery.completed_tasks.is_empty() {
        println!(
            "{} {}",
            "✓ Marked complete:".green(),
            delivery.completed_tasks.join(", ")
        );
    }
    if conversation.panel().shows_suggestions() {
        println!("{}", "Try: aics ask \"Where do I start?\"".dimmed());
    }

    Ok(())
}

fn print_message(message: &Message) {
    match message.card() {
        Some(card) => {
            println!("\n{}", format!("┌ {}", card.title).bold().magenta());
            for (key, value) in &card.fields {
                println!("{} {}: {}", "│".magenta(), field_label(key).dimmed(), value);
            }
        }
        None => {
            println!("{}", "AI:".bold().yellow());
            println!("{}", message.content);
            if let Some(chips) = &message.chips {
                let labels: Vec<String> = chips.iter().map(|c| format!("[{}]", c.label)).collect();
                println!("{}", labels.join(" ").blue());
            }
        }
    }
}

fn list_topics() -> Result<()> {
    let catalog = ResponseCatalog::builtin()?;

    println!("\n{}", "💬 Response Catalog (first match wins)".bold().blue());
    println!("{}", "=".repeat(40).dimmed());

    for (i, pattern) in catalog.patterns().iter().enumerate() {
        let first_line = pattern.response.content.lines().next().unwrap_or_default();
        let card = pattern
            .response
            .generates_card
            .map(|k| format!(" [card: {}]", k.as_str()))
            .unwrap_or_default();
        println!(
            "{:>3}. {}{}",
            (i + 1).to_string().bold(),
            pattern.pattern().cyan(),
            card.magenta()
        );
        println!("     {}", first_line.dimmed());
    }

    println!(
        "\n{} {} entries, default switches to the suggestions panel",
        "Total:".bold(),
        catalog.len()
    );
    Ok(())
}

fn list_steps() {
    let checklist = aics_core::SetupChecklist::builtin();

    println!("\n{}", "📋 Calling Setup Checklist".bold().blue());
    println!("{}", "=".repeat(40).dimmed());

    for step in checklist.steps() {
        let optional = if step.required { "" } else { " (optional)" };
        println!(
            "\n{} {}{}",
            format!("Step {}:", step.number).bold().green(),
            step.title.bold(),
            optional.dimmed()
        );
        println!("  {}", step.description.dimmed());
        for task in &step.tasks {
            println!("  • {} {}", task.label, format!("({})", task.id).dimmed());
        }
    }
}

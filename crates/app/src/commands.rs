use std::path::PathBuf;

use anyhow::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use credit_core::model::{ChatRole, QueryAnswer, SavedProgress};
use services::{AppServices, ChatController, ChatEntry, ChatError};
use ui::vm::{
    ForecastVm, format_datetime, map_forecast, map_query_answer, stats_line, upload_status,
};

use crate::cli::{Command, ForecastArgs, ProgressAction};

/// Run one headless subcommand against the backend.
pub async fn run(command: Command, services: &AppServices) -> Result<()> {
    match command {
        Command::Ui => bail!("the desktop window is not a headless command"),
        Command::Ask { question } => {
            let answer = services.knowledge().ask(&question.join(" ")).await?;
            print_answer(&answer);
            Ok(())
        }
        Command::Analyze => {
            let answer = services.knowledge().analyze_documents_for_questions().await?;
            print_answer(&answer);
            Ok(())
        }
        Command::Interview => interview(services).await,
        Command::Forecast(args) => forecast(services, args).await,
        Command::Upload { paths } => upload(services, &paths).await,
        Command::Stats => {
            let stats = services.knowledge().stats().await?;
            println!("{}", stats_line(&stats));
            Ok(())
        }
        Command::Health => {
            let health = services.knowledge().health().await?;
            println!(
                "{} (version {}) at {}",
                health.status, health.version, health.timestamp
            );
            Ok(())
        }
        Command::RegenerateQuestions => {
            let message = services.knowledge().regenerate_question_base().await?;
            println!("{message}");
            Ok(())
        }
        Command::Progress { action } => progress(services, action).await,
    }
}

fn print_answer(answer: &QueryAnswer) {
    let vm = map_query_answer(answer);
    println!("{}", answer.answer.trim());
    println!();
    println!("{}", vm.confidence);
    if !vm.sources.is_empty() {
        println!();
        println!("Sources:");
        for (i, source) in vm.sources.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, source.file_name, source.page);
            println!("     {}", source.excerpt);
        }
    }
}

async fn forecast(services: &AppServices, args: ForecastArgs) -> Result<()> {
    let today = services.clock().now().date_naive();
    let draft = args.into_draft(today);
    let response = services
        .forecast()
        .forecast(&draft, services.session_id())
        .await?;

    match map_forecast(&response) {
        ForecastVm::Failed { warnings } => {
            println!("Forecast Calculation Failed");
            print_list("Warnings", &warnings);
        }
        ForecastVm::Ready {
            totals,
            periods,
            confidence,
            recommendations,
            warnings,
            next_steps,
        } => {
            for row in &totals {
                println!("{}: {}", row.label, row.value);
            }
            println!("Confidence: {confidence}");
            if !periods.is_empty() {
                println!();
                println!(
                    "{:<6} {:>14} {:>10} {:>14} {:>16}",
                    "Year", "Tons", "Rate", "Credits", "Value"
                );
                for period in &periods {
                    println!(
                        "{:<6} {:>14} {:>10} {:>14} {:>16}",
                        period.year, period.tonnes, period.rate, period.credits, period.value
                    );
                }
            }
            print_list("Recommendations", &recommendations);
            print_list("Warnings", &warnings);
            print_list("Next steps", &next_steps);
        }
    }
    Ok(())
}

async fn upload(services: &AppServices, paths: &[PathBuf]) -> Result<()> {
    let summary = services.knowledge().upload_paths(paths).await?;
    println!("{}", upload_status(&summary));
    if !summary.vector_db_updated {
        println!("The knowledge base was not updated.");
    }
    Ok(())
}

async fn progress(services: &AppServices, action: ProgressAction) -> Result<()> {
    match action {
        ProgressAction::Show => match services.progress().load().await? {
            Some(saved) => print_saved(&saved),
            None => println!("No saved progress."),
        },
        ProgressAction::Clear => {
            services.progress().clear().await?;
            println!("Saved progress cleared.");
        }
    }
    Ok(())
}

fn print_saved(saved: &SavedProgress) {
    println!("Session: {}", saved.session_id);
    println!("Saved at: {}", format_datetime(saved.saved_at));
    println!("Answered: {}", saved.answers.answered_count());
    for (id, value) in saved.answers.iter() {
        println!("  {id}: {value}");
    }
}

async fn interview(services: &AppServices) -> Result<()> {
    let mut chat = services.interview().await;
    info!(session = %services.session_id(), "interview started");
    println!("Type your answers. /complete asks for the final assessment, /quit exits.");
    let mut shown = print_entries(&chat, 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/complete" => {
                // Failures are already recorded as chat entries.
                if let Err(err) = chat.request_complete_assessment().await {
                    debug!(error = %err, "manual final assessment failed");
                }
            }
            message => match chat.send(message).await {
                Ok(reply) if reply.final_assessment.is_some() => {
                    info!("final assessment generated");
                }
                Ok(_) | Err(ChatError::Api(_)) => {}
                Err(err) => eprintln!("{err}"),
            },
        }
        shown = print_entries(&chat, shown);
    }
    Ok(())
}

/// Print entries from `from` on, skipping the user's own echoed turns.
fn print_entries(chat: &ChatController, from: usize) -> usize {
    let entries = chat.entries();
    for entry in entries.iter().skip(from) {
        match entry {
            ChatEntry::Turn(turn) if turn.role() == ChatRole::User => {}
            ChatEntry::Turn(turn) => {
                println!();
                println!("{}", turn.content());
                println!();
            }
            ChatEntry::Error(message) => eprintln!("{message}"),
        }
    }
    entries.len()
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}

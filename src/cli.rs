//! Printed output for the one-shot `res` commands
//!
//! Each function runs one tool and prints its response. Errors are returned
//! to `main`, which reports them and exits with status 1.

use std::io::{self, BufRead, Write};

use chrono::Local;
use colored::Colorize;

use crate::domain::{GoalId, Personality, ReminderFrequency};
use crate::icons;
use crate::render::{self, Align, Table, Tone};
use crate::tools::{self, AiFallback};
use crate::{ResolutionTracker, TrackerError};

const PANEL_MAX_WIDTH: usize = 80;

fn print_fallback(fallback: &AiFallback) {
    if fallback.not_configured {
        println!("{} {}", "AI not configured:".yellow(), fallback.reason);
    } else {
        println!("{} {}", "AI unreachable:".yellow(), fallback.reason);
    }
}

fn print_panel(title: &str, text: &str, tone: Tone) {
    let width = render::layout_width().min(PANEL_MAX_WIDTH);
    let lines = render::wrap(text, width.saturating_sub(4));
    println!();
    for line in render::panel(title, &lines, tone, width) {
        println!("{}", line);
    }
    println!();
}

/// Numbers like 3.0 print as "3"
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Ask a yes/no question on stdin; anything but y/yes is no
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub async fn add(tracker: &ResolutionTracker, title: String, no_ai: bool) -> Result<(), TrackerError> {
    if !no_ai {
        println!("{}", "Analyzing your goal...".dimmed());
    }
    let response = tools::add_goal(tracker, tools::AddGoalParams { title, no_ai }).await?;
    let goal = &response.goal;

    if let Some(fallback) = &response.fallback {
        print_fallback(fallback);
    }

    println!("\n{} {}", "Added:".green(), goal.display_title());
    if let Some(analysis) = &response.analysis {
        println!(
            "  Category: {} | Target: {} | Priority: {}",
            goal.category.cyan(),
            goal.target_display().cyan(),
            goal.priority.to_string().cyan()
        );
        if !analysis.reasoning.is_empty() {
            println!("  {}", analysis.reasoning.dimmed());
        }
    }
    Ok(())
}

pub fn list(tracker: &ResolutionTracker) -> Result<(), TrackerError> {
    let response = tools::list_goals(tracker)?;
    if response.goals.is_empty() {
        println!(
            "{} Add one with: res add \"Your goal here\"",
            "No resolutions yet!".yellow()
        );
        return Ok(());
    }

    let mut table = Table::new()
        .title("Your Resolutions")
        .column("ID", Align::Right)
        .column("Goal", Align::Left)
        .column("Category", Align::Left)
        .column("Target", Align::Left)
        .column("Logs", Align::Right)
        .column("Priority", Align::Center);

    for card in &response.goals {
        let goal = &card.goal;
        table.row(vec![
            goal.id.to_string(),
            goal.display_title(),
            goal.category.clone(),
            if goal.target.is_empty() { "-".to_string() } else { goal.target.clone() },
            card.metrics.log_count.to_string(),
            render::priority_stars(goal.priority),
        ]);
    }

    for line in table.render() {
        println!("{}", line);
    }
    Ok(())
}

pub async fn log(tracker: &ResolutionTracker, text: String, goal_id: Option<GoalId>) -> Result<(), TrackerError> {
    if goal_id.is_none() {
        println!("{}", "Parsing your update...".dimmed());
    }
    let response = tools::log_progress(tracker, tools::LogProgressParams { text, goal_id }).await?;
    let entry = &response.entry;

    if let Some(fallback) = &response.fallback {
        print_fallback(fallback);
    }

    println!("\n{} {}", "Logged to:".green(), response.goal.display_title());
    println!("  {} {}", entry.summary(), entry.sentiment.icon());
    if let Some(value) = entry.value.filter(|v| *v != 0.0) {
        println!("  Value: {}", format!("{} {}", format_value(value), entry.unit).trim_end().cyan());
    }
    Ok(())
}

pub fn status(tracker: &ResolutionTracker) -> Result<(), TrackerError> {
    let response = tools::goal_status(tracker)?;
    if response.goals.is_empty() {
        println!(
            "{} Add one with: res add \"Your goal here\"",
            "No resolutions yet!".yellow()
        );
        return Ok(());
    }

    println!();
    for card in &response.goals {
        let count = card.metrics.log_count;
        let filled = count.min(10);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));

        let mut sentiment = String::new();
        if card.sentiments.positive > 0 {
            sentiment.push_str(&format!(" {}", format!("+{}", card.sentiments.positive).green()));
        }
        if card.sentiments.struggling > 0 {
            sentiment.push_str(&format!(" {}", format!("-{}", card.sentiments.struggling).red()));
        }

        println!("  {}", card.goal.display_title().bold());
        print!("     {} {} logs{}", bar, count, sentiment);
        if card.metrics.streak > 0 {
            print!("  {}", format!("{} {}d", icons::FLAME, card.metrics.streak).yellow());
        }
        println!();
    }

    let stats = &response.stats;
    println!(
        "\n  {} logs this week  {} {}d streak  {} {}/{} on track",
        stats.logs_this_week,
        icons::FLAME,
        stats.overall_streak,
        icons::CHECKMARK,
        stats.on_track,
        stats.total_goals
    );
    for insight in &response.insights {
        println!("  {}", insight.dimmed());
    }
    println!();
    Ok(())
}

pub async fn analyze(tracker: &ResolutionTracker, goal_id: Option<GoalId>) -> Result<(), TrackerError> {
    println!("{}", "Generating insights...".dimmed());
    let response = tools::analyze_progress(
        tracker,
        tools::AnalyzeParams {
            goal_id,
            question: None,
        },
    )
    .await?;

    let title = match &response.focus {
        Some(goal) => format!("{} Progress Analysis: {}", icons::CHART, goal.title),
        None => format!("{} Progress Analysis", icons::CHART),
    };
    print_panel(&title, &response.text, Tone::Green);
    Ok(())
}

pub async fn remind(tracker: &ResolutionTracker) -> Result<(), TrackerError> {
    println!("{}", "Crafting your check-in...".dimmed());
    let response = tools::check_in(tracker).await?;
    print_panel(&format!("{} Daily Check-in", icons::SPARKLE), &response.text, Tone::Blue);
    Ok(())
}

pub fn edit(tracker: &ResolutionTracker, params: tools::EditGoalParams) -> Result<(), TrackerError> {
    let response = tools::edit_goal(tracker, params)?;
    if !response.updated {
        println!(
            "{} Use --title, --category, --target, or --priority",
            "No changes specified.".yellow()
        );
        return Ok(());
    }

    println!("{} {}", "Updated:".green(), response.goal.display_title());
    Ok(())
}

pub fn remove(tracker: &ResolutionTracker, goal_id: GoalId, force: bool) -> Result<(), TrackerError> {
    let goal = tools::find_goal(tracker, goal_id)?;

    if !force && !confirm(&format!("Remove '{}' and all its logs?", goal.title))? {
        println!("Cancelled.");
        return Ok(());
    }

    let response = tools::remove_goal(tracker, tools::RemoveGoalParams { goal_id })?;
    println!("{} {}", "Removed:".green(), response.goal.title);
    if response.removed_logs > 0 {
        println!("  {}", format!("{} log entries deleted", response.removed_logs).dimmed());
    }
    Ok(())
}

pub fn logs(tracker: &ResolutionTracker, goal_id: Option<GoalId>, limit: usize) -> Result<(), TrackerError> {
    let response = tools::log_history(tracker, tools::LogHistoryParams { goal_id, limit })?;
    if response.entries.is_empty() {
        println!(
            "{} Add one with: res log \"Your update\"",
            "No logs yet!".yellow()
        );
        return Ok(());
    }

    let mut table = Table::new()
        .title("Recent Logs")
        .column("Date", Align::Left)
        .column("Goal", Align::Left)
        .column("Update", Align::Left)
        .column("Mood", Align::Center);

    for line in &response.entries {
        let entry = &line.entry;
        let goal = match &line.goal {
            Some(goal) => format!("{} {}", goal.emoji, render::truncate(&goal.title, 20))
                .trim()
                .to_string(),
            None => format!("Goal {}", entry.goal_id),
        };
        table.row(vec![
            entry.timestamp.with_timezone(&Local).format("%m/%d %H:%M").to_string(),
            goal,
            render::truncate(entry.summary(), 60),
            entry.sentiment.icon().to_string(),
        ]);
    }

    for line in table.render() {
        println!("{}", line);
    }
    Ok(())
}

pub fn config(
    tracker: &ResolutionTracker,
    reminder_frequency: Option<ReminderFrequency>,
    preferred_time: Option<String>,
    ai_personality: Option<Personality>,
) -> Result<(), TrackerError> {
    let response = tools::configure(
        tracker,
        tools::ConfigParams {
            reminder_frequency,
            preferred_time,
            ai_personality,
        },
    )?;

    if response.updated {
        println!("{}", "Preferences updated.".green());
    }
    let config = &response.config;
    println!("  Reminder frequency: {}", config.reminder_frequency.to_string().cyan());
    println!("  Preferred time:     {}", config.preferred_time.cyan());
    println!("  Coach personality:  {}", config.ai_personality.to_string().cyan());
    if !tracker.has_model() {
        println!("  {}", "AI features are off until ANTHROPIC_API_KEY is set.".dimmed());
    }
    Ok(())
}

//! Screen composition for the dashboard
//!
//! Pure functions from tracker data to printable lines. Nothing here reads
//! storage or stdin, so every piece can be checked in tests with colors off.

use colored::Colorize;

use crate::analytics::{DashboardStats, GoalProgress};
use crate::dashboard::demo;
use crate::dashboard::{ChatMessage, ChatRole, COACH_PROMPTS};
use crate::domain::Goal;
use crate::icons;
use crate::render::{self, Tone};

pub const HEADER: &str = "AI Daily Brief - 10 Week Challenge";
const CARD_BAR_WIDTH: usize = 16;
const BRIEFING_WIDTH: usize = 50;
const DETAIL_WIDTH: usize = 70;
const VISIBLE_CHAT: usize = 8;
const RULE: &str = "─────────────────────────";

/// Everything one frame of the dashboard needs
pub struct Frame<'a> {
    pub cards: &'a [GoalProgress],
    pub stats: &'a DashboardStats,
    pub chat: &'a [ChatMessage],
    pub pending: usize,
    pub width: usize,
}

/// Two lines plus title for one goal
pub fn goal_card(card: &GoalProgress) -> Vec<String> {
    let goal = &card.goal;
    let percent = card.metrics.percent();

    let mut details = format!(
        "    {}  {}",
        render::sparkline(&card.metrics.activity),
        Tone::Subtext.paint(&if goal.target.is_empty() {
            format!("{} logs", card.metrics.log_count)
        } else {
            goal.target.clone()
        })
    );
    if card.metrics.streak > 0 {
        details.push_str(&format!(
            "  {}",
            Tone::Yellow.paint(&format!("{}{}", icons::FLAME, card.metrics.streak))
        ));
    }

    vec![
        format!(" {} {}", goal.emoji, Tone::Text.paint(&goal.title).bold()),
        format!(
            "    {} {}",
            render::gradient_bar(card.metrics.progress, CARD_BAR_WIDTH),
            render::percent_tone(percent).paint(&format!("{:>3}%", percent))
        ),
        details,
    ]
}

/// The bottom stats line; the streak is left out while it is zero
pub fn stats_bar(stats: &DashboardStats) -> String {
    let mut line = format!(
        "  {} {}{}",
        Tone::Blue.paint(icons::DIAMOND),
        Tone::Text.paint(&stats.logs_this_week.to_string()).bold(),
        Tone::Subtext.paint(" logs  ")
    );
    if stats.overall_streak > 0 {
        line.push_str(&format!(
            "{} {}{}",
            Tone::Yellow.paint(icons::FLAME),
            Tone::Text.paint(&format!("{}d", stats.overall_streak)).bold(),
            Tone::Subtext.paint(" streak  ")
        ));
    }
    line.push_str(&format!(
        "{} {}{}",
        Tone::Green.paint(icons::CHECKMARK),
        Tone::Text.paint(&format!("{}/{}", stats.on_track, stats.total_goals)).bold(),
        Tone::Subtext.paint(" on track")
    ));
    line
}

/// A chat message, wrapped to `width`
pub fn chat_lines(message: &ChatMessage, width: usize) -> Vec<String> {
    let (prefix, tone) = match message.role {
        ChatRole::User => ("You › ", Tone::Lavender),
        ChatRole::Coach => ("Coach › ", Tone::Teal),
    };
    let indent = " ".repeat(render::display_width(prefix));
    let body = render::wrap(&message.text, width.saturating_sub(render::display_width(prefix)).max(20));

    body.iter()
        .enumerate()
        .map(|(i, line)| {
            let lead = if i == 0 {
                tone.paint(prefix).bold().to_string()
            } else {
                indent.clone()
            };
            format!("{}{}", lead, Tone::Text.paint(line))
        })
        .collect()
}

pub fn prompt_menu() -> String {
    COACH_PROMPTS
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} {}", Tone::Teal.paint(&format!("[{}]", i + 1)), p.icon, p.label))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn help(width: usize) -> Vec<String> {
    let shortcuts = [
        ("a <title>", "Add new resolution"),
        ("l <text>", "Log progress"),
        ("1-6", "Ask the coach a suggested question"),
        ("d <id>", "Show goal details"),
        ("r", "Refresh"),
        ("?", "This help"),
        ("q", "Quit"),
        ("<text>", "Chat with your coach"),
    ];
    let lines: Vec<String> = shortcuts
        .iter()
        .map(|(key, desc)| format!("{}{}", render::pad(key, 12), desc))
        .collect();
    render::panel(
        &format!("{}  Keyboard Shortcuts", icons::KEYBOARD),
        &lines,
        Tone::Lavender,
        width.min(60),
    )
}

/// Mission briefing for demo goals, target and category for the rest
pub fn goal_details(goal: &Goal, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    match demo::mission_for(goal) {
        Some(mission) => {
            lines.extend(render::wrap(mission.subtitle, BRIEFING_WIDTH));
            lines.push(String::new());
            lines.push(format!("{} MISSION BRIEFING", icons::TARGET));
            lines.push(RULE.to_string());
            lines.extend(render::wrap(mission.briefing, BRIEFING_WIDTH));

            if !mission.tips.is_empty() {
                lines.push(String::new());
                lines.push(format!("{} TIPS", icons::ZAP));
                lines.push(RULE.to_string());
                lines.extend(mission.tips.iter().map(|tip| format!("{} {}", icons::ARROW, tip)));
            }
            if !mission.resources.is_empty() {
                lines.push(String::new());
                lines.push(format!("{} RESOURCES", icons::FLASK));
                lines.push(RULE.to_string());
                lines.extend(
                    mission
                        .resources
                        .iter()
                        .map(|res| format!("{} {}", icons::DIAMOND, res)),
                );
            }
        }
        None => {
            let target = if goal.target.is_empty() { "Not set" } else { goal.target.as_str() };
            lines.push(format!("Target: {}", target));
            lines.push(format!("Category: {}", goal.category));
        }
    }

    render::panel(&goal.display_title(), &lines, Tone::Teal, width.min(DETAIL_WIDTH))
}

/// The whole screen, top to bottom
pub fn screen(frame: &Frame<'_>) -> Vec<String> {
    let width = frame.width;
    let rule = Tone::Overlay.paint(&"─".repeat(width)).to_string();
    let mut out = Vec::new();

    out.push(
        Tone::Lavender
            .paint(&format!("{} {}", icons::TARGET, HEADER))
            .bold()
            .to_string(),
    );
    out.push(rule.clone());

    out.push(Tone::Lavender.paint(&format!("{} AI MISSIONS", icons::TARGET)).bold().to_string());
    if frame.cards.is_empty() {
        out.push(String::new());
        out.push(Tone::Subtext.paint("  No resolutions yet!").to_string());
        out.push(Tone::Subtext.paint("  Type `a <title>` to add one.").to_string());
    }
    for card in frame.cards {
        out.push(String::new());
        out.extend(goal_card(card));
    }
    out.push(rule.clone());

    out.push(Tone::Teal.paint(&format!("{} AI COACH", icons::ROBOT)).bold().to_string());
    let start = frame.chat.len().saturating_sub(VISIBLE_CHAT);
    for message in &frame.chat[start..] {
        out.extend(chat_lines(message, width));
    }
    if frame.pending > 0 {
        out.push(Tone::Subtext.paint("Coach is thinking...").italic().to_string());
    }
    out.push(String::new());
    out.push(prompt_menu());
    out.push(rule);

    out.push(stats_bar(frame.stats));
    out.push(
        "  a add · l log · 1-6 prompts · d details · ? help · q quit"
            .dimmed()
            .to_string(),
    );
    out
}

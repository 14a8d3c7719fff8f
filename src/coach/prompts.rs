//! Prompt text sent to the language model

use crate::domain::{Goal, LogEntry};
use crate::icons::KNOWN_CATEGORIES;

/// System prompt used for the structured-extraction calls
pub const ASSISTANT_SYSTEM: &str =
    "You are a helpful assistant for tracking personal resolutions and goals.";

/// System prompt for progress analysis and coaching chat
pub const COACH_SYSTEM: &str = "You are a supportive personal coach helping someone track their resolutions. \
Be encouraging but honest. Focus on actionable insights. \
Do NOT use emojis; keep responses clean and text-only.";

/// System prompt for check-in reminders
pub const REMINDER_SYSTEM: &str =
    "You are a friendly accountability partner. Be warm, specific, and brief. Do NOT use emojis.";

pub fn analyze_goal(title: &str) -> String {
    format!(
        r#"Analyze this personal resolution/goal and extract structured information.

Goal: "{title}"

Return a JSON object with these fields:
- category: one of [{categories}]
- target: a measurable target extracted or inferred (e.g., "3x per week", "12 books", "daily")
- priority: 1-5 where 1 is highest priority (infer from urgency/importance)
- reasoning: brief explanation of your categorization

Return ONLY the JSON object, no other text."#,
        title = title,
        categories = KNOWN_CATEGORIES.join(", "),
    )
}

pub fn analyze_log(raw_input: &str, goals: &[Goal]) -> String {
    let goals_list = goals
        .iter()
        .map(|g| format!("- ID {}: {} (category: {})", g.id, g.title, g.category))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Parse this progress update and match it to the most relevant goal.

Update: "{raw_input}"

Available goals:
{goals_list}

Return a JSON object with:
- goal_id: the ID of the matching goal (integer)
- parsed_update: a clean summary of what was accomplished
- value: numeric value if mentioned (e.g., 3 for "ran 3 miles"), or null
- unit: unit of measurement if applicable (e.g., "miles", "pages", "minutes")
- sentiment: one of [positive, neutral, struggling] based on tone

Return ONLY the JSON object, no other text."#
    )
}

pub fn coaching(goals: &[&Goal], recent_logs: &[&LogEntry], question: Option<&str>) -> String {
    let goals_context = goals
        .iter()
        .map(|g| {
            format!(
                "- {} (target: {}, priority: {})",
                g.display_title(),
                g.target_display(),
                g.priority
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let logs_context = if recent_logs.is_empty() {
        "No progress logged yet.".to_string()
    } else {
        recent_logs
            .iter()
            .map(|l| {
                format!(
                    "- [{}] Goal {}: {} ({})",
                    l.timestamp.format("%Y-%m-%d"),
                    l.goal_id,
                    l.summary(),
                    l.sentiment
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let ask = match question {
        Some(question) => format!(
            "The user asks: \"{question}\"\n\nAnswer that question directly, using their goals and activity for context."
        ),
        None => "Provide:\n\
1. Brief progress summary for each goal\n\
2. Patterns you notice (good habits, areas needing attention)\n\
3. Specific, actionable suggestions\n\
4. Encouragement and motivation"
            .to_string(),
    };

    format!(
        r#"Analyze this user's resolution progress and provide helpful, encouraging insights.

Goals:
{goals_context}

Recent Activity:
{logs_context}

{ask}

Keep the tone warm but not overly effusive. Be specific and practical.
Format with clear sections. Keep it concise (under 300 words).
Do NOT use emojis; use plain text only."#
    )
}

pub fn reminder(goals: &[Goal], recent_logs: &[&LogEntry]) -> String {
    let goals_context = goals
        .iter()
        .map(|g| format!("- {} (priority: {})", g.display_title(), g.priority))
        .collect::<Vec<_>>()
        .join("\n");

    let logs_context = if recent_logs.is_empty() {
        "No recent activity logged.".to_string()
    } else {
        recent_logs
            .iter()
            .map(|l| format!("- [{}] {}", l.timestamp.format("%Y-%m-%d"), l.summary()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Generate a brief, personalized check-in prompt for this user.

Their goals:
{goals_context}

Recent activity:
{logs_context}

Create a friendly 2-3 sentence check-in that:
1. References their specific goals
2. Acknowledges recent progress (if any)
3. Asks a specific question about today's plans

Keep it conversational and motivating. Don't be preachy.
Do NOT use emojis; use plain text only."#
    )
}

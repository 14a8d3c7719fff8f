//! Interactive terminal dashboard
//!
//! A line-driven screen: goal cards, the coach chat and a stats bar are
//! redrawn after every command. Model calls run on spawned tasks and report
//! back over a channel, so the prompt stays usable while the coach thinks.

pub mod demo;
pub mod view;

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::domain::{GoalId, Sentiment};
use crate::icons;
use crate::render;
use crate::storage::ResolutionStorage;
use crate::tools;
use crate::{ResolutionTracker, TrackerError};

/// Words that mark a chat message as a progress report
static LOG_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(did|finished|completed|ran|read|went)\b").expect("valid log word regex")
});

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Which coach call a suggested prompt makes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Analyze,
    Remind,
}

/// A suggested question for the coach
#[derive(Debug)]
pub struct CoachPrompt {
    pub icon: &'static str,
    pub label: &'static str,
    pub kind: PromptKind,
    pub text: &'static str,
}

pub const COACH_PROMPTS: [CoachPrompt; 6] = [
    CoachPrompt {
        icon: icons::CHART,
        label: "Progress",
        kind: PromptKind::Analyze,
        text: "How am I doing on my goals?",
    },
    CoachPrompt {
        icon: icons::SPARKLE,
        label: "Motivate",
        kind: PromptKind::Remind,
        text: "Give me encouragement and a check-in",
    },
    CoachPrompt {
        icon: icons::COMPASS,
        label: "Focus",
        kind: PromptKind::Analyze,
        text: "What should I focus on today?",
    },
    CoachPrompt {
        icon: icons::FLASK,
        label: "Tips",
        kind: PromptKind::Analyze,
        text: "Tips for my current mission",
    },
    CoachPrompt {
        icon: icons::FLAME,
        label: "Streak",
        kind: PromptKind::Analyze,
        text: "How's my streak looking?",
    },
    CoachPrompt {
        icon: icons::ZAP,
        label: "Quick Win",
        kind: PromptKind::Remind,
        text: "Suggest a quick win I can do right now",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Coach,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn coach(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Coach,
            text: text.into(),
        }
    }
}

/// One line of user input, parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Log(String),
    /// Index into [`COACH_PROMPTS`]
    Prompt(usize),
    Details(GoalId),
    Help,
    Refresh,
    Quit,
    Chat(String),
    Usage(&'static str),
}

/// Parse a line typed at the dashboard prompt; blank lines yield `None`
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match (head, rest.is_empty()) {
        ("q" | "quit", true) => Command::Quit,
        ("?" | "help", true) => Command::Help,
        ("r", true) => Command::Refresh,
        ("a", true) => Command::Usage("Usage: a <title>"),
        ("a", false) => Command::Add(rest.to_string()),
        ("l", true) => Command::Usage("Usage: l <what you did>"),
        ("l", false) => Command::Log(rest.to_string()),
        ("d", _) => match rest.parse::<u64>() {
            Ok(id) => Command::Details(GoalId(id)),
            Err(_) => Command::Usage("Usage: d <goal id>"),
        },
        (n, true) => match n.parse::<usize>() {
            Ok(n) if (1..=COACH_PROMPTS.len()).contains(&n) => Command::Prompt(n - 1),
            _ => Command::Chat(line.to_string()),
        },
        _ => Command::Chat(line.to_string()),
    };
    Some(command)
}

/// True when free chat text reads like a progress report
pub fn is_log_text(text: &str) -> bool {
    LOG_WORDS.is_match(text)
}

/// Work handed to a background task
#[derive(Clone, Debug, PartialEq, Eq)]
enum Job {
    Add(String),
    Log(String),
    Coach {
        kind: PromptKind,
        question: Option<String>,
    },
}

/// Run a job and phrase the outcome as a coach message
async fn run_job(tracker: &ResolutionTracker, job: Job) -> String {
    match job {
        Job::Add(title) => {
            let params = tools::AddGoalParams {
                title: title.clone(),
                no_ai: false,
            };
            match tools::add_goal(tracker, params).await {
                Ok(response) if response.analysis.is_some() => format!(
                    "Added {} {}! Target: {}",
                    response.goal.emoji,
                    response.goal.title,
                    response.goal.target_display()
                ),
                Ok(response) => format!("Added: {}", response.goal.title),
                Err(e) => format!("Couldn't add \"{}\": {}", title, e),
            }
        }
        Job::Log(text) => {
            let params = tools::LogProgressParams { text, goal_id: None };
            match tools::log_progress(tracker, params).await {
                Ok(response) if response.fallback.is_none() => {
                    let icon = if response.entry.sentiment == Sentiment::Positive {
                        icons::CHECK
                    } else {
                        icons::THUMB_UP
                    };
                    format!("{} Logged to {}!", icon, response.goal.display_title())
                }
                Ok(response) => format!("Logged to {}", response.goal.title),
                Err(TrackerError::NoGoals) => "Add a goal first with `a <title>`!".to_string(),
                Err(e) => format!("Couldn't log that: {}", e),
            }
        }
        Job::Coach { kind, question } => {
            let result = match kind {
                PromptKind::Remind => tools::check_in(tracker).await,
                PromptKind::Analyze => {
                    let params = tools::AnalyzeParams {
                        goal_id: None,
                        question,
                    };
                    tools::analyze_progress(tracker, params).await
                }
            };
            match result {
                Ok(response) => response.text,
                Err(TrackerError::Coach(e)) if e.is_configuration() => {
                    format!("API key issue: {}", e)
                }
                Err(e) => format!("Connection error: {}. Check your API key is set.", e),
            }
        }
    }
}

/// The dashboard session
pub struct Dashboard {
    tracker: Arc<ResolutionTracker>,
    chat: Vec<ChatMessage>,
    /// Help or goal details, shown under the screen until the next command
    overlay: Vec<String>,
    /// Background jobs still running
    pending: usize,
}

impl Dashboard {
    pub fn new(tracker: Arc<ResolutionTracker>) -> Self {
        Self {
            tracker,
            chat: vec![ChatMessage::coach(format!(
                "Welcome to the 10-Week AI Challenge! {} You're on Week 1: Resolution Tracker. Let's build something awesome!",
                icons::TARGET
            ))],
            overlay: Vec::new(),
            pending: 0,
        }
    }

    /// Run until `q` or end of input
    pub async fn run(mut self) -> Result<(), TrackerError> {
        info!("Starting dashboard");

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.draw().await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            debug!("Dashboard input: {}", line);
                            if !self.handle_line(&line, &tx)? {
                                break;
                            }
                        }
                        Ok(None) => {
                            info!("Dashboard closing (stdin closed)");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to read from stdin: {}", e);
                            return Err(e.into());
                        }
                    }
                }
                Some(reply) = rx.recv() => {
                    self.pending = self.pending.saturating_sub(1);
                    self.chat.push(ChatMessage::coach(reply));
                }
            }
            self.draw().await?;
        }

        Ok(())
    }

    /// Apply one line of input; false means quit
    fn handle_line(&mut self, line: &str, tx: &UnboundedSender<String>) -> Result<bool, TrackerError> {
        let Some(command) = parse_command(line) else {
            return Ok(true);
        };
        self.overlay.clear();

        match command {
            Command::Quit => return Ok(false),
            Command::Refresh => {}
            Command::Help => self.overlay = view::help(render::layout_width()),
            Command::Usage(usage) => self.chat.push(ChatMessage::coach(usage)),
            Command::Add(title) => self.spawn(Job::Add(title), tx),
            Command::Log(text) => self.spawn(Job::Log(text), tx),
            Command::Prompt(index) => {
                let prompt = &COACH_PROMPTS[index];
                self.chat.push(ChatMessage::user(prompt.text));
                self.spawn(
                    Job::Coach {
                        kind: prompt.kind,
                        question: Some(prompt.text.to_string()),
                    },
                    tx,
                );
            }
            Command::Details(goal_id) => match self.tracker.storage().goal(goal_id)? {
                Some(goal) => self.overlay = view::goal_details(&goal, render::layout_width()),
                None => self
                    .chat
                    .push(ChatMessage::coach(TrackerError::GoalNotFound(goal_id).to_string())),
            },
            Command::Chat(text) => {
                self.chat.push(ChatMessage::user(text.clone()));
                let has_goals = !self.tracker.storage().goals()?.is_empty();
                let job = if has_goals && is_log_text(&text) {
                    Job::Log(text)
                } else {
                    Job::Coach {
                        kind: PromptKind::Analyze,
                        question: Some(text),
                    }
                };
                self.spawn(job, tx);
            }
        }
        Ok(true)
    }

    fn spawn(&mut self, job: Job, tx: &UnboundedSender<String>) {
        debug!("Spawning dashboard job: {:?}", job);
        self.pending += 1;

        let tracker = Arc::clone(&self.tracker);
        let tx = tx.clone();
        tokio::spawn(async move {
            let reply = run_job(&tracker, job).await;
            // The receiver only goes away when the dashboard has quit
            let _ = tx.send(reply);
        });
    }

    async fn draw(&self) -> Result<(), TrackerError> {
        let status = tools::goal_status(&self.tracker)?;
        let frame = view::Frame {
            cards: &status.goals,
            stats: &status.stats,
            chat: &self.chat,
            pending: self.pending,
            width: render::layout_width(),
        };

        let mut screen = String::from(CLEAR_SCREEN);
        for line in view::screen(&frame).iter().chain(&self.overlay) {
            screen.push_str(line);
            screen.push('\n');
        }
        screen.push_str("› ");

        let mut stdout = tokio::io::stdout();
        stdout.write_all(screen.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Main entry point for the `res` resolution tracker
///
/// This file sets up logging, parses command line arguments, and dispatches
/// to a one-shot command or the interactive dashboard.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use resolution_tracker::dashboard::{demo, Dashboard};
use resolution_tracker::tools::{EditGoalParams, DEFAULT_HISTORY_LIMIT};
use resolution_tracker::{cli, GoalId, Personality, ReminderFrequency, ResolutionTracker, TrackerError};

/// Get the default data file path with robust fallback strategy
fn get_default_data_path() -> Result<PathBuf, std::io::Error> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".resolutions");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("resolutions");
            p
        }),
        // 3. User's config directory
        dirs::config_dir().map(|mut p| {
            p.push("resolutions");
            p
        }),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".resolutions");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("data.json"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("resolutions");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("data.json");

    tracing::warn!("Using temporary directory for data file: {}", temp_path.display());
    Ok(temp_path)
}

/// AI-powered resolution tracker
#[derive(Parser, Debug)]
#[command(name = "res", author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON data file
    /// If not provided, uses ~/.resolutions/data.json or the nearest writable fallback
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load the 10-week challenge demo data (replaces existing data)
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new resolution
    Add {
        /// What you want to achieve
        title: String,
        /// Skip AI categorization
        #[arg(long)]
        no_ai: bool,
    },
    /// List all resolutions
    List,
    /// Log progress in natural language
    Log {
        /// What you did
        text: String,
        /// Log to this goal instead of letting the coach pick
        #[arg(short, long)]
        goal: Option<u64>,
    },
    /// Quick progress overview
    Status,
    /// Get AI analysis of your progress
    Analyze {
        /// Focus on one goal
        #[arg(short, long)]
        goal: Option<u64>,
    },
    /// Get a personalized check-in
    Remind,
    /// Edit a resolution
    Edit {
        /// Goal id
        id: u64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(short, long)]
        priority: Option<u8>,
    },
    /// Remove a resolution and its logs
    Remove {
        /// Goal id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show recent log entries
    Logs {
        /// Only show logs for this goal
        #[arg(short, long)]
        goal: Option<u64>,
        /// How many entries to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Show or change preferences
    Config {
        /// daily, weekly or adaptive
        #[arg(long)]
        reminder_frequency: Option<ReminderFrequency>,
        /// Check-in time as HH:MM
        #[arg(long)]
        preferred_time: Option<String>,
        /// encouraging, analytical or balanced
        #[arg(long)]
        personality: Option<Personality>,
    },
    /// Open the interactive dashboard
    Dashboard {
        /// Load the 10-week challenge demo data (replaces existing data)
        #[arg(long)]
        demo: bool,
    },
}

async fn run(tracker: ResolutionTracker, command: Command) -> Result<(), TrackerError> {
    match command {
        Command::Add { title, no_ai } => cli::add(&tracker, title, no_ai).await,
        Command::List => cli::list(&tracker),
        Command::Log { text, goal } => cli::log(&tracker, text, goal.map(GoalId)).await,
        Command::Status => cli::status(&tracker),
        Command::Analyze { goal } => cli::analyze(&tracker, goal.map(GoalId)).await,
        Command::Remind => cli::remind(&tracker).await,
        Command::Edit {
            id,
            title,
            category,
            target,
            priority,
        } => cli::edit(
            &tracker,
            EditGoalParams {
                goal_id: GoalId(id),
                title,
                category,
                target,
                priority,
            },
        ),
        Command::Remove { id, force } => cli::remove(&tracker, GoalId(id), force),
        Command::Logs { goal, limit } => cli::logs(&tracker, goal.map(GoalId), limit),
        Command::Config {
            reminder_frequency,
            preferred_time,
            personality,
        } => cli::config(&tracker, reminder_frequency, preferred_time, personality),
        Command::Dashboard { demo: seed } => dashboard(tracker, seed).await,
    }
}

async fn dashboard(tracker: ResolutionTracker, seed: bool) -> Result<(), TrackerError> {
    if seed {
        demo::seed(&tracker)?;
    }
    Dashboard::new(Arc::new(tracker)).run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("resolution_tracker={}", log_level))
        .with_writer(std::io::stderr) // Keep logs off the command output
        .init();

    let data_path = match args.data_file {
        Some(path) => path,
        None => match get_default_data_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                std::process::exit(1);
            }
        },
    };
    info!("Using data file at: {}", data_path.display());

    let tracker = ResolutionTracker::new(data_path);
    let command = args.command.unwrap_or(Command::Dashboard { demo: false });
    let command = match command {
        Command::Dashboard { demo } => Command::Dashboard {
            demo: demo || args.demo,
        },
        other => other,
    };

    if let Err(e) = run(tracker, command).await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

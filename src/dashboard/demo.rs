//! Demo data: the 10-week AI challenge
//!
//! `seed` wipes the data file and loads the ten weekly missions plus a few
//! logs for week one. `mission_for` maps a seeded goal back to its briefing.

use crate::domain::{Goal, NewGoal, NewLogEntry, Sentiment};
use crate::icons;
use crate::storage::ResolutionStorage;
use crate::{ResolutionTracker, TrackerError};

pub const DEMO_CATEGORY: &str = "ai-tools";

/// Briefing material for one week of the challenge
#[derive(Debug)]
pub struct Mission {
    pub week: u8,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub briefing: &'static str,
    pub tips: &'static [&'static str],
    pub resources: &'static [&'static str],
    target: &'static str,
    icon: &'static str,
}

impl Mission {
    /// Goal title as seeded, e.g. "Week 3: Deep Research"
    pub fn goal_title(&self) -> String {
        format!("Week {}: {}", self.week, self.title)
    }
}

pub static MISSIONS: [Mission; 10] = [
    Mission {
        week: 1,
        title: "Resolution Tracker",
        subtitle: "Vibe code an AI-powered system to track your goals and keep you accountable.",
        briefing: "Create a personal resolution tracker using AI. Design a system that helps you set, monitor, and achieve your goals throughout the year. Use natural language processing to log updates and get intelligent feedback on your progress.",
        tips: &[
            "Start with 3-5 specific, measurable resolutions",
            "Use AI to categorize and prioritize goals",
            "Set up automated check-in prompts",
            "Include sentiment analysis on your progress updates",
        ],
        resources: &[
            "ChatGPT or Claude for natural language interaction",
            "Notion AI for structured tracking",
            "Zapier for automation workflows",
        ],
        target: "Build a tracker",
        icon: icons::TARGET,
    },
    Mission {
        week: 2,
        title: "Model Mapping",
        subtitle: "Create your personal AI model guide - know which tools work best for what.",
        briefing: "Develop a comprehensive map of AI models and their optimal use cases. Test different models with the same prompts, document their strengths and weaknesses, and create a personal reference guide for when to use each tool.",
        tips: &[
            "Test at least 5 different AI models",
            "Use consistent prompts across all models",
            "Document response time, accuracy, and style",
            "Create a decision tree for model selection",
        ],
        resources: &[
            "OpenAI GPT-4, Claude, Gemini, Llama",
            "Comparison frameworks and benchmarks",
            "Prompt libraries for testing",
        ],
        target: "Map AI models",
        icon: icons::COMPASS,
    },
    Mission {
        week: 3,
        title: "Deep Research",
        subtitle: "Master the art of AI-assisted deep research on any topic.",
        briefing: "Pick a topic you're curious about and conduct thorough research using AI tools. Learn to verify sources, cross-reference information, and synthesize findings into a comprehensive report or presentation.",
        tips: &[
            "Choose a topic with multiple perspectives",
            "Use AI to find primary sources",
            "Cross-reference AI outputs with authoritative sources",
            "Create a structured research methodology",
        ],
        resources: &[
            "Perplexity AI for research",
            "Consensus for academic papers",
            "Elicit for literature reviews",
        ],
        target: "Research project",
        icon: icons::FLASK,
    },
    Mission {
        week: 4,
        title: "Data Analyst",
        subtitle: "Transform raw data into insights using AI-powered analysis.",
        briefing: "Find or create a dataset relevant to your interests and use AI tools to analyze it. Generate visualizations, identify patterns, and create a data story that communicates your findings effectively.",
        tips: &[
            "Start with a question you want to answer",
            "Clean your data before analysis",
            "Use multiple visualization types",
            "Document your analytical process",
        ],
        resources: &[
            "ChatGPT Code Interpreter",
            "Julius AI for data analysis",
            "Tableau or Observable for visualization",
        ],
        target: "Analyze data",
        icon: icons::CHART,
    },
    Mission {
        week: 5,
        title: "Visual Reasoning",
        subtitle: "Explore multimodal AI - analyze and create with images.",
        briefing: "Work with AI vision capabilities to analyze images, extract information, and create visual content. Build a project that combines text and image understanding.",
        tips: &[
            "Test image analysis with different types of visuals",
            "Combine vision AI with text generation",
            "Explore image generation and editing",
            "Document accuracy and limitations",
        ],
        resources: &[
            "GPT-4 Vision, Claude Vision",
            "DALL-E, Midjourney, Stable Diffusion",
            "Google Lens for comparison",
        ],
        target: "Image analysis",
        icon: icons::EYE,
    },
    Mission {
        week: 6,
        title: "Information Pipelines",
        subtitle: "Build automated flows to gather, process, and deliver information.",
        briefing: "Design and implement an information pipeline that automatically collects data from multiple sources, processes it with AI, and delivers insights in a useful format. Think of it as your personal AI news/research assistant.",
        tips: &[
            "Identify your information sources",
            "Define filtering and prioritization rules",
            "Set up summarization workflows",
            "Create a delivery schedule that works for you",
        ],
        resources: &[
            "Make.com or Zapier for automation",
            "RSS feeds and web scrapers",
            "AI summarization APIs",
        ],
        target: "Build pipeline",
        icon: icons::SYNC,
    },
    Mission {
        week: 7,
        title: "Automation: Distribution",
        subtitle: "Automate content creation and distribution across platforms.",
        briefing: "Create an automated system that helps you create, adapt, and distribute content across multiple platforms. Learn to repurpose content efficiently while maintaining quality and authenticity.",
        tips: &[
            "Map your content distribution channels",
            "Create templates for different platforms",
            "Maintain your authentic voice",
            "Set up scheduling and cross-posting",
        ],
        resources: &[
            "Buffer, Hootsuite for scheduling",
            "Repurpose.io for content adaptation",
            "Canva AI for visual content",
        ],
        target: "Automate sharing",
        icon: icons::SEND,
    },
    Mission {
        week: 8,
        title: "Automation: Productivity",
        subtitle: "Supercharge your daily workflow with AI automation.",
        briefing: "Identify repetitive tasks in your work or personal life and create AI-powered automations to handle them. Focus on workflows that save significant time and reduce cognitive load.",
        tips: &[
            "Audit your tasks for automation potential",
            "Start with high-frequency, low-complexity tasks",
            "Build error handling into your automations",
            "Measure time saved",
        ],
        resources: &[
            "Notion AI, Coda AI",
            "Mac Shortcuts, Windows Power Automate",
            "Custom GPTs and Claude Projects",
        ],
        target: "Boost productivity",
        icon: icons::ZAP,
    },
    Mission {
        week: 9,
        title: "Context Engineering",
        subtitle: "Master the art of prompting and context design for better AI outputs.",
        briefing: "Deep dive into advanced prompting techniques. Learn to structure context, create system prompts, use few-shot examples, and design prompts that consistently produce excellent results.",
        tips: &[
            "Study prompt engineering frameworks",
            "Create a personal prompt library",
            "Test systematic variations",
            "Document what works and why",
        ],
        resources: &[
            "OpenAI Prompt Engineering Guide",
            "Anthropic's Claude documentation",
            "DAIR.AI Prompt Engineering Guide",
        ],
        target: "Master context",
        icon: icons::TUNE,
    },
    Mission {
        week: 10,
        title: "Build an AI App",
        subtitle: "Bring it all together - build a complete AI-powered application.",
        briefing: "Apply everything you've learned to build a functional AI-powered application. This could be a tool for yourself, your community, or the world. Focus on solving a real problem.",
        tips: &[
            "Start with a specific problem to solve",
            "Keep the MVP scope small",
            "Use no-code/low-code tools if needed",
            "Get feedback from real users",
        ],
        resources: &[
            "Lovable for web apps",
            "Streamlit for data apps",
            "FlutterFlow for mobile",
        ],
        target: "Ship an app",
        icon: icons::ROCKET,
    },
];

/// Progress already made on week one
const WEEK_ONE_LOGS: [&str; 4] = [
    "Set up the Rust project with clap and tokio",
    "Built the res command line",
    "Added AI integration with Claude",
    "Created the terminal dashboard",
];

/// The mission a goal was seeded from, matched on its "Week N: ..." title
pub fn mission_for(goal: &Goal) -> Option<&'static Mission> {
    MISSIONS.iter().find(|m| goal.title == m.goal_title())
}

/// Replace all data with the demo challenge
pub fn seed(tracker: &ResolutionTracker) -> Result<(), TrackerError> {
    let storage = tracker.storage();
    storage.reset()?;

    let mut first = None;
    for mission in &MISSIONS {
        let goal = storage.add_goal(NewGoal {
            title: mission.goal_title(),
            category: Some(DEMO_CATEGORY.to_string()),
            target: Some(mission.target.to_string()),
            priority: Some(mission.week),
            emoji: Some(mission.icon.to_string()),
        })?;
        first.get_or_insert(goal.id);
    }

    if let Some(goal_id) = first {
        for text in WEEK_ONE_LOGS {
            storage.add_log(NewLogEntry {
                parsed_update: Some(text.to_string()),
                value: Some(1.0),
                sentiment: Some(Sentiment::Positive),
                ..NewLogEntry::plain(goal_id, text)
            })?;
        }
    }

    tracing::info!("Seeded demo data with {} missions", MISSIONS.len());
    Ok(())
}

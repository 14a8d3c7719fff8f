//! Nerd Font glyphs shared by the CLI, the dashboard and the coach
//!
//! These render as icons in a patched terminal font and as placeholder
//! boxes everywhere else.

pub const TARGET: &str = "\u{f04fe}";
pub const ROBOT: &str = "\u{f06a9}";
pub const FLAME: &str = "\u{f0238}";
pub const ZAP: &str = "\u{f140b}";
pub const ROCKET: &str = "\u{f003b}";
pub const COMPASS: &str = "\u{f018b}";
pub const FLASK: &str = "\u{f0096}";
pub const CHART: &str = "\u{f0127}";
pub const EYE: &str = "\u{f0208}";
pub const SYNC: &str = "\u{f054d}";
pub const SEND: &str = "\u{f0553}";
pub const TUNE: &str = "\u{f0493}";
pub const CHECK: &str = "\u{f012c}";
pub const THUMB_UP: &str = "\u{f0513}";
pub const SPARKLE: &str = "\u{f06e8}";
pub const NOTE: &str = "\u{f03eb}";
pub const KEYBOARD: &str = "\u{f030c}";
pub const DIAMOND: &str = "\u{f08cf}";
pub const CHECKMARK: &str = "\u{f0135}";
pub const ARROW: &str = "\u{f0054}";
pub const STAR: &str = "\u{f04ce}";

/// Category name to glyph, as suggested by goal analysis
const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("fitness", "\u{f05bd}"),
    ("health", "\u{f0e95}"),
    ("learning", "\u{f0322}"),
    ("reading", "\u{f00ba}"),
    ("finance", "\u{f01a9}"),
    ("career", "\u{f02a2}"),
    ("relationships", "\u{f064d}"),
    ("creativity", "\u{f03d8}"),
    ("mindfulness", "\u{f04b2}"),
    ("productivity", ZAP),
    ("general", TARGET),
    ("ai-tools", ROBOT),
];

/// Categories the goal analysis prompt offers to the model
pub const KNOWN_CATEGORIES: &[&str] = &[
    "fitness",
    "health",
    "learning",
    "reading",
    "finance",
    "career",
    "relationships",
    "creativity",
    "mindfulness",
    "productivity",
    "general",
];

/// Glyph for a category, the `general` target for anything unknown
pub fn category_icon(category: &str) -> &'static str {
    let category = category.trim().to_lowercase();
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
        .unwrap_or(TARGET)
}

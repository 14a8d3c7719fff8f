//! Terminal drawing primitives shared by the CLI and the dashboard
//!
//! Everything here returns strings; callers decide where to print them.
//! Widths are measured in chars, which is close enough for the box-drawing,
//! block and Nerd Font glyphs used throughout.

use std::env;

use colored::{ColoredString, Colorize};

const MIN_WIDTH: usize = 40;
const MAX_WIDTH: usize = 120;

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Muted palette for the dashboard and tables
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Text,
    Subtext,
    Overlay,
    Lavender,
    Blue,
    Sapphire,
    Sky,
    Teal,
    Green,
    Yellow,
    Peach,
    Red,
    Mauve,
}

impl Tone {
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tone::Text => (0xcd, 0xd6, 0xf4),
            Tone::Subtext => (0xa6, 0xad, 0xc8),
            Tone::Overlay => (0x6c, 0x70, 0x86),
            Tone::Lavender => (0xb4, 0xbe, 0xfe),
            Tone::Blue => (0x89, 0xb4, 0xfa),
            Tone::Sapphire => (0x74, 0xc7, 0xec),
            Tone::Sky => (0x89, 0xdc, 0xeb),
            Tone::Teal => (0x94, 0xe2, 0xd5),
            Tone::Green => (0xa6, 0xe3, 0xa1),
            Tone::Yellow => (0xf9, 0xe2, 0xaf),
            Tone::Peach => (0xfa, 0xb3, 0x87),
            Tone::Red => (0xf3, 0x8b, 0xa8),
            Tone::Mauve => (0xcb, 0xa6, 0xf7),
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        let (r, g, b) = self.rgb();
        text.truecolor(r, g, b)
    }
}

pub fn terminal_width() -> usize {
    env::var("TERM_WIDTH")
        .ok()
        .and_then(|w| w.parse().ok())
        .or_else(|| env::var("COLUMNS").ok().and_then(|c| c.parse().ok()))
        .unwrap_or(80)
}

/// Terminal width clamped to a sensible drawing range
pub fn layout_width() -> usize {
    terminal_width().clamp(MIN_WIDTH, MAX_WIDTH)
}

pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to at most `max` chars, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Right-pad `text` with spaces to `width` chars
pub fn pad(text: &str, width: usize) -> String {
    let len = display_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Left-pad `text` with spaces to `width` chars
pub fn pad_left(text: &str, width: usize) -> String {
    let len = display_width(text);
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

/// Greedy word wrap; blank lines in the input are kept
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                display_width(word)
            } else {
                display_width(&current) + 1 + display_width(word)
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

/// Progress bar of `width` cells, colored by how full it is
pub fn gradient_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * width as f64) as usize;
    let empty = width - filled;

    let fill_tone = if ratio >= 0.8 {
        Tone::Green
    } else if ratio >= 0.5 {
        Tone::Teal
    } else if ratio >= 0.3 {
        Tone::Yellow
    } else {
        Tone::Peach
    };

    format!(
        "{}{}",
        fill_tone.paint(&"█".repeat(filled)),
        Tone::Overlay.paint(&"░".repeat(empty))
    )
}

/// Tone for a percentage readout
pub fn percent_tone(percent: u32) -> Tone {
    if percent >= 80 {
        Tone::Green
    } else if percent >= 50 {
        Tone::Yellow
    } else {
        Tone::Peach
    }
}

/// Plain sparkline glyphs for the last seven values
///
/// Values are scaled between their own min and max; a flat series renders
/// as the lowest glyph. Short series are left-padded to seven glyphs.
pub fn sparkline_glyphs(values: &[f64]) -> String {
    const LEN: usize = 7;
    let values = &values[values.len().saturating_sub(LEN)..];
    if values.is_empty() {
        return SPARK_CHARS[0].to_string().repeat(LEN);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max > min { max - min } else { 1.0 };

    let spark: String = values
        .iter()
        .map(|v| {
            let index = (((v - min) / range) * 7.0) as usize;
            SPARK_CHARS[index.min(7)]
        })
        .collect();

    format!("{}{}", SPARK_CHARS[0].to_string().repeat(LEN - values.len()), spark)
}

/// Sparkline with a cool-to-warm color per position
pub fn sparkline(values: &[f64]) -> String {
    const TONES: [Tone; 7] = [
        Tone::Blue,
        Tone::Sapphire,
        Tone::Sky,
        Tone::Teal,
        Tone::Green,
        Tone::Yellow,
        Tone::Peach,
    ];

    sparkline_glyphs(values)
        .chars()
        .enumerate()
        .map(|(i, c)| TONES[i % TONES.len()].paint(&c.to_string()).to_string())
        .collect()
}

/// Stars for a priority: five for priority 1, one for priority 5 and below
pub fn priority_stars(priority: u8) -> String {
    let count = 6usize.saturating_sub(priority as usize).max(1);
    "★".repeat(count)
}

/// Rounded box around `lines`, with a title in the top border
pub fn panel(title: &str, lines: &[String], tone: Tone, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4).max(1);
    let title = truncate(title, inner.saturating_sub(2));
    let title_len = display_width(&title) + 2;

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!(
        "{}{}{}",
        tone.paint("╭─"),
        Tone::Text.paint(&format!(" {} ", title)).bold(),
        tone.paint(&format!("{}╮", "─".repeat((inner + 1).saturating_sub(title_len))))
    ));
    for line in lines {
        out.push(format!(
            "{} {} {}",
            tone.paint("│"),
            pad(&truncate(line, inner), inner),
            tone.paint("│")
        ));
    }
    out.push(tone.paint(&format!("╰{}╯", "─".repeat(inner + 2))).to_string());
    out
}

/// Column alignment in a [`Table`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A simple rounded-border table
#[derive(Debug, Default)]
pub struct Table {
    title: Option<String>,
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn column(mut self, header: impl Into<String>, align: Align) -> Self {
        self.headers.push((header.into(), align));
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| display_width(cell))
                    .chain(std::iter::once(display_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn cell(text: &str, width: usize, align: Align) -> String {
        match align {
            Align::Left => pad(text, width),
            Align::Right => pad_left(text, width),
            Align::Center => {
                let space = width.saturating_sub(display_width(text));
                let left = space / 2;
                format!("{}{}{}", " ".repeat(left), text, " ".repeat(space - left))
            }
        }
    }

    fn rule(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    }

    /// Render to lines, plain text with a dimmed border
    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        let total = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        let border = |s: &str| Tone::Overlay.paint(s).to_string();
        let bar = border("│");

        let line = |cells: Vec<String>| {
            let cells: Vec<String> = cells.into_iter().map(|c| format!(" {} ", c)).collect();
            format!("{}{}{}", bar, cells.join(bar.as_str()), bar)
        };

        let mut out = Vec::new();
        if let Some(title) = &self.title {
            out.push(pad_left(title, (total + display_width(title)) / 2).bold().to_string());
        }
        out.push(border(&Self::rule(&widths, "╭", "┬", "╮")));
        out.push(line(
            self.headers
                .iter()
                .zip(&widths)
                .map(|((h, align), w)| Self::cell(h, *w, *align).bold().to_string())
                .collect(),
        ));
        out.push(border(&Self::rule(&widths, "├", "┼", "┤")));
        for row in &self.rows {
            out.push(line(
                self.headers
                    .iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(i, ((_, align), w))| {
                        Self::cell(row.get(i).map(String::as_str).unwrap_or(""), *w, *align)
                    })
                    .collect(),
            ));
        }
        out.push(border(&Self::rule(&widths, "╰", "┴", "╯")));
        out
    }
}

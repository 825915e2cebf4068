//! # Rendering
//!
//! Turns command results into terminal text. Every function returns a
//! `String` and takes `use_color`, so tests compare plain output while the
//! binary colors whatever goes to a terminal.
//!
//! Layout math (width, truncation, padding) is Unicode-aware: emoji and CJK
//! titles take two columns and are measured with `unicode-width`.

use chrono::Local;
use console::{Color, Style};
use countdownapp::clock::DisplayState;
use countdownapp::commands::{CmdMessage, DisplayCountdown, MessageLevel};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const REMAINING_WIDTH: usize = 16;
pub const EMOJI_WIDTH: usize = 2;
const ID_WIDTH: usize = 32;

fn style(use_color: bool) -> Style {
    Style::new().force_styling(use_color)
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let styled = match message.level {
            MessageLevel::Info => style(use_color).dim(),
            MessageLevel::Success => style(use_color).green(),
            MessageLevel::Warning => style(use_color).yellow(),
            MessageLevel::Error => style(use_color).red(),
        };
        out.push_str(&format!("{}\n", styled.apply_to(&message.content)));
    }
    out
}

/// One line per countdown: emoji, title, time left, id.
pub fn render_list(listed: &[DisplayCountdown], use_color: bool) -> String {
    let mut out = String::new();
    for shown in listed {
        out.push_str(&render_line(shown, use_color));
        out.push('\n');
    }
    out
}

fn render_line(shown: &DisplayCountdown, use_color: bool) -> String {
    let record = &shown.record;

    let emoji = fit(&record.emoji, EMOJI_WIDTH);
    let fixed = EMOJI_WIDTH + 1 + 2 + REMAINING_WIDTH + 2 + ID_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&record.title, available);
    let padding = available.saturating_sub(title.width());

    let remaining = format!("{:>width$}", shown.state.to_string(), width = REMAINING_WIDTH);
    let remaining_style = match shown.state {
        DisplayState::Arrived => style(use_color).green().bold(),
        DisplayState::Remaining(_) => style(use_color),
    };

    format!(
        "{} {}{}  {}  {}",
        emoji,
        accent(&record.color, use_color).apply_to(title),
        " ".repeat(padding),
        remaining_style.apply_to(remaining),
        style(use_color).dim().apply_to(&record.id)
    )
}

/// Everything about one countdown, one field per line.
pub fn render_full(shown: &DisplayCountdown, use_color: bool) -> String {
    let record = &shown.record;
    let label = style(use_color).dim();
    let local = record.target.with_timezone(&Local);

    let mut out = format!(
        "{} {}\n",
        record.emoji,
        accent(&record.color, use_color).bold().apply_to(&record.title)
    );
    out.push_str("--------------------------------\n");
    if !record.description.is_empty() {
        out.push_str(&format!("{}\n\n", record.description));
    }
    out.push_str(&format!(
        "{} {}\n",
        label.apply_to("Target:   "),
        local.format("%Y-%m-%d %H:%M:%S %Z")
    ));
    out.push_str(&format!("{} {}\n", label.apply_to("Remaining:"), shown.state));
    out.push_str(&format!("{} {}\n", label.apply_to("Color:    "), record.color));
    out.push_str(&format!("{} {}\n", label.apply_to("Id:       "), record.id));
    out
}

/// The one-off line `watch` prints when a countdown flips to arrived.
pub fn render_arrival(shown: &DisplayCountdown, use_color: bool) -> String {
    format!(
        "{} {} has arrived. {}\n",
        shown.record.emoji,
        style(use_color).bold().apply_to(&shown.record.title),
        style(use_color).green().bold().apply_to(&shown.state)
    )
}

/// Title color from the record's `#RRGGBB` accent, plain if it does not parse.
fn accent(color: &str, use_color: bool) -> Style {
    match hex_to_rgb(color) {
        Some(rgb) => style(use_color).fg(Color::Color256(rgb_to_ansi256(rgb))),
        None => style(use_color),
    }
}

fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Nearest xterm-256 color: the 6x6x6 cube, or the grayscale ramp for grays.
fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((u16::from(r) - 8) * 24 / 247) as u8;
    }
    let cube = |v: u8| (u16::from(v) * 5 / 255) as u8;
    16 + 36 * cube(r) + 6 * cube(g) + cube(b)
}

/// Pad or cut `s` to exactly `width` columns.
fn fit(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let padding = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the omnibar CLI.
//!
//! Box drawing, kind badges, and score coloring for suggestion output.
//! Plain 16-color ANSI only; respects `NO_COLOR` and non-TTY stdout so
//! piped output stays clean.

use omnibar::types::{MatchField, SuggestionKind};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// Badge column width, sized for the widest kind name plus brackets.
const BADGE_WIDTH: usize = 10;

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
}

pub use colors::*;

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply color if TTY, otherwise return plain text
pub fn paint(color: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

/// Apply multiple styles
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Dim secondary text
pub fn dim(text: &str) -> String {
    styled(&[DIM], text)
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = paint(GRAY, "│");
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border, content, " ".repeat(pad), border);
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let colored_label = styled(&[BOLD, CYAN], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        paint(GRAY, "┌"),
        label_part,
        paint(GRAY, &format!("{}┐", "─".repeat(remaining))),
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let colored_label = styled(&[BOLD, CYAN], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        paint(GRAY, "├"),
        label_part,
        paint(GRAY, &format!("{}┤", "─".repeat(remaining))),
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", paint(GRAY, &format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded provenance badge, padded to a fixed column width
pub fn kind_badge(kind: SuggestionKind) -> String {
    let text = format!("[{}]", kind.as_str());
    let colored = if use_colors() {
        let color = match kind {
            SuggestionKind::Recent => CYAN,
            SuggestionKind::Popular => MAGENTA,
            SuggestionKind::Intent => BRIGHT_MAGENTA,
            SuggestionKind::Filter => YELLOW,
            SuggestionKind::Shortcut => BLUE,
            SuggestionKind::Result => GREEN,
        };
        format!("{}{}{}", color, text, RESET)
    } else {
        text
    };
    pad_right(&colored, BADGE_WIDTH)
}

/// Color-coded match field label
pub fn field_label(field: MatchField) -> String {
    if !use_colors() {
        return format!("{:<11}", field.as_str());
    }
    let color = match field {
        MatchField::Title => BRIGHT_GREEN,
        MatchField::Tag => CYAN,
        MatchField::Category => BLUE,
        MatchField::Description => GRAY,
    };
    format!("{}{:<11}{}", color, field.as_str(), RESET)
}

/// Color-coded score value
pub fn score_value(score: f64) -> String {
    if !use_colors() {
        return format!("{:>7.1}", score);
    }
    let color = if score >= 100.0 {
        BRIGHT_GREEN
    } else if score >= 50.0 {
        GREEN
    } else if score >= 20.0 {
        YELLOW
    } else {
        GRAY
    };
    format!("{}{:>7.1}{}", color, score, RESET)
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════

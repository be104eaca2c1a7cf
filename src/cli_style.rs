use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use std::io::{self, BufRead, Write};
use unicode_width::UnicodeWidthStr;

use crate::pages::Confirm;

const SECTION_WIDTH: usize = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let bold = |color: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    Styles::styled()
        .usage(bold(AnsiColor::Cyan).underline())
        .header(bold(AnsiColor::Cyan).underline())
        .literal(bold(AnsiColor::Green))
        .invalid(bold(AnsiColor::Red))
        .error(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgb { r, g, b }
    }

    /// Borders and headings.
    pub const FRAME: Color = rgb(0, 255, 255);
    pub const BULLET: Color = rgb(180, 100, 255);
    pub const SUCCESS: Color = rgb(0, 255, 136);
    pub const WARNING: Color = rgb(255, 165, 0);
    pub const ERROR: Color = rgb(255, 85, 85);
    pub const MUTED: Color = rgb(128, 128, 128);
    pub const TEXT: Color = rgb(255, 255, 255);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::SUCCESS).bold(),
        message.with(colors::SUCCESS)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::ERROR).bold(),
        message.with(colors::ERROR)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::WARNING).bold(),
        message.with(colors::WARNING)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_section_header(title: &str) {
    let left = SECTION_WIDTH.saturating_sub(title.width() + 4) / 2;
    let right = SECTION_WIDTH.saturating_sub(title.width() + 4 + left);
    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::ROUND_TOP_LEFT.with(colors::FRAME),
        box_chars::HORIZONTAL.repeat(left).with(colors::FRAME),
        title.with(colors::FRAME).bold().attribute(Attribute::Italic),
        box_chars::HORIZONTAL.repeat(right).with(colors::FRAME),
        box_chars::ROUND_TOP_RIGHT.with(colors::FRAME)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::ROUND_BOTTOM_LEFT.with(colors::FRAME),
        box_chars::HORIZONTAL.repeat(SECTION_WIDTH).with(colors::FRAME),
        box_chars::ROUND_BOTTOM_RIGHT.with(colors::FRAME)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::BULLET),
        format!("{}:", key).with(colors::MUTED),
        value.with(colors::TEXT)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::MUTED),
        message.with(colors::MUTED).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

/// Box-drawn table whose columns are sized by display width, so composer
/// names with diacritics or CJK titles still line up.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        TableBuilder {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.width());
            }
        }
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn border(&self, left: &str, junction: &str, right: &str) -> String {
        let inner: Vec<String> = self
            .col_widths
            .iter()
            .map(|width| box_chars::HORIZONTAL.repeat(width + 2))
            .collect();
        format!("{}{}{}", left, inner.join(junction), right)
    }

    fn cells(&self, row: &[String]) -> Vec<String> {
        self.col_widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!(" {}{} ", cell, " ".repeat(width.saturating_sub(cell.width())))
            })
            .collect()
    }

    /// Uncolored lines, top border to bottom border.
    pub fn lines(&self) -> Vec<String> {
        let vertical = box_chars::VERTICAL;
        let mut lines = vec![self.border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        )];
        lines.push(format!(
            "{}{}{}",
            vertical,
            self.cells(&self.headers).join(vertical),
            vertical
        ));
        lines.push(self.border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT));
        for row in &self.rows {
            lines.push(format!(
                "{}{}{}",
                vertical,
                self.cells(row).join(vertical),
                vertical
            ));
        }
        lines.push(self.border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        ));
        lines
    }

    pub fn print(&self) {
        let lines = self.lines();
        let last = lines.len() - 1;
        for (i, line) in lines.into_iter().enumerate() {
            // Header row bold, body rows white, borders cyan.
            match i {
                1 => println!("{}", line.with(colors::FRAME).bold()),
                0 | 2 => println!("{}", line.with(colors::FRAME)),
                i if i == last => println!("{}", line.with(colors::FRAME)),
                _ => println!("{}", line.with(colors::TEXT)),
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Confirmation Prompt
// ═══════════════════════════════════════════════════════════════════════════════

/// Asks on stdin before destructive actions. Anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!(
            "{} {} {} ",
            "?".with(colors::WARNING).bold(),
            prompt.with(colors::TEXT).bold(),
            "[y/N]".with(colors::MUTED)
        );
        flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn flush() {
    let _ = io::stdout().flush();
}

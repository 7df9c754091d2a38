//! Line and block helpers for rendered terminal text.
//!
//! Widths are measured ANSI-aware, so styled text from `lipgloss` can be
//! fitted and joined the same way as plain text.

use console::{measure_text_width, truncate_str};

/// Horizontal placement of a row narrower than its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn next(self) -> Self {
        match self {
            Align::Left => Align::Center,
            Align::Center => Align::Right,
            Align::Right => Align::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Align::Left => "Left",
            Align::Center => "Center",
            Align::Right => "Right",
        }
    }
}

pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Widest line of a block.
pub fn block_width(block: &str) -> usize {
    block.lines().map(display_width).max().unwrap_or(0)
}

fn fill_run(fill: char, n: usize) -> String {
    std::iter::repeat(fill).take(n).collect()
}

/// Cut a line down to at most `width` columns.
pub fn clip_line(line: &str, width: usize) -> String {
    truncate_str(line, width, "").into_owned()
}

/// Clip or right-pad a single line to exactly `width` columns.
pub fn fit_line(line: &str, width: usize) -> String {
    let clipped = clip_line(line, width);
    let w = display_width(&clipped);
    format!("{clipped}{}", fill_run(' ', width.saturating_sub(w)))
}

/// Clip or pad `text` to exactly `width` x `height`.
pub fn normalize_block(text: &str, width: usize, height: usize) -> String {
    let mut lines: Vec<String> = text.lines().map(|l| fit_line(l, width)).collect();
    if lines.len() > height {
        lines.truncate(height);
    } else {
        while lines.len() < height {
            lines.push(fit_line("", width));
        }
    }
    lines.join("\n")
}

/// Grow `text` to at least `width` x `height` without clipping anything.
pub fn pad_block(text: &str, width: usize, height: usize) -> String {
    let mut lines: Vec<String> = text
        .lines()
        .map(|l| {
            let w = display_width(l);
            format!("{l}{}", fill_run(' ', width.saturating_sub(w)))
        })
        .collect();
    while lines.len() < height {
        lines.push(fill_run(' ', width));
    }
    lines.join("\n")
}

pub fn blank_block(width: usize, height: usize) -> String {
    normalize_block("", width, height)
}

/// Place `line` inside `width` columns using `fill` for the gap.
/// Lines already at or beyond `width` are returned unchanged.
pub fn align_line(line: &str, width: usize, align: Align, fill: char) -> String {
    let gap = width.saturating_sub(display_width(line));
    if gap == 0 {
        return line.to_string();
    }
    match align {
        Align::Left => format!("{line}{}", fill_run(fill, gap)),
        Align::Right => format!("{}{line}", fill_run(fill, gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{line}{}", fill_run(fill, left), fill_run(fill, gap - left))
        }
    }
}

/// Join blocks side by side into `height` lines. A block shorter than the
/// others is padded with blank lines of its own width.
pub fn join_horizontal(blocks: &[String], height: usize) -> Vec<String> {
    let split: Vec<(Vec<&str>, usize)> = blocks
        .iter()
        .map(|b| (b.lines().collect(), block_width(b)))
        .collect();
    (0..height)
        .map(|i| {
            split
                .iter()
                .map(|(lines, w)| match lines.get(i) {
                    Some(l) => (*l).to_string(),
                    None => fill_run(' ', *w),
                })
                .collect::<String>()
        })
        .collect()
}

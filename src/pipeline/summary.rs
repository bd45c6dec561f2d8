//! Page summaries used as feed entry titles.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Page, SummaryStyle};

/// Marks an outage window.
const MOON: &str = "🌚";
/// Marks the supply window between two outages.
const SUN: &str = "🌞";

/// `09:00 - 13:00`; the separator (hyphen or en-dash with its spaces) is kept.
static WINDOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2})(\s?[-\u{2013}]\s?)(\d{1,2}:\d{2})$").expect("valid regex")
});

impl SummaryStyle {
    /// Render `page` as title followed by one line per schedule entry.
    pub fn render(self, page: &Page) -> String {
        let lines = match self {
            Self::Merged => merged_lines(page),
            Self::Listed => listed_lines(page),
            Self::Tabular => tabular_lines(page),
        };

        let mut summary = page.title.clone();
        for line in lines {
            summary.push('\n');
            summary.push_str(&line);
        }
        summary
    }
}

/// Clock-range labels with contiguous ranges joined.
///
/// Rows are taken in page order: `10:00-11:00` followed by `11:00-12:00`
/// becomes `10:00-12:00`, but ranges that only touch out of order stay apart.
/// Labels that are not ranges are kept as their own line.
fn merged_lines(page: &Page) -> Vec<String> {
    let mut spans: Vec<(String, Option<String>)> = Vec::with_capacity(page.rows.len());
    for row in &page.rows {
        let Some((start, end)) = row.label.split_once('-') else {
            spans.push((row.label.clone(), None));
            continue;
        };
        if let Some((_, Some(last_end))) = spans.last_mut()
            && *last_end == start
        {
            *last_end = end.to_string();
            continue;
        }
        spans.push((start.to_string(), Some(end.to_string())));
    }

    spans
        .into_iter()
        .map(|(start, end)| match end {
            Some(end) => format!("{start}-{end}"),
            None => start,
        })
        .collect()
}

fn listed_lines(page: &Page) -> Vec<String> {
    page.rows
        .iter()
        .map(|row| format!("{}: {}", row.label, row.value))
        .collect()
}

fn tabular_lines(page: &Page) -> Vec<String> {
    let mut lines = Vec::new();
    for row in &page.rows {
        lines.push(format!("{}: {}", row.label, row.value));
        lines.extend(window_lines(&row.value));
    }
    lines
}

/// Outage window within a row value.
struct Window<'a> {
    start: &'a str,
    sep: &'a str,
    end: &'a str,
}

fn parse_window(token: &str) -> Option<Window<'_>> {
    let caps = WINDOW.captures(token)?;
    Some(Window {
        start: caps.get(1)?.as_str(),
        sep: caps.get(2)?.as_str(),
        end: caps.get(3)?.as_str(),
    })
}

/// Split a value such as `09:00 - 13:00, 15:00 - 18:00` into moon-marked
/// outage lines with sun-marked gaps between them.
///
/// If any token is not a time window the tokens are returned unmarked.
fn window_lines(value: &str) -> Vec<String> {
    let tokens: Vec<&str> = value
        .split(", ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let Some(windows) = tokens
        .iter()
        .map(|&t| parse_window(t))
        .collect::<Option<Vec<_>>>()
    else {
        return tokens.into_iter().map(str::to_string).collect();
    };

    let mut lines = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            let (prev, next) = (&windows[i - 1], &windows[i]);
            lines.push(format!("{SUN} {}{}{}", prev.end, prev.sep, next.start));
        }
        lines.push(format!("{MOON} {token}"));
    }
    lines
}

//! Announcement page and schedule row types.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Numeric id of an announcement, taken from its `/news/<id>` path.
pub type AnnouncementId = u64;

/// `H:MM-H:MM`, tolerating an en-dash and spaces around the separator.
static CLOCK_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2})\s*[-\u{2013}]\s*(\d{1,2}:\d{2})$").expect("valid regex")
});

/// Queue digit, a dot, then a sub-queue written as a digit or a roman numeral
/// in either Latin `I` or Cyrillic `І`.
static PERIOD_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\.(?:\d|[IVX\u{0406}]{1,4})$").expect("valid regex"));

/// One announcement's extracted schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Document `<title>` text, verbatim
    pub title: String,

    /// Schedule rows: tabular rows first, then paragraph rows
    pub rows: Vec<Row>,
}

impl Page {
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }
}

/// A `(label, value)` pair of a schedule.
///
/// The label is either a clock range (`14:00-15:00`, value lists affected
/// queues) or a period code (`4.ІІ`, value lists outage windows).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

impl Row {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Recognised shape of this row's label.
    pub fn label_kind(&self) -> Option<LabelKind> {
        LabelKind::of(&self.label)
    }
}

/// The two label shapes a schedule row may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    ClockRange,
    PeriodCode,
}

impl LabelKind {
    pub fn of(label: &str) -> Option<Self> {
        if CLOCK_RANGE.is_match(label) {
            Some(Self::ClockRange)
        } else if PERIOD_CODE.is_match(label) {
            Some(Self::PeriodCode)
        } else {
            None
        }
    }
}

/// Check whether `label` is a period code such as `4.ІІ` or `2.2`.
pub fn is_period_code(label: &str) -> bool {
    PERIOD_CODE.is_match(label)
}

/// Normalise a raw row label.
///
/// Trims whitespace and a single trailing colon; clock ranges are rewritten
/// as `start-end`. Returns `None` when the label has neither known shape.
pub fn normalize_label(raw: &str) -> Option<String> {
    let label = raw.trim();
    let label = label.strip_suffix(':').unwrap_or(label).trim_end();

    if let Some(caps) = CLOCK_RANGE.captures(label) {
        return Some(format!("{}-{}", &caps[1], &caps[2]));
    }
    is_period_code(label).then(|| label.to_string())
}

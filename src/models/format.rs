//! Schedule format discriminants and the variants that act on them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::page::{LabelKind, Page};
use crate::error::{AppError, Result};

/// Layout family of an announcement's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFormat {
    /// Rows labelled by clock range; values list affected queues.
    Hourly,
    /// Rows labelled by period code; values list outage windows.
    Periodic,
}

impl ScheduleFormat {
    /// Detect the format from row labels. A single period-code row is enough.
    pub fn detect(page: &Page) -> Self {
        if page
            .rows
            .iter()
            .any(|row| row.label_kind() == Some(LabelKind::PeriodCode))
        {
            Self::Periodic
        } else {
            Self::Hourly
        }
    }
}

/// Which shard (queue) a subscriber cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardSelector {
    /// Single-digit queue number, matched as a substring of row values.
    Number(u8),
    /// Period code such as `4.II`, matched against row labels.
    Code(String),
}

impl ShardSelector {
    /// Build a numeric selector. Only single-digit queues can be matched
    /// by substring, so anything outside `1..=9` is rejected.
    pub fn number(shard: u8) -> Result<Self> {
        if (1..=9).contains(&shard) {
            Ok(Self::Number(shard))
        } else {
            Err(AppError::validation(format!(
                "shard number must be between 1 and 9, got {shard}; use a shard code instead"
            )))
        }
    }

    /// Build a code selector.
    pub fn code(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("shard code is empty"));
        }
        Ok(Self::Code(code.to_string()))
    }
}

impl fmt::Display for ShardSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "queue {n}"),
            Self::Code(code) => write!(f, "queue {code}"),
        }
    }
}

/// How a page is rendered into a feed entry title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    /// Clock ranges merged into contiguous intervals
    Merged,
    /// `label: value` lines
    Listed,
    /// `label: value` plus moon/sun marked outage and supply windows
    Tabular,
}

/// Configured summary choice; `Auto` defers to the detected format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    #[default]
    Auto,
    Merged,
    Listed,
    Tabular,
}

impl SummaryMode {
    pub fn resolve(self, format: ScheduleFormat) -> SummaryStyle {
        match (self, format) {
            (Self::Auto, ScheduleFormat::Hourly) => SummaryStyle::Merged,
            (Self::Auto, ScheduleFormat::Periodic) => SummaryStyle::Listed,
            (Self::Merged, _) => SummaryStyle::Merged,
            (Self::Listed, _) => SummaryStyle::Listed,
            (Self::Tabular, _) => SummaryStyle::Tabular,
        }
    }
}

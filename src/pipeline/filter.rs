//! Shard filtering.
//!
//! Removes rows that do not concern the subscriber's queue. Titles are never
//! touched and pages left without rows stay in the collection.

use std::collections::BTreeMap;

use crate::models::{AnnouncementId, Page, Row, ScheduleFormat, ShardSelector};

/// Cyrillic capital I, used interchangeably with Latin `I` in period codes.
const CYRILLIC_I: &str = "\u{0406}";

impl ShardSelector {
    /// Check whether `row` of a page laid out as `format` concerns this shard.
    ///
    /// - `Number` on hourly pages: the row value contains the digit, e.g. `4`
    ///   in `3, 4 та 5 черги`.
    /// - `Number` on periodic pages: the row label is one of the queue's
    ///   sub-periods, e.g. `4.I` or `4.2` for queue 4. Values there are clock
    ///   times, so they never identify a queue.
    /// - `Code`: the row label equals the code, with Latin `I` also accepted
    ///   in its Cyrillic spelling.
    pub fn keeps(&self, row: &Row, format: ScheduleFormat) -> bool {
        match (self, format) {
            (Self::Number(n), ScheduleFormat::Hourly) => row.value.contains(&n.to_string()),
            (Self::Number(n), ScheduleFormat::Periodic) => {
                row.label.starts_with(&format!("{n}."))
            }
            (Self::Code(code), _) => {
                row.label == *code || row.label == code.replace('I', CYRILLIC_I)
            }
        }
    }

    /// Drop the rows of `page` that do not concern this shard.
    pub fn retain_rows(&self, page: &mut Page) {
        let format = ScheduleFormat::detect(page);
        page.rows.retain(|row| self.keeps(row, format));
    }
}

/// Filter every page in place.
pub fn filter_pages(pages: &mut BTreeMap<AnnouncementId, Page>, selector: &ShardSelector) {
    for (id, page) in pages.iter_mut() {
        let before = page.rows.len();
        selector.retain_rows(page);
        log::debug!(
            "Announcement {id}: kept {} of {before} rows for {selector}",
            page.rows.len()
        );
    }
}

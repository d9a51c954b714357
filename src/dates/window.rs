use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

use super::parse_datetime;

/// Reporting horizon for a meeting index.
///
/// Index feeds are append-only and historically long; without a window
/// every run would reprocess years of stale entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Dates in the same calendar year as the reference time.
    CurrentYear,
    /// Dates no older than `months` before the reference time, with no
    /// forward bound.
    Trailing { months: u32 },
    /// Dates within `months` on either side of the reference time.
    Surrounding { months: u32 },
}

impl DateWindow {
    /// Window edges around `now`, inclusive. `None` means unbounded on
    /// that side.
    pub fn bounds(&self, now: NaiveDateTime) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        match *self {
            DateWindow::CurrentYear => {
                let first = NaiveDate::from_ymd_opt(now.year(), 1, 1)
                    .map(|date| date.and_time(NaiveTime::MIN));
                let last = NaiveDate::from_ymd_opt(now.year(), 12, 31)
                    .and_then(|date| date.and_hms_opt(23, 59, 59));
                (first, last)
            }
            DateWindow::Trailing { months } => {
                (now.checked_sub_months(Months::new(months)), None)
            }
            DateWindow::Surrounding { months } => (
                now.checked_sub_months(Months::new(months)),
                now.checked_add_months(Months::new(months)),
            ),
        }
    }

    /// Whether `moment` falls inside the window anchored at `now`.
    pub fn contains(&self, moment: NaiveDateTime, now: NaiveDateTime) -> bool {
        if let DateWindow::CurrentYear = self {
            return moment.year() == now.year();
        }
        let (earliest, latest) = self.bounds(now);
        earliest.map_or(true, |edge| moment >= edge) && latest.map_or(true, |edge| moment <= edge)
    }

    /// Parse `date_str` and hand the moment back only when it falls inside
    /// the window. Absent and unparseable dates are excluded, not errors.
    pub fn admit(&self, date_str: Option<&str>, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let moment = date_str.and_then(parse_datetime)?;
        self.contains(moment, now).then_some(moment)
    }

    /// The filtering decision for one raw date string.
    pub fn keeps(&self, date_str: Option<&str>, now: NaiveDateTime) -> bool {
        self.admit(date_str, now).is_some()
    }
}

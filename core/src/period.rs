//! # Period Resolution
//!
//! Turns the user's period selection into the concrete date window sent to
//! the backend.
//!
//! ## Rules
//! - Explicit start/end bounds, when both are set, win over any mode.
//! - Weekly windows run Monday..Sunday around "today" and are recomputed on
//!   every call, never frozen at selection time.
//! - Monthly windows cover a whole calendar month; missing month/year parts
//!   come from "today".
//! - All-time is unbounded on both sides.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Selection mode driving the default date bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    Weekly,
    Monthly,
    Custom,
    All,
}

impl PeriodMode {
    /// Label passed to the backend for period labelling
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodMode::Weekly => "weekly",
            PeriodMode::Monthly => "monthly",
            PeriodMode::Custom => "custom",
            PeriodMode::All => "all",
        }
    }
}

/// The user's current period and filter choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: PeriodMode,
    /// 1..=12
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub explicit_start: Option<NaiveDate>,
    pub explicit_end: Option<NaiveDate>,
    pub search: String,
}

/// Concrete window; `None` on a side means unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ResolvedRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl Selection {
    /// Mount-time default: the current month
    pub fn monthly(today: NaiveDate) -> Self {
        Self {
            mode: PeriodMode::Monthly,
            month: Some(today.month()),
            year: Some(today.year()),
            explicit_start: None,
            explicit_end: None,
            search: String::new(),
        }
    }

    pub fn has_explicit_range(&self) -> bool {
        self.explicit_start.is_some() && self.explicit_end.is_some()
    }

    /// Period label sent to the summary and insight endpoints
    pub fn period_label(&self) -> &'static str {
        if self.has_explicit_range() {
            PeriodMode::Custom.as_str()
        } else {
            self.mode.as_str()
        }
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Select a specific month, clamped so it never lies in the future
    pub fn set_month(&mut self, month: u32, year: i32, today: NaiveDate) {
        let (month, year) = clamp_month(month, year, today);
        self.mode = PeriodMode::Monthly;
        self.month = Some(month);
        self.year = Some(year);
        self.clear_explicit_range();
    }

    pub fn clear_explicit_range(&mut self) {
        self.explicit_start = None;
        self.explicit_end = None;
    }

    /// Human caption for the current window ("this week", "Mar 2025", ...)
    pub fn caption(&self, today: NaiveDate) -> String {
        if self.has_explicit_range() {
            return "selected range".to_string();
        }
        match self.mode {
            PeriodMode::Weekly => "this week".to_string(),
            PeriodMode::Monthly => {
                let month = self.month.unwrap_or_else(|| today.month());
                let year = self.year.unwrap_or_else(|| today.year());
                if month == today.month() && year == today.year() {
                    "this month".to_string()
                } else {
                    month_label(month, year)
                }
            }
            PeriodMode::Custom => "selected range".to_string(),
            PeriodMode::All => "all time".to_string(),
        }
    }
}

/// Resolve a selection into a concrete window relative to `today`
pub fn resolve(selection: &Selection, today: NaiveDate) -> ResolvedRange {
    if let (Some(start), Some(end)) = (selection.explicit_start, selection.explicit_end) {
        return ResolvedRange {
            start: Some(start),
            end: Some(end),
        };
    }

    match selection.mode {
        PeriodMode::Weekly => week_of(today),
        PeriodMode::Monthly => {
            let year = selection.year.unwrap_or_else(|| today.year());
            let month = selection.month.unwrap_or_else(|| today.month());
            month_range(year, month).unwrap_or_else(|| current_month(today))
        }
        PeriodMode::All => ResolvedRange::unbounded(),
        PeriodMode::Custom => ResolvedRange {
            start: selection.explicit_start,
            end: selection.explicit_end,
        },
    }
}

/// Monday..Sunday of the ISO week containing `day`
pub fn week_of(day: NaiveDate) -> ResolvedRange {
    let start = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
    ResolvedRange {
        start: Some(start),
        end: Some(start + Duration::days(6)),
    }
}

/// First..last day of a calendar month, `None` for an invalid month
pub fn month_range(year: i32, month: u32) -> Option<ResolvedRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(ResolvedRange {
        start: Some(first),
        end: Some(next_first - Duration::days(1)),
    })
}

fn current_month(today: NaiveDate) -> ResolvedRange {
    let first = today.with_day(1).unwrap_or(today);
    month_range(first.year(), first.month()).unwrap_or(ResolvedRange {
        start: Some(first),
        end: Some(today),
    })
}

/// Clamp a month/year pick to 1..=12 and to no later than today's month
pub fn clamp_month(month: u32, year: i32, today: NaiveDate) -> (u32, i32) {
    let month = month.clamp(1, 12);
    if year > today.year() || (year == today.year() && month > today.month()) {
        (today.month(), today.year())
    } else {
        (month, year)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "Jan",
    }
}

/// "Mar 2025"
pub fn month_label(month: u32, year: i32) -> String {
    format!("{} {}", month_name(month), year)
}

/// An entry in the month picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    pub month: u32,
    pub year: i32,
    pub label: String,
}

/// The `count` most recent months ending with today's, newest first
pub fn recent_months(today: NaiveDate, count: u32) -> Vec<MonthOption> {
    let mut month = today.month();
    let mut year = today.year();
    let mut options = Vec::with_capacity(count as usize);
    for _ in 0..count {
        options.push(MonthOption {
            month,
            year,
            label: month_label(month, year),
        });
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    options
}

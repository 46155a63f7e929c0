use chrono::{Local, NaiveDate};

/// Source of "now" for range resolution and throttling
pub trait Clock {
    fn today(&self) -> NaiveDate;
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock in the local timezone (the browser's when built for wasm)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Manually driven clock, noon on a fixed date until advanced
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct FixedClock {
    now: std::cell::Cell<chrono::NaiveDateTime>,
}

#[cfg(test)]
impl FixedClock {
    pub fn at_date(year: i32, month: u32, day: u32) -> Self {
        let now = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        Self {
            now: std::cell::Cell::new(now),
        }
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now
            .set(self.now.get() + chrono::Duration::milliseconds(millis));
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now.get().date()
    }

    fn now_millis(&self) -> i64 {
        self.now.get().and_utc().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::at_date(2025, 3, 10);
        let start = clock.now_millis();
        clock.advance_millis(60_000);
        assert_eq!(clock.now_millis() - start, 60_000);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }
}

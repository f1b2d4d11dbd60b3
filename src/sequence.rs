use chrono::{Days, NaiveDate};

const DATE_FORMAT: &str = "%Y%m%d";

/// Hands out counter values and the run's fixed settlement date.
///
/// One allocator lives for exactly one run; the date is derived from the
/// run start once and never recomputed, so a run crossing midnight keeps a
/// single date.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    base: u64,
    issued: u64,
    date: String,
}

/// Value of the `count`-th row of a run, or `None` if it does not fit in `u64`.
pub fn last_value(base: u64, count: u64) -> Option<u64> {
    count.checked_sub(1).and_then(|offset| base.checked_add(offset))
}

impl SequenceAllocator {
    pub fn new(base: u64, run_day: NaiveDate) -> Self {
        let tomorrow = run_day.checked_add_days(Days::new(1)).unwrap_or(run_day);
        Self {
            base,
            issued: 0,
            date: tomorrow.format(DATE_FORMAT).to_string(),
        }
    }

    /// Returns the current value and advances the cursor.
    ///
    /// Callers bound the run with [`last_value`] first; the cursor itself
    /// never steps past the last value handed out.
    pub fn next(&mut self) -> u64 {
        let value = self.base + self.issued;
        self.issued += 1;
        value
    }

    pub fn current_date(&self) -> &str {
        &self.date
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Last value handed out, or `None` before the first `next()`.
    pub fn last_issued(&self) -> Option<u64> {
        self.issued.checked_sub(1).map(|offset| self.base + offset)
    }
}

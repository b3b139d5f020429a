use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Calendar month key used for dashboard buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last calendar day of the month.
    pub fn last_day(self) -> Option<NaiveDate> {
        self.next().first_day().and_then(|d| d.pred_opt())
    }

    /// Every month from `self` through `last`, inclusive. Empty when `last < self`.
    pub fn through(self, last: YearMonth) -> Vec<YearMonth> {
        let mut months = Vec::new();
        let mut cursor = self;
        while cursor <= last {
            months.push(cursor);
            cursor = cursor.next();
        }
        months
    }
}

/// Time zone the CRM reports in. Month buckets and "now" are computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTimezone(Tz);

impl AppTimezone {
    pub fn parse(name: &str) -> Result<Self, String> {
        name.parse::<Tz>()
            .map(AppTimezone)
            .map_err(|_| format!("Unknown time zone: {}", name))
    }

    pub fn utc() -> Self {
        AppTimezone(Tz::UTC)
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.0)
    }

    pub fn localize(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Month a stored UTC timestamp falls into, seen from this zone.
    pub fn month_of(&self, utc: DateTime<Utc>) -> YearMonth {
        YearMonth::of(self.localize(utc).date_naive())
    }

    /// Interpret a wall-clock time in this zone. Gaps from DST transitions
    /// resolve to the earliest valid instant after the gap.
    pub fn from_local(&self, naive: NaiveDateTime) -> DateTime<Tz> {
        match self.0.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => dt,
            chrono::LocalResult::Ambiguous(earliest, _) => earliest,
            chrono::LocalResult::None => {
                let shifted = naive + chrono::Duration::hours(1);
                self.0
                    .from_local_datetime(&shifted)
                    .earliest()
                    .unwrap_or_else(|| self.0.from_utc_datetime(&naive))
            }
        }
    }
}

impl From<Tz> for AppTimezone {
    fn from(tz: Tz) -> Self {
        AppTimezone(tz)
    }
}

impl Default for AppTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

// Chart window resolution.
//
// Turns the raw `{prefix}_*` parameters into an instant range and the list of
// calendar months to bucket by. Never fails: anything unusable resolves to
// the current year.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::warn;

use crate::core::{AppTimezone, YearMonth};
use crate::modules::dashboard::models::{ChartFilter, ChartPeriod, ChartWindow};

const LAST_3_DAYS: i64 = 90;
const LAST_6_DAYS: i64 = 180;
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Resolve a chart filter against `now` (already in the reporting zone).
pub fn resolve_window(filter: &ChartFilter, now: DateTime<Tz>) -> ChartWindow {
    let requested = filter.period.as_deref().unwrap_or("this_year");

    let resolved = match ChartPeriod::parse(requested) {
        Some(ChartPeriod::Month) => month_window(filter, now),
        Some(ChartPeriod::Custom) => custom_window(filter, now),
        Some(ChartPeriod::Last3) => Some(trailing_window(ChartPeriod::Last3, LAST_3_DAYS, now)),
        Some(ChartPeriod::Last6) => Some(trailing_window(ChartPeriod::Last6, LAST_6_DAYS, now)),
        Some(ChartPeriod::ThisYear) | None => None,
    };

    resolved.unwrap_or_else(|| {
        if requested != "this_year" {
            warn!(period = requested, "Chart filter fell back to this_year");
        }
        this_year_window(now)
    })
}

fn this_year_window(now: DateTime<Tz>) -> ChartWindow {
    let year = now.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|d| local(now.timezone(), d, NaiveTime::MIN))
        .unwrap_or(now);

    ChartWindow {
        period: ChartPeriod::ThisYear,
        start,
        end: now,
        months: (1..=12).filter_map(|m| YearMonth::new(year, m)).collect(),
    }
}

fn month_window(filter: &ChartFilter, now: DateTime<Tz>) -> Option<ChartWindow> {
    let year = match filter.year.as_deref() {
        None => now.year(),
        Some(raw) => raw.trim().parse::<i32>().ok()?,
    };
    let month = match filter.month.as_deref() {
        None => now.month(),
        Some(raw) => raw.trim().parse::<u32>().ok()?,
    };
    if !YEARS.contains(&year) {
        return None;
    }

    let ym = YearMonth::new(year, month)?;
    let tz = now.timezone();

    Some(ChartWindow {
        period: ChartPeriod::Month,
        start: local(tz, ym.first_day()?, NaiveTime::MIN),
        end: local(tz, ym.last_day()?, end_of_day()),
        months: vec![ym],
    })
}

fn custom_window(filter: &ChartFilter, now: DateTime<Tz>) -> Option<ChartWindow> {
    let from = parse_day(filter.from.as_deref())?;
    let to = parse_day(filter.to.as_deref())?;
    let (from, to) = if from > to { (to, from) } else { (from, to) };
    let tz = now.timezone();

    Some(ChartWindow {
        period: ChartPeriod::Custom,
        start: local(tz, from, NaiveTime::MIN),
        end: local(tz, to, end_of_day()),
        months: YearMonth::of(from).through(YearMonth::of(to)),
    })
}

fn trailing_window(period: ChartPeriod, days: i64, now: DateTime<Tz>) -> ChartWindow {
    let start = now - Duration::days(days);

    ChartWindow {
        period,
        start,
        end: now,
        months: YearMonth::of(start.date_naive()).through(YearMonth::of(now.date_naive())),
    }
}

/// `YYYY-MM-DD` with a four-digit year
fn parse_day(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|day| YEARS.contains(&day.year()))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn local(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    AppTimezone::from(tz).from_local(date.and_time(time))
}

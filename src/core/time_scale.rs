use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, tick_increment};
use crate::core::types::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Span used when the fitted time domain collapses onto one instant.
const DEGENERATE_SPAN_MS: i64 = DAY_MS;

/// Calendar-aligned tick interval chosen for a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeTickInterval {
    Milliseconds(i64),
    Seconds(i64),
    Minutes(i64),
    Hours(i64),
    Days(u32),
    Weeks,
    Months(u32),
    Years(i32),
}

const CANDIDATE_INTERVALS: [(TimeTickInterval, i64); 17] = [
    (TimeTickInterval::Seconds(1), SECOND_MS),
    (TimeTickInterval::Seconds(5), 5 * SECOND_MS),
    (TimeTickInterval::Seconds(15), 15 * SECOND_MS),
    (TimeTickInterval::Seconds(30), 30 * SECOND_MS),
    (TimeTickInterval::Minutes(1), MINUTE_MS),
    (TimeTickInterval::Minutes(5), 5 * MINUTE_MS),
    (TimeTickInterval::Minutes(15), 15 * MINUTE_MS),
    (TimeTickInterval::Minutes(30), 30 * MINUTE_MS),
    (TimeTickInterval::Hours(1), HOUR_MS),
    (TimeTickInterval::Hours(3), 3 * HOUR_MS),
    (TimeTickInterval::Hours(6), 6 * HOUR_MS),
    (TimeTickInterval::Hours(12), 12 * HOUR_MS),
    (TimeTickInterval::Days(1), DAY_MS),
    (TimeTickInterval::Days(2), 2 * DAY_MS),
    (TimeTickInterval::Weeks, WEEK_MS),
    (TimeTickInterval::Months(1), MONTH_MS),
    (TimeTickInterval::Months(3), 3 * MONTH_MS),
];

/// Time axis scale: UTC instants mapped linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    /// Creates a scale over `[start, end]`.
    ///
    /// A zero-length domain is widened symmetrically to one day so every
    /// instant still maps to a finite pixel.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let (start, end) = if start == end {
            let half = Duration::milliseconds(DEGENERATE_SPAN_MS / 2);
            (start - half, end + half)
        } else {
            (start, end)
        };

        let linear = LinearScale::new(datetime_to_unix_millis(start), datetime_to_unix_millis(end))?;
        Ok(Self { start, end, linear })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        self.linear = self.linear.with_range(range_start, range_end)?;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn map(self, time: DateTime<Utc>) -> ChartResult<f64> {
        self.linear.map(datetime_to_unix_millis(time))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<DateTime<Utc>> {
        unix_millis_to_datetime(self.linear.invert(pixel)?)
    }

    /// Picks the calendar interval whose spacing best yields `count` ticks.
    #[must_use]
    pub fn tick_interval(self, count: usize) -> TimeTickInterval {
        let span = (self.end - self.start).num_milliseconds();
        let target = span as f64 / count.max(1) as f64;

        let upper = CANDIDATE_INTERVALS
            .iter()
            .position(|(_, duration)| (*duration as f64) > target);
        match upper {
            None => {
                let start_year = datetime_to_unix_millis(self.start) / YEAR_MS as f64;
                let end_year = datetime_to_unix_millis(self.end) / YEAR_MS as f64;
                let step = tick_increment(start_year, end_year, count).max(1.0);
                TimeTickInterval::Years(step.round() as i32)
            }
            Some(0) => {
                let step = tick_increment(0.0, span as f64, count).max(1.0);
                TimeTickInterval::Milliseconds(step.round() as i64)
            }
            Some(index) => {
                let (lower_interval, lower_ms) = CANDIDATE_INTERVALS[index - 1];
                let (upper_interval, upper_ms) = CANDIDATE_INTERVALS[index];
                if target / (lower_ms as f64) < (upper_ms as f64) / target {
                    lower_interval
                } else {
                    upper_interval
                }
            }
        }
    }

    /// Returns calendar-aligned ticks inside the domain, ascending.
    pub fn ticks(self, count: usize) -> ChartResult<Vec<DateTime<Utc>>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        ticks_for_interval(self.start, self.end, self.tick_interval(count))
    }
}

fn ticks_for_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: TimeTickInterval,
) -> ChartResult<Vec<DateTime<Utc>>> {
    match interval {
        TimeTickInterval::Milliseconds(step) => fixed_step_ticks(start, end, step.max(1)),
        TimeTickInterval::Seconds(step) => fixed_step_ticks(start, end, step * SECOND_MS),
        TimeTickInterval::Minutes(step) => fixed_step_ticks(start, end, step * MINUTE_MS),
        TimeTickInterval::Hours(step) => fixed_step_ticks(start, end, step * HOUR_MS),
        TimeTickInterval::Days(step) => {
            let step = step.max(1);
            calendar_day_ticks(start, end, |day| (day.day0() % step) == 0)
        }
        TimeTickInterval::Weeks => calendar_day_ticks(start, end, |day| day.weekday() == Weekday::Sun),
        TimeTickInterval::Months(step) => {
            let step = step.max(1);
            month_ticks(start, end, |month0| month0 % step == 0)
        }
        TimeTickInterval::Years(step) => {
            let step = step.max(1);
            month_ticks(start, end, |month0| month0 == 0).map(|ticks| {
                ticks
                    .into_iter()
                    .filter(|tick| tick.year().rem_euclid(step) == 0)
                    .collect()
            })
        }
    }
}

fn fixed_step_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_ms: i64,
) -> ChartResult<Vec<DateTime<Utc>>> {
    let start_ms = start.timestamp_millis();
    let end_ms = end.timestamp_millis();
    let mut current = start_ms.div_euclid(step_ms) * step_ms;
    if current < start_ms {
        current += step_ms;
    }

    let mut ticks = Vec::new();
    while current <= end_ms {
        ticks.push(unix_millis_to_datetime(current as f64)?);
        current += step_ms;
    }
    Ok(ticks)
}

fn calendar_day_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    keep: impl Fn(NaiveDate) -> bool,
) -> ChartResult<Vec<DateTime<Utc>>> {
    let mut day = start.date_naive();
    if midnight(day)? < start {
        day = next_day(day)?;
    }

    let mut ticks = Vec::new();
    loop {
        let tick = midnight(day)?;
        if tick > end {
            break;
        }
        if keep(day) {
            ticks.push(tick);
        }
        day = next_day(day)?;
    }
    Ok(ticks)
}

fn month_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    keep: impl Fn(u32) -> bool,
) -> ChartResult<Vec<DateTime<Utc>>> {
    let mut year = start.year();
    let mut month0 = start.month0();

    let mut ticks = Vec::new();
    loop {
        let first_of_month = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
            .ok_or_else(|| ChartError::InvalidData(format!("invalid month {year}-{}", month0 + 1)))?;
        let tick = midnight(first_of_month)?;
        if tick > end {
            break;
        }
        if tick >= start && keep(month0) {
            ticks.push(tick);
        }
        if month0 == 11 {
            month0 = 0;
            year += 1;
        } else {
            month0 += 1;
        }
    }
    Ok(ticks)
}

fn midnight(day: NaiveDate) -> ChartResult<DateTime<Utc>> {
    day.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| ChartError::InvalidData(format!("invalid calendar day {day}")))
}

fn next_day(day: NaiveDate) -> ChartResult<NaiveDate> {
    day.succ_opt()
        .ok_or_else(|| ChartError::InvalidData(format!("calendar overflow after {day}")))
}

/// Formats a time tick with the coarsest unit that still identifies it.
///
/// Sub-second ticks show milliseconds, then seconds, minutes, hours, day of
/// week or month day, month name and finally the year.
#[must_use]
pub fn format_time_tick(time: DateTime<Utc>) -> String {
    let pattern = if time.timestamp_subsec_millis() != 0 {
        ".%3f"
    } else if time.second() != 0 {
        ":%S"
    } else if time.minute() != 0 {
        "%I:%M"
    } else if time.hour() != 0 {
        "%I %p"
    } else if time.day() != 1 {
        if time.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if time.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    time.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{TimeScale, TimeTickInterval, format_time_tick};

    #[test]
    fn three_day_domain_ticks_every_few_hours() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let scale = TimeScale::new(start, end).unwrap();
        assert_eq!(scale.tick_interval(10), TimeTickInterval::Hours(6));
        let ticks = scale.ticks(10).unwrap();
        assert_eq!(ticks.first().copied(), Some(start));
        assert_eq!(ticks.last().copied(), Some(end));
        assert_eq!(ticks.len(), 9);
    }

    #[test]
    fn multi_year_domain_ticks_on_year_boundaries() {
        let start = Utc.with_ymd_and_hms(2001, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let ticks = TimeScale::new(start, end).unwrap().ticks(10).unwrap();
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|tick| format_time_tick(*tick).len() == 4));
    }

    #[test]
    fn tick_labels_pick_the_coarsest_unit() {
        let year = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let month = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let weekday = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap();
        let hour = Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap();
        let minute = Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap();

        assert_eq!(format_time_tick(year), "2024");
        assert_eq!(format_time_tick(month), "March");
        assert_eq!(format_time_tick(weekday), "Tue 02");
        assert_eq!(format_time_tick(sunday), "Jan 07");
        assert_eq!(format_time_tick(hour), "03 PM");
        assert_eq!(format_time_tick(minute), "03:30");
    }

    #[test]
    fn single_instant_domain_is_widened() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let scale = TimeScale::new(instant, instant)
            .and_then(|scale| scale.with_range(0.0, 100.0))
            .unwrap();
        assert_eq!(scale.map(instant).unwrap(), 50.0);
    }
}

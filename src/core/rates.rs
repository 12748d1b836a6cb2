use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DailyRecord, EnhancedVariation, ProcessedPoint};
use crate::error::{ChartError, ChartResult};

/// Number of consecutive daily points folded into one weekly point.
pub const WEEK_LEN: usize = 7;

/// Time granularity of the rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Day,
    Week,
}

impl TimeRange {
    pub const ALL: [TimeRange; 2] = [TimeRange::Day, TimeRange::Week];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Day => "Daily",
            TimeRange::Week => "Weekly",
        }
    }

    pub fn parse(value: &str) -> ChartResult<Self> {
        match value {
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            other => Err(ChartError::InvalidData(format!(
                "unknown time range `{other}`"
            ))),
        }
    }
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Conversion rate in percent, clamped into `[0, 100]` and rounded to two decimals.
///
/// Zero or negative visits yield `0.0`.
#[must_use]
pub fn conversion_rate(visits: f64, conversions: f64) -> f64 {
    if visits.is_nan() || visits <= 0.0 || !conversions.is_finite() {
        return 0.0;
    }
    round2((100.0 * conversions / visits).clamp(0.0, 100.0))
}

/// Parses the calendar date of a record.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps and offset-less
/// `YYYY-MM-DDTHH:MM:SS` timestamps.
#[must_use]
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

/// Daily category label: zero-padded day of month, or the raw string when
/// the date does not parse.
///
/// Month and year are dropped, so labels repeat across months.
#[must_use]
pub fn format_daily_label(raw: &str) -> String {
    match parse_record_date(raw) {
        Some(date) => format!("{:02}", date.day()),
        None => {
            debug!(date = raw, "unparseable record date, using raw label");
            raw.to_owned()
        }
    }
}

fn day_of_month_or(raw: Option<&str>, fallback: u32) -> String {
    match raw {
        None => fallback.to_string(),
        Some(raw) => match parse_record_date(raw) {
            Some(date) => date.day().to_string(),
            None => {
                debug!(date = raw, "unparseable week boundary date, using raw label");
                raw.to_owned()
            }
        },
    }
}

/// Converts raw daily counters into one point per record.
#[must_use]
pub fn process_daily(
    records: &[DailyRecord],
    variations: &[EnhancedVariation],
) -> Vec<ProcessedPoint> {
    records
        .iter()
        .map(|record| {
            let mut point = ProcessedPoint::new(format_daily_label(&record.date));
            for variation in variations {
                let visits = record.visits.resolve(variation);
                let conversions = record.conversions.resolve(variation);
                point
                    .values
                    .insert(variation.stable_id.clone(), conversion_rate(visits, conversions));
            }
            point
        })
        .collect()
}

/// Folds daily points into fixed runs of [`WEEK_LEN`].
///
/// Runs start at the first record, not at calendar week boundaries, and
/// the last run may be shorter. Each weekly value is the mean of the daily
/// values present for that series; a series with no values gets `0.0`.
/// `records` supplies the first/last dates of each run for the
/// `"(start-end)"` label.
#[must_use]
pub fn aggregate_weekly(
    daily: &[ProcessedPoint],
    variations: &[EnhancedVariation],
    records: &[DailyRecord],
) -> Vec<ProcessedPoint> {
    daily
        .chunks(WEEK_LEN)
        .enumerate()
        .map(|(week_index, week)| {
            let start = week_index * WEEK_LEN;
            let source = records.get(start..(start + WEEK_LEN).min(records.len()));
            let first = source.and_then(|run| run.first()).map(|r| r.date.as_str());
            let last = source.and_then(|run| run.last()).map(|r| r.date.as_str());

            let label = format!(
                "({}-{})",
                day_of_month_or(first, 1),
                day_of_month_or(last, WEEK_LEN as u32)
            );

            let mut point = ProcessedPoint::new(label);
            for variation in variations {
                let key = &variation.stable_id;
                let (sum, count) = week
                    .iter()
                    .filter_map(|day| day.value(key))
                    .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
                let mean = if count == 0 {
                    0.0
                } else {
                    round2(sum / count as f64)
                };
                point.values.insert(key.clone(), mean);
            }
            point
        })
        .collect()
}

/// Full series for the requested granularity.
#[must_use]
pub fn aggregate(
    records: &[DailyRecord],
    variations: &[EnhancedVariation],
    range: TimeRange,
) -> Vec<ProcessedPoint> {
    let daily = process_daily(records, variations);
    match range {
        TimeRange::Day => daily,
        TimeRange::Week => aggregate_weekly(&daily, variations, records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_zero_without_visits() {
        assert_eq!(conversion_rate(0.0, 12.0), 0.0);
        assert_eq!(conversion_rate(-3.0, 1.0), 0.0);
    }

    #[test]
    fn rate_is_clamped_and_rounded() {
        assert_eq!(conversion_rate(3.0, 1.0), 33.33);
        assert_eq!(conversion_rate(10.0, 40.0), 100.0);
        assert_eq!(conversion_rate(10.0, -4.0), 0.0);
    }

    #[test]
    fn parses_supported_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_record_date("2024-03-09"), expected);
        assert_eq!(parse_record_date("2024-03-09T10:00:00Z"), expected);
        assert_eq!(parse_record_date("2024-03-09T10:00:00"), expected);
        assert_eq!(parse_record_date("yesterday"), None);
    }

    #[test]
    fn daily_label_pads_and_falls_back() {
        assert_eq!(format_daily_label("2024-03-09"), "09");
        assert_eq!(format_daily_label("not a date"), "not a date");
    }

    #[test]
    fn time_range_parse_rejects_unknown() {
        assert_eq!(TimeRange::parse("week").expect("week"), TimeRange::Week);
        assert!(TimeRange::parse("month").is_err());
    }
}

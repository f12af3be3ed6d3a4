//! Best-effort year for a week label that only says month and day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Labels dated slightly ahead of the context are still treated as "this
/// week", since the site publishes in China time.
const FUTURE_TOLERANCE_DAYS: i64 = 2;

/// What the label's year is inferred relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearContext {
    /// Live fetch: the date the run happens
    Today(NaiveDate),
    /// Archived fetch: the capture time of the snapshot
    Snapshot(NaiveDateTime),
}

impl YearContext {
    pub fn date(&self) -> NaiveDate {
        match self {
            YearContext::Today(date) => *date,
            YearContext::Snapshot(at) => at.date(),
        }
    }
}

fn explicit_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"((?:19|20)\d{2})\s*[年/.-]").expect("valid year regex"))
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s*月\s*(\d{1,2})\s*日|(\d{1,2})[-/.](\d{1,2})")
            .expect("valid month/day regex")
    })
}

/// Month and day named by a label such as "12月30日 更新" or "12-30".
pub fn label_month_day(label: &str) -> Option<(u32, u32)> {
    let caps = month_day_re().captures(label)?;
    let month = caps.get(1).or_else(|| caps.get(3))?.as_str().parse().ok()?;
    let day = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
    Some((month, day))
}

/// Infer the calendar year a week label refers to.
///
/// An explicit four-digit year in the label wins. Otherwise the label's
/// month/day is placed in the context year and its neighbours, and the most
/// recent date not after the context date (plus a small tolerance) is
/// chosen: "12月30日" seen on January 3rd belongs to the previous year.
/// Returns `None` when the label carries no usable date.
pub fn infer_year(week_label: &str, context: YearContext) -> Option<i32> {
    if let Some(caps) = explicit_year_re().captures(week_label) {
        if let Ok(year) = caps[1].parse() {
            return Some(year);
        }
    }

    let (month, day) = label_month_day(week_label)?;
    let reference = context.date();
    let latest = reference + Duration::days(FUTURE_TOLERANCE_DAYS);

    [reference.year() + 1, reference.year(), reference.year() - 1]
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| *date <= latest)
        .max()
        .map(|date| date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today(y: i32, m: u32, d: u32) -> YearContext {
        YearContext::Today(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn same_year_label() {
        assert_eq!(infer_year("11月28日 更新", today(2025, 12, 2)), Some(2025));
    }

    #[test]
    fn december_label_in_early_january_is_last_year() {
        assert_eq!(infer_year("12月30日 更新", today(2026, 1, 4)), Some(2025));
    }

    #[test]
    fn january_label_just_before_new_year_is_next_year() {
        // a Jan 1st label seen on Dec 31st host time
        assert_eq!(infer_year("1月1日 更新", today(2025, 12, 31)), Some(2026));
    }

    #[test]
    fn january_label_in_december_is_most_recent_past_january() {
        assert_eq!(infer_year("1月5日 更新", today(2025, 12, 20)), Some(2025));
    }

    #[test]
    fn snapshot_context_uses_capture_date() {
        let at = NaiveDateTime::parse_from_str("20240105083000", "%Y%m%d%H%M%S").unwrap();
        assert_eq!(infer_year("12月29日 更新", YearContext::Snapshot(at)), Some(2023));
    }

    #[test]
    fn explicit_year_wins() {
        assert_eq!(infer_year("2019年12月30日 更新", today(2026, 1, 4)), Some(2019));
    }

    #[test]
    fn leap_day_falls_back_to_a_leap_year() {
        assert_eq!(infer_year("2月29日", today(2025, 3, 10)), Some(2024));
    }

    #[test]
    fn unparseable_label_is_absent() {
        assert_eq!(infer_year("更新", today(2025, 6, 1)), None);
        assert_eq!(infer_year("", today(2025, 6, 1)), None);
        assert_eq!(infer_year("13月40日", today(2025, 6, 1)), None);
    }

    #[test]
    fn dash_separated_label() {
        assert_eq!(label_month_day("12-30 更新"), Some((12, 30)));
        assert_eq!(infer_year("12-30", today(2026, 1, 2)), Some(2025));
    }
}

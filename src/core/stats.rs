use crate::core::Submission;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

/// Submission counts shown on the admin dashboard.
///
/// `today` and `this_month` start at local midnight of the current day and
/// of the first of the month; `this_week` is a rolling seven days back from
/// now and is not aligned to a calendar week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total: usize,
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
}

/// Reads a stored `created_at`. Values without an offset are wall-clock
/// times in `tz`, the zone the dashboard is viewed in.
pub fn parse_created_at<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| resolve_local(tz, naive))
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    // A DST gap can swallow the wall-clock time; it then lands an hour later.
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

pub fn compute_stats<Tz: TimeZone>(submissions: &[Submission], now: &DateTime<Tz>) -> AdminStats {
    let tz = now.timezone();
    let today = now.date_naive();

    let start_of_day = resolve_local(&tz, today.and_time(NaiveTime::MIN));
    let month_start = today.with_day(1).unwrap_or(today);
    let start_of_month = resolve_local(&tz, month_start.and_time(NaiveTime::MIN));
    let week_ago = now.with_timezone(&Utc) - Duration::days(7);

    let created: Vec<DateTime<Utc>> = submissions
        .iter()
        .filter_map(|s| s.created_at.as_deref().and_then(|at| parse_created_at(at, &tz)))
        .collect();

    let since = |threshold: DateTime<Utc>| created.iter().filter(|at| **at >= threshold).count();

    AdminStats {
        total: submissions.len(),
        today: since(start_of_day),
        this_week: since(week_ago),
        this_month: since(start_of_month),
    }
}

//! Korean-language date and "time ago" formatting.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

/// Formats how long ago `at` was, relative to `now`.
///
/// Under a minute: "방금 전". Under an hour: minutes. Under a day: hours.
/// Under a week: days. Anything older falls back to the full date-time.
pub fn relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(at);
    let minutes = diff.num_minutes();
    if minutes < 1 {
        return "방금 전".to_string();
    }
    if minutes < 60 {
        return format!("{}분 전", minutes);
    }
    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{}시간 전", hours);
    }
    let days = diff.num_days();
    if days < 7 {
        return format!("{}일 전", days);
    }
    korean_datetime(at)
}

/// "YYYY년 M월 D일".
pub fn korean_date(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// "YYYY년 M월 D일 HH:MM".
pub fn korean_datetime(at: DateTime<Utc>) -> String {
    format!(
        "{}년 {}월 {}일 {:02}:{:02}",
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute()
    )
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

type TimestampParser = fn(&Captures<'_>, DateTime<Utc>) -> Option<String>;

/// 早于该年份的日期视为误识别
const MIN_YEAR: i32 = 1970;

static TIMESTAMP_REGEXES: Lazy<Vec<(Regex, TimestampParser)>> = Lazy::new(|| {
    vec![
        // RFC 3339: 2024-01-15T10:30:00Z
        (
            Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})").unwrap(),
            |caps: &Captures<'_>, _now: DateTime<Utc>| {
                DateTime::parse_from_rfc3339(caps.get(0)?.as_str())
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true))
            },
        ),
        // 2024-01-15, 2024/1/15, 2024.01.15, optional HH:MM
        (
            Regex::new(r"(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:\s+(\d{1,2}):(\d{2}))?").unwrap(),
            |caps: &Captures<'_>, _now: DateTime<Utc>| format_date(caps, 1, 2, 3, 4),
        ),
        // 2024年1月15日, optional HH:MM
        (
            Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日(?:\s*(\d{1,2}):(\d{2}))?").unwrap(),
            |caps: &Captures<'_>, _now: DateTime<Utc>| format_date(caps, 1, 2, 3, 4),
        ),
        // 1月15日 (current year)
        (
            Regex::new(r"(\d{1,2})月(\d{1,2})日(?:\s*(\d{1,2}):(\d{2}))?").unwrap(),
            |caps: &Captures<'_>, now: DateTime<Utc>| {
                let year = now.year();
                let month = caps.get(1)?.as_str().parse().ok()?;
                let day = caps.get(2)?.as_str().parse().ok()?;
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                with_optional_time(date, caps.get(3).zip(caps.get(4)))
            },
        ),
        // 5分钟前, 3小时前, 2天前
        (
            Regex::new(r"(\d+)\s*(秒|分钟|小时|天|周|个月|年)前").unwrap(),
            |caps: &Captures<'_>, now: DateTime<Utc>| {
                let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
                let ago = match caps.get(2)?.as_str() {
                    "秒" => Duration::try_seconds(amount)?,
                    "分钟" => Duration::try_minutes(amount)?,
                    "小时" => Duration::try_hours(amount)?,
                    "天" => Duration::try_days(amount)?,
                    "周" => Duration::try_weeks(amount)?,
                    "个月" => Duration::try_days(amount.checked_mul(30)?)?, // Approximation
                    "年" => Duration::try_days(amount.checked_mul(365)?)?, // Approximation
                    _ => return None,
                };
                now.checked_sub_signed(ago)
                    .filter(|dt| dt.year() >= MIN_YEAR)
                    .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            },
        ),
        // 今天/昨天/前天, optional HH:MM
        (
            Regex::new(r"(今天|昨天|前天)(?:\s*(\d{1,2}):(\d{2}))?").unwrap(),
            |caps: &Captures<'_>, now: DateTime<Utc>| {
                let days_back = match caps.get(1)?.as_str() {
                    "今天" => 0,
                    "昨天" => 1,
                    _ => 2,
                };
                let date = (now - Duration::days(days_back)).date_naive();
                with_optional_time(date, caps.get(2).zip(caps.get(3)))
            },
        ),
        // A bare year, as shown on academic results: 2018年 / 2018
        (Regex::new(r"^\s*((?:19|20)\d{2})年?\s*$").unwrap(), |caps: &Captures<'_>, _now: DateTime<Utc>| {
            let year = caps.get(1)?.as_str();
            (year.parse::<i32>().ok()? >= MIN_YEAR).then(|| year.to_string())
        }),
    ]
});

fn format_date(
    caps: &Captures<'_>,
    year: usize,
    month: usize,
    day: usize,
    hour: usize,
) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(
        caps.get(year)?.as_str().parse().ok()?,
        caps.get(month)?.as_str().parse().ok()?,
        caps.get(day)?.as_str().parse().ok()?,
    )?;
    with_optional_time(date, caps.get(hour).zip(caps.get(hour + 1)))
}

fn with_optional_time(
    date: NaiveDate,
    time: Option<(regex::Match<'_>, regex::Match<'_>)>,
) -> Option<String> {
    if date.year() < MIN_YEAR {
        return None;
    }
    match time {
        Some((hour, minute)) => {
            let datetime = date.and_hms_opt(hour.as_str().parse().ok()?, minute.as_str().parse().ok()?, 0)?;
            Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
        }
        None => Some(date.format("%Y-%m-%d").to_string()),
    }
}

/// 将页面上的时间文本规整为 ISO-8601 形式
///
/// 绝对日期输出 `YYYY-MM-DD`（带时刻时为 `YYYY-MM-DDTHH:MM:SS`），
/// 相对时间以 `now` 为基准换算成 RFC 3339。只采用第一个命中的格式，
/// 该格式的日期非法或早于 1970 年时返回空字符串，无法识别时同样为空。
pub fn normalize_timestamp(text: &str, now: DateTime<Utc>) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    TIMESTAMP_REGEXES
        .iter()
        .find_map(|(regex, parser)| regex.captures(text).map(|caps| parser(&caps, now)))
        .flatten()
        .unwrap_or_default()
}

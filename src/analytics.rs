//! Aggregation over a visitor snapshot
//!
//! Every function recomputes from the full collection it is given; nothing is
//! cached between calls. Calendar-based counts use the time zone of `now`.

use std::hash::Hash;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Weekday};
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::visitor::{Visitor, VisitorStatus};

/// Visitors per purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PurposeCount {
    pub purpose: String,
    pub count: usize,
}

/// Check-ins per hour of day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HourCount {
    /// Two-digit hour, "00" to "23"
    pub hour: String,
    pub count: usize,
}

pub fn total_count(visitors: &[Visitor]) -> usize {
    visitors.len()
}

fn local_date<Tz: TimeZone>(at: &DateTime<chrono::Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

/// Visitors whose check-in falls on the local calendar day of `now`
pub fn today_count<Tz: TimeZone>(visitors: &[Visitor], now: &DateTime<Tz>) -> usize {
    let tz = now.timezone();
    let today = now.date_naive();
    visitors
        .iter()
        .filter(|v| local_date(&v.check_in_time, &tz) == today)
        .count()
}

/// First day of the week containing `date`
pub fn week_start_date(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    date - Duration::days(i64::from(offset))
}

/// Visitors whose check-in falls in the calendar week of `now`
pub fn this_week_count<Tz: TimeZone>(
    visitors: &[Visitor],
    now: &DateTime<Tz>,
    week_start: Weekday,
) -> usize {
    let tz = now.timezone();
    let start = week_start_date(now.date_naive(), week_start);
    let end = start + Duration::days(7);
    visitors
        .iter()
        .filter(|v| {
            let day = local_date(&v.check_in_time, &tz);
            day >= start && day < end
        })
        .count()
}

/// Visitors currently inside
pub fn active_count(visitors: &[Visitor]) -> usize {
    visitors
        .iter()
        .filter(|v| v.status == VisitorStatus::CheckedIn)
        .count()
}

/// Visitors whose check-out falls on the local calendar day of `now`
pub fn check_outs_today<Tz: TimeZone>(visitors: &[Visitor], now: &DateTime<Tz>) -> usize {
    let tz = now.timezone();
    let today = now.date_naive();
    visitors
        .iter()
        .filter_map(|v| v.check_out_time.as_ref())
        .filter(|out| local_date(out, &tz) == today)
        .count()
}

/// Visits with a recorded check-out
pub fn completed_visits(visitors: &[Visitor]) -> usize {
    visitors
        .iter()
        .filter(|v| v.check_out_time.is_some())
        .count()
}

/// Mean stay over completed visits, in whole minutes.
///
/// Each stay is truncated to whole minutes before averaging; the mean is
/// rounded half up. Zero when no visit is completed.
pub fn average_stay_minutes(visitors: &[Visitor]) -> i64 {
    let stays: Vec<i64> = visitors.iter().filter_map(Visitor::stay_minutes).collect();
    if stays.is_empty() {
        return 0;
    }
    let mean = stays.iter().sum::<i64>() as f64 / stays.len() as f64;
    (mean + 0.5).floor() as i64
}

/// Whole-percent share of `count` in `total`, rounded half up
pub fn share_percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64 + 0.5).floor() as u32
}

/// Count occurrences, sort by count descending and keep `limit` entries.
/// Ties keep first-seen order.
fn rank_by_count<K, I>(keys: I, limit: usize) -> Vec<(K, usize)>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    // stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Most common purposes, matched on the exact purpose string
pub fn purpose_distribution(visitors: &[Visitor], limit: usize) -> Vec<PurposeCount> {
    rank_by_count(visitors.iter().map(|v| v.purpose.as_str()), limit)
        .into_iter()
        .map(|(purpose, count)| PurposeCount {
            purpose: purpose.to_string(),
            count,
        })
        .collect()
}

/// Busiest check-in hours in the time zone `tz`
pub fn peak_hours<Tz: TimeZone>(visitors: &[Visitor], tz: &Tz, limit: usize) -> Vec<HourCount> {
    let hours = visitors
        .iter()
        .map(|v| v.check_in_time.with_timezone(tz).hour());

    rank_by_count(hours, limit)
        .into_iter()
        .map(|(hour, count)| HourCount {
            hour: format!("{:02}", hour),
            count,
        })
        .collect()
}

/// Latest check-ins first
pub fn recent(visitors: &[Visitor], limit: usize) -> Vec<Visitor> {
    let mut sorted = visitors.to_vec();
    sorted.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
    sorted.truncate(limit);
    sorted
}

//! Dashboard aggregates derived from a user's fully loaded job list.
//!
//! Everything here is a pure function of the list and `now`. Callers hand in the
//! list in store order (newest `created_at` first); nothing here re-sorts it.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::Serialize;

use super::adaptors::jobs::spec::{JobApplication, Status};

pub const HISTOGRAM_DAYS: u64 = 30;
pub const AVERAGE_MONTHS: u32 = 6;
pub const RECENT_ACTIVITY_LEN: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub applied: usize,
    pub interviewing: usize,
    pub offer: usize,
    pub rejected: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Applied => self.applied,
            Status::Interviewing => self.interviewing,
            Status::Offer => self.offer,
            Status::Rejected => self.rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub label: String,
    pub applications: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub status: Status,
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

pub fn chart_name(status: Status) -> &'static str {
    match status {
        Status::Applied => "Applied",
        Status::Interviewing => "Interviewing",
        Status::Offer => "Offers",
        Status::Rejected => "Rejected",
    }
}

pub fn chart_color(status: Status) -> &'static str {
    match status {
        Status::Applied => "hsl(var(--primary))",
        Status::Interviewing => "hsl(var(--warning))",
        Status::Offer => "hsl(var(--success))",
        Status::Rejected => "hsl(var(--destructive))",
    }
}

/// Rounds to one decimal, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `total` is the list length; a status outside the four known ones adds to it
/// without landing in any bucket.
pub fn status_counts(jobs: &[JobApplication]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: jobs.len(),
        ..Default::default()
    };
    for job in jobs {
        match job.status() {
            Some(Status::Applied) => counts.applied += 1,
            Some(Status::Interviewing) => counts.interviewing += 1,
            Some(Status::Offer) => counts.offer += 1,
            Some(Status::Rejected) => counts.rejected += 1,
            None => {}
        }
    }
    counts
}

pub fn success_rate(counts: &StatusCounts) -> f64 {
    if counts.total == 0 {
        return 0.0;
    }
    round1(counts.offer as f64 / counts.total as f64 * 100.0)
}

/// Records created in `[now - 6 months, now]`, divided by 6.
pub fn monthly_average(jobs: &[JobApplication], now: DateTime<Utc>) -> f64 {
    let Some(since) = now.checked_sub_months(Months::new(AVERAGE_MONTHS)) else {
        return 0.0;
    };
    let recent = jobs
        .iter()
        .filter(|job| job.created_at >= since && job.created_at <= now)
        .count();
    round1(recent as f64 / AVERAGE_MONTHS as f64)
}

/// One bucket per calendar day from `now - 29 days` through `now`, oldest first,
/// counting `applied_date` matches.
pub fn daily_histogram(jobs: &[JobApplication], now: DateTime<Utc>) -> Vec<DayBucket> {
    let today = now.date_naive();
    (0..HISTOGRAM_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DayBucket {
            date,
            label: date.format("%b %-d").to_string(),
            applications: jobs
                .iter()
                .filter(|job| job.applied_date == Some(date))
                .count(),
        })
        .collect()
}

pub fn status_distribution(counts: &StatusCounts) -> Vec<StatusSlice> {
    Status::ALL
        .into_iter()
        .map(|status| StatusSlice {
            status,
            name: chart_name(status),
            value: counts.get(status),
            color: chart_color(status),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

pub fn recent_activity(jobs: &[JobApplication]) -> &[JobApplication] {
    &jobs[..jobs.len().min(RECENT_ACTIVITY_LEN)]
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub counts: StatusCounts,
    /// `"0"` for an empty list, otherwise one decimal, e.g. `"33.3"`.
    pub success_rate: String,
    pub monthly_average: String,
    pub applications_over_time: Vec<DayBucket>,
    pub status_distribution: Vec<StatusSlice>,
    pub recent_activity: Vec<JobApplication>,
}

impl DashboardStats {
    pub fn compute(jobs: &[JobApplication], now: DateTime<Utc>) -> Self {
        let counts = status_counts(jobs);
        let success_rate = if counts.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", success_rate(&counts))
        };
        DashboardStats {
            counts,
            success_rate,
            monthly_average: format!("{:.1}", monthly_average(jobs, now)),
            applications_over_time: daily_histogram(jobs, now),
            status_distribution: status_distribution(&counts),
            recent_activity: recent_activity(jobs).to_vec(),
        }
    }
}

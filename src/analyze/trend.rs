use crate::analyze::languages::rounded_percentage;
use crate::analyze::streak::all_days;
use crate::analyze::{Trend, TrendTotals, WeeklyTrends};
use crate::model::{PullRequest, Repository, Week};
use chrono::{DateTime, Duration, NaiveTime, Utc};

pub const WEEKLY_WINDOW_DAYS: i64 = 7;

fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(WEEKLY_WINDOW_DAYS)
}

/// Contributions on days whose start lies inside `(now - 7 days, now)`.
pub fn calculate_weekly_contributions(weeks: &[Week], now: DateTime<Utc>) -> u64 {
    let since = window_start(now);
    all_days(weeks)
        .filter(|day| {
            let start = day.date.and_time(NaiveTime::MIN).and_utc();
            start > since && start < now
        })
        .map(|day| day.contribution_count)
        .sum()
}

pub fn calculate_weekly_repositories(repositories: &[Repository], now: DateTime<Utc>) -> u64 {
    let since = window_start(now);
    repositories
        .iter()
        .filter(|repo| repo.created_at > since)
        .count() as u64
}

pub fn calculate_weekly_pull_requests(pull_requests: &[PullRequest], now: DateTime<Utc>) -> u64 {
    let since = window_start(now);
    pull_requests
        .iter()
        .filter(|pull_request| pull_request.created_at > since)
        .count() as u64
}

/// Stars of the repositories created this week.
///
/// This is an estimate: the snapshot carries no star history, so a new
/// repository's whole star count is attributed to the current week and stars
/// gained by older repositories are not seen at all.
pub fn estimate_weekly_stars(repositories: &[Repository], now: DateTime<Utc>) -> u64 {
    let since = window_start(now);
    repositories
        .iter()
        .filter(|repo| repo.created_at > since)
        .map(|repo| repo.stargazer_count)
        .sum()
}

pub fn calculate_trend(weekly: u64, total: u64) -> Trend {
    Trend {
        value: weekly,
        percentage: rounded_percentage(weekly, total).min(100),
        is_positive: weekly > 0,
    }
}

pub fn calculate_weekly_trends(
    repositories: &[Repository],
    pull_requests: &[PullRequest],
    weeks: &[Week],
    totals: TrendTotals,
    now: DateTime<Utc>,
) -> WeeklyTrends {
    WeeklyTrends {
        repositories: calculate_trend(
            calculate_weekly_repositories(repositories, now),
            totals.repositories,
        ),
        stars: calculate_trend(estimate_weekly_stars(repositories, now), totals.stars),
        contributions: calculate_trend(
            calculate_weekly_contributions(weeks, now),
            totals.contributions,
        ),
        pull_requests: calculate_trend(
            calculate_weekly_pull_requests(pull_requests, now),
            totals.pull_requests,
        ),
    }
}

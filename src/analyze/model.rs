use crate::model::{Connection, ContributionCalendar, Follower};
use serde::{Deserialize, Serialize};

/// The derived statistics returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub contributions_collection: CalendarPassThrough,
    pub total_repositories: u64,
    pub total_stars: u64,
    pub followers: Connection<Follower>,
    pub top_languages: Vec<Language>,
    pub contributions: u64,
    pub pull_requests: PullRequestBreakdown,
    pub issues: IssueBreakdown,
    pub current_streak: u64,
    pub longest_streak: u64,
    pub highest_commit_day: HighestCommitDay,
    pub repositories: RepositoryBreakdown,
    pub weekly_trends: WeeklyTrends,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPassThrough {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub color: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub current: u64,
    pub longest: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighestCommitDay {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryTypes {
    pub original: u64,
    pub forked: u64,
}

/// Pull requests per state. `unrecognized` holds states outside the known set
/// and is not part of the serialized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullRequestStates {
    pub open: u64,
    pub merged: u64,
    pub closed: u64,
    pub unrecognized: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueStates {
    pub open: u64,
    pub closed: u64,
    pub unrecognized: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestBreakdown {
    pub total: u64,
    pub open: u64,
    pub closed: u64,
    pub merged: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBreakdown {
    pub total: u64,
    pub open: u64,
    pub closed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryBreakdown {
    pub total: u64,
    pub original: u64,
    pub forked: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub value: u64,
    pub percentage: u32,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrends {
    pub repositories: Trend,
    pub stars: Trend,
    pub contributions: Trend,
    pub pull_requests: Trend,
}

/// All-time totals each weekly trend is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendTotals {
    pub repositories: u64,
    pub stars: u64,
    pub contributions: u64,
    pub pull_requests: u64,
}

//! Derives the statistics summary from one activity snapshot.
//!
//! Everything here is pure: no I/O, no clock. Time-windowed calculations take
//! the reference timestamp explicitly.

mod analyzer;
mod counting;
mod languages;
mod model;
mod streak;
mod trend;

pub use analyzer::Analyzer;
pub use counting::{
    calculate_total_stars, count_issue_states, count_pull_request_states, count_repository_types,
};
pub use languages::calculate_top_languages;
pub use model::{
    CalendarPassThrough, HighestCommitDay, IssueBreakdown, IssueStates, Language,
    PullRequestBreakdown, PullRequestStates, RepositoryBreakdown, RepositoryTypes,
    StatisticsSummary, Streaks, Trend, TrendTotals, WeeklyTrends,
};
pub use streak::{calculate_highest_commit_day, calculate_streaks};
pub use trend::calculate_weekly_trends;

#[cfg(test)]
pub(crate) use analyzer::tests::{now as test_now, snapshot as test_snapshot, snapshot_json};

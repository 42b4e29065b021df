use crate::analyze::{
    calculate_highest_commit_day, calculate_streaks, calculate_top_languages,
    calculate_total_stars, calculate_weekly_trends, count_issue_states,
    count_pull_request_states, count_repository_types, CalendarPassThrough, IssueBreakdown,
    PullRequestBreakdown, RepositoryBreakdown, StatisticsSummary, TrendTotals,
};
use crate::model::Snapshot;
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = "analyze";

pub trait Analyzer {
    /// Derives the statistics summary as of `now`.
    fn analyze(&self, now: DateTime<Utc>) -> StatisticsSummary;
}

impl Analyzer for Snapshot {
    fn analyze(&self, now: DateTime<Utc>) -> StatisticsSummary {
        let today = now.date_naive();
        let calendar = &self.contributions_collection.contribution_calendar;
        let repositories = &self.repositories.nodes;
        let pull_requests = &self.pull_requests.nodes;
        let issues = &self.issues.nodes;

        let repository_types = count_repository_types(repositories);
        let pull_request_states = count_pull_request_states(pull_requests);
        let issue_states = count_issue_states(issues);
        let streaks = calculate_streaks(&calendar.weeks, today);
        let highest_commit_day = calculate_highest_commit_day(&calendar.weeks, today);
        let top_languages = calculate_top_languages(repositories);
        let total_stars = calculate_total_stars(repositories);

        if pull_request_states.unrecognized > 0 {
            log::warn!(
                target: LOG_TARGET,
                "Ignoring {} pull request(s) with an unrecognized state",
                pull_request_states.unrecognized
            );
        }
        if issue_states.unrecognized > 0 {
            log::warn!(
                target: LOG_TARGET,
                "Ignoring {} issue(s) with an unrecognized state",
                issue_states.unrecognized
            );
        }

        let totals = TrendTotals {
            repositories: self.repositories.total_count,
            stars: total_stars,
            contributions: calendar.total_contributions,
            pull_requests: self.pull_requests.total_count,
        };
        let weekly_trends =
            calculate_weekly_trends(repositories, pull_requests, &calendar.weeks, totals, now);

        log::debug!(
            target: LOG_TARGET,
            "Analyzed {} day(s), {} repositories, {} pull requests, {} issues",
            calendar.weeks.iter().map(|w| w.contribution_days.len()).sum::<usize>(),
            repositories.len(),
            pull_requests.len(),
            issues.len()
        );

        StatisticsSummary {
            contributions_collection: CalendarPassThrough {
                contribution_calendar: calendar.clone(),
            },
            total_repositories: self.repositories.total_count,
            total_stars,
            followers: self.followers.clone(),
            top_languages,
            contributions: calendar.total_contributions,
            pull_requests: PullRequestBreakdown {
                total: self.pull_requests.total_count,
                open: pull_request_states.open,
                closed: pull_request_states.closed,
                merged: pull_request_states.merged,
            },
            issues: IssueBreakdown {
                total: self.issues.total_count,
                open: issue_states.open,
                closed: issue_states.closed,
            },
            current_streak: streaks.current,
            longest_streak: streaks.longest,
            highest_commit_day,
            repositories: RepositoryBreakdown {
                total: self.repositories.total_count,
                original: repository_types.original,
                forked: repository_types.forked,
            },
            weekly_trends,
        }
    }
}

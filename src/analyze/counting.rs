use crate::analyze::{IssueStates, PullRequestStates, RepositoryTypes};
use crate::model::{Issue, IssueState, PullRequest, PullRequestState, Repository};

/// Sum of stars over every repository, forks included.
pub fn calculate_total_stars(repositories: &[Repository]) -> u64 {
    repositories.iter().map(|repo| repo.stargazer_count).sum()
}

pub fn count_repository_types(repositories: &[Repository]) -> RepositoryTypes {
    repositories
        .iter()
        .fold(RepositoryTypes::default(), |mut acc, repo| {
            if repo.is_fork {
                acc.forked += 1;
            } else {
                acc.original += 1;
            }
            acc
        })
}

pub fn count_pull_request_states(pull_requests: &[PullRequest]) -> PullRequestStates {
    pull_requests
        .iter()
        .fold(PullRequestStates::default(), |mut acc, pull_request| {
            match pull_request.state {
                PullRequestState::Open => acc.open += 1,
                PullRequestState::Merged => acc.merged += 1,
                PullRequestState::Closed => acc.closed += 1,
                PullRequestState::Other(_) => acc.unrecognized += 1,
            }
            acc
        })
}

pub fn count_issue_states(issues: &[Issue]) -> IssueStates {
    issues
        .iter()
        .fold(IssueStates::default(), |mut acc, issue| {
            match issue.state {
                IssueState::Open => acc.open += 1,
                IssueState::Closed => acc.closed += 1,
                IssueState::Other(_) => acc.unrecognized += 1,
            }
            acc
        })
}

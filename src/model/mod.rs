mod result;
mod settings;
mod snapshot;

pub use result::{Result, StatsError};
pub use settings::Settings;
pub use snapshot::{
    Connection, ContributionCalendar, ContributionDay, Follower, Issue, IssueState, PullRequest,
    PullRequestState, Repository, Snapshot, Week,
};

#[cfg(test)]
pub use snapshot::PrimaryLanguage;

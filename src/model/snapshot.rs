use crate::model::{Result, StatsError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{from_str, from_value, Value};
use std::fs;
use std::path::Path;

/// One fetched copy of a user's public activity, shaped like the GraphQL `user` node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub contributions_collection: ContributionsCollection,
    pub repositories: Connection<Repository>,
    pub followers: Connection<Follower>,
    pub pull_requests: Connection<PullRequest>,
    pub issues: Connection<Issue>,
}

// Create
impl Snapshot {
    /// Reads a saved snapshot: either the bare `user` node or a whole
    /// `{ "data": { "user": ... } }` GraphQL response.
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }
}

// Parser
impl Snapshot {
    fn parse(json_str: &str) -> Result<Self> {
        let mut details: Value = from_str(json_str)?;
        if details.get("data").is_some() {
            details = details
                .pointer_mut("/data/user")
                .map(Value::take)
                .unwrap_or(Value::Null);
        }
        if details.is_null() {
            return Err(StatsError::Decode("snapshot has no 'user' node".into()));
        }
        Ok(from_value(details)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub colors: Vec<String>,
    pub total_contributions: u64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub months: Vec<Month>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Month {
    pub first_day: NaiveDate,
    pub name: String,
    pub total_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub contribution_days: Vec<ContributionDay>,
    pub first_day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    #[serde(default)]
    pub color: String,
    pub contribution_count: u64,
    pub date: NaiveDate,
}

/// A paged GraphQL list: the server-side total plus the nodes actually returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    pub total_count: u64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub is_fork: bool,
    pub stargazer_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub primary_language: Option<PrimaryLanguage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryLanguage {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub state: PullRequestState,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub state: IssueState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follower {
    pub login: String,
    pub avatar_url: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PullRequestState {
    Open,
    Merged,
    Closed,
    Other(String),
}

impl From<String> for PullRequestState {
    fn from(raw: String) -> Self {
        match raw.to_uppercase().as_str() {
            "OPEN" => Self::Open,
            "MERGED" => Self::Merged,
            "CLOSED" => Self::Closed,
            _ => Self::Other(raw),
        }
    }
}

impl From<PullRequestState> for String {
    fn from(state: PullRequestState) -> Self {
        match state {
            PullRequestState::Open => "OPEN".to_string(),
            PullRequestState::Merged => "MERGED".to_string(),
            PullRequestState::Closed => "CLOSED".to_string(),
            PullRequestState::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    Open,
    Closed,
    Other(String),
}

impl From<String> for IssueState {
    fn from(raw: String) -> Self {
        match raw.to_uppercase().as_str() {
            "OPEN" => Self::Open,
            "CLOSED" => Self::Closed,
            _ => Self::Other(raw),
        }
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Open => "OPEN".to_string(),
            IssueState::Closed => "CLOSED".to_string(),
            IssueState::Other(raw) => raw,
        }
    }
}

// GitHub returns `null` instead of `[]` for some empty lists.
fn nullable_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

use crate::model::{Result, Settings, Snapshot, StatsError};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const LOG_TARGET: &str = "github";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const STATS_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        colors
        totalContributions
        months {
          firstDay
          name
          totalWeeks
        }
        weeks {
          contributionDays {
            color
            contributionCount
            date
          }
          firstDay
        }
      }
    }
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {field: CREATED_AT, direction: DESC}) {
      totalCount
      nodes {
        isFork
        stargazerCount
        createdAt
        primaryLanguage {
          name
          color
        }
      }
    }
    followers(first: 10) {
      totalCount
      nodes {
        login
        avatarUrl
        url
      }
    }
    pullRequests(first: 100, orderBy: {field: CREATED_AT, direction: DESC}) {
      totalCount
      nodes {
        state
        createdAt
      }
    }
    issues(first: 100) {
      totalCount
      nodes {
        state
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<UserData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<Snapshot>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

pub type StatusProgress<'a> = Box<dyn FnMut(&str) + Send + 'a>;

pub trait SnapshotFetcher {
    async fn fetch_snapshot<'a>(&self, username: &str, cb: StatusProgress<'a>) -> Result<Snapshot>;
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl GithubClient {
    pub fn new(endpoint: impl ToString, token: impl ToString, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings, token: impl ToString) -> Result<Self> {
        Self::new(&settings.endpoint, token, settings.timeout)
    }
}

impl SnapshotFetcher for GithubClient {
    async fn fetch_snapshot<'a>(
        &self,
        username: &str,
        mut cb: StatusProgress<'a>,
    ) -> Result<Snapshot> {
        cb(&format!("Querying {} for `{username}` ...", self.endpoint));
        log::info!(target: LOG_TARGET, "Fetching activity snapshot for '{username}'");

        let body = json!({
            "query": STATS_QUERY,
            "variables": { "username": username },
        });
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        cb("Decoding response ...");
        let text = response.text().await?;
        let response: GraphQlResponse =
            serde_json::from_str(&text).map_err(|e| StatsError::Decode(e.to_string()))?;

        if let Some(errors) = response.errors {
            let messages = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            log::error!(target: LOG_TARGET, "GraphQL query failed: {messages}");
            return Err(StatsError::QueryFailed(messages));
        }

        let Some(snapshot) = response.data.and_then(|data| data.user) else {
            return Err(StatsError::UserNotFound(username.to_string()));
        };

        log::debug!(
            target: LOG_TARGET,
            "Fetched {} repositories, {} pull requests, {} issues",
            snapshot.repositories.nodes.len(),
            snapshot.pull_requests.nodes.len(),
            snapshot.issues.nodes.len()
        );
        Ok(snapshot)
    }
}

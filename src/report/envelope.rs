use crate::analyze::StatisticsSummary;
use crate::model::StatsError;
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Successfully fetched GitHub statistics";
pub const QUERY_FAILED_MESSAGE: &str = "GraphQL query failed";
pub const FAILURE_MESSAGE: &str = "Failed to fetch GitHub statistics";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    NotFound,
    InternalError,
}

impl ResponseStatus {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

/// The `{ success, data, message }` body handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StatisticsSummary>,
    pub message: String,
}

impl Envelope {
    pub fn success(summary: StatisticsSummary) -> Self {
        Self {
            success: true,
            data: Some(summary),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Maps a pipeline failure to its status and a caller-safe message.
    /// Internal details stay in the logs.
    pub fn failure(error: &StatsError) -> (ResponseStatus, Self) {
        let (status, message) = match error {
            StatsError::UserNotFound(username) => (
                ResponseStatus::NotFound,
                format!("User '{username}' not found"),
            ),
            StatsError::QueryFailed(_) => {
                (ResponseStatus::InternalError, QUERY_FAILED_MESSAGE.to_string())
            }
            _ => (ResponseStatus::InternalError, FAILURE_MESSAGE.to_string()),
        };
        (
            status,
            Self {
                success: false,
                data: None,
                message,
            },
        )
    }
}

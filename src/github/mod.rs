pub mod graphql;

pub use graphql::{GithubClient, SnapshotFetcher};

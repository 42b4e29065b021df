mod analyze;
mod cache;
mod github;
mod model;
mod report;
mod utils;

use crate::analyze::Analyzer;
use crate::cache::SummaryCache;
use crate::github::{GithubClient, SnapshotFetcher};
use crate::report::{Envelope, MarkdownReport, ResponseStatus};
use crate::utils::SpinnerNew;
use chrono::{DateTime, Utc};
use clap::Parser;
use indicatif::ProgressBar;
use model::{Result, Settings, Snapshot, StatsError};
use std::path::Path;

const LOG_TARGET: &str = "github-stats";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Fetches and summarizes a GitHub user's public activity")]
struct Args {
    #[arg(long = "username", env = "GITHUB_USERNAME")]
    username: Option<String>,
    #[arg(long = "github_token", env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
    #[arg(long = "settings", default_value = "settings.json")]
    settings_path: String,
    #[arg(long = "cache_path", default_value = "github-stats-cache.json")]
    cache_path: String,
    /// Aggregate a saved GraphQL response instead of querying GitHub.
    #[arg(long = "snapshot")]
    snapshot_path: Option<String>,
    /// Also write a markdown report to this path.
    #[arg(long = "report")]
    report_path: Option<String>,
    /// Ignore the cached response.
    #[arg(long = "force")]
    force: bool,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (status, envelope) = match run(&args, Utc::now()).await {
        Ok(envelope) => (ResponseStatus::Ok, envelope),
        Err(e) => {
            log::error!(target: LOG_TARGET, "Failed to fetch GitHub statistics: {e}");
            Envelope::failure(&e)
        }
    };

    log::info!(target: LOG_TARGET, "Responding with status {}", status.code());
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!(target: LOG_TARGET, "Cannot serialize response: {e}"),
    }
    if status != ResponseStatus::Ok {
        std::process::exit(1);
    }
}

async fn run(args: &Args, now: DateTime<Utc>) -> Result<Envelope> {
    let settings = Settings::from_config(&args.settings_path)?.with_username(args.username.clone());
    let client = args
        .github_token
        .as_ref()
        .map(|token| GithubClient::from_settings(&settings, token))
        .transpose()?;
    resolve(args, &settings, client.as_ref(), now).await
}

async fn resolve<F: SnapshotFetcher>(
    args: &Args,
    settings: &Settings,
    fetcher: Option<&F>,
    now: DateTime<Utc>,
) -> Result<Envelope> {
    let Some(username) = settings.username.clone() else {
        return Err(StatsError::Settings(
            "no username: pass --username, set GITHUB_USERNAME or add 'username' to the settings file"
                .into(),
        ));
    };
    let cache = SummaryCache::new(&args.cache_path, settings.cache_ttl);

    if args.snapshot_path.is_none() && !args.force {
        if let Some(envelope) = cache.load_fresh(&username, now) {
            log::info!(target: LOG_TARGET, "Using cached statistics for '{username}'");
            if let (Some(path), Some(summary)) = (&args.report_path, &envelope.data) {
                summary.report_create(&username, Path::new(path))?;
            }
            return Ok(envelope);
        }
    }

    let snapshot = match &args.snapshot_path {
        Some(path) => {
            log::info!(target: LOG_TARGET, "Reading snapshot from '{path}'");
            Snapshot::from_config(path)?
        }
        None => {
            let Some(fetcher) = fetcher else {
                return Err(StatsError::MissingToken);
            };
            github_fetch(fetcher, &username).await?
        }
    };

    let summary = snapshot.analyze(now);
    if let Some(path) = &args.report_path {
        summary.report_create(&username, Path::new(path))?;
        log::info!(target: LOG_TARGET, "Wrote markdown report to '{path}'");
    }

    let envelope = Envelope::success(summary);
    if args.snapshot_path.is_none() {
        if let Err(e) = cache.store(&username, now, &envelope) {
            log::warn!(target: LOG_TARGET, "Cannot write cache '{}': {e}", cache.path().display());
        }
    }
    Ok(envelope)
}

async fn github_fetch(fetcher: &impl SnapshotFetcher, username: &str) -> Result<Snapshot> {
    let pb = ProgressBar::stderr_spinner("Connecting to GitHub ...");
    let progress_pb = pb.clone();
    let progress = move |message: &str| progress_pb.set_message(message.to_string());

    let snapshot = fetcher.fetch_snapshot(username, Box::new(progress)).await;
    match &snapshot {
        Ok(snapshot) => pb.finish_with_message(format!(
            "✅ Fetched `{username}` ({} repositories, {} pull requests)",
            snapshot.repositories.total_count, snapshot.pull_requests.total_count
        )),
        Err(_) => pb.abandon_with_message(format!("❌ Fetching `{username}` failed")),
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{snapshot_json, test_now, test_snapshot};
    use crate::github::graphql::StatusProgress;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl SnapshotFetcher for CountingFetcher {
        async fn fetch_snapshot<'a>(
            &self,
            _username: &str,
            mut cb: StatusProgress<'a>,
        ) -> Result<Snapshot> {
            cb("Serving fixture ...");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(test_snapshot())
        }
    }

    impl CountingFetcher {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn args(temp_dir: &TempDir) -> Args {
        let path = |name: &str| temp_dir.path().join(name).display().to_string();
        Args {
            username: Some("octocat".to_string()),
            github_token: None,
            settings_path: path("settings.json"),
            cache_path: path("cache.json"),
            snapshot_path: None,
            report_path: None,
            force: false,
        }
    }

    fn settings() -> Settings {
        Settings::default().with_username(Some("octocat".to_string()))
    }

    // A cached envelope that differs from what the fixture would produce.
    fn stale_marker(cache: &SummaryCache) {
        let mut summary = test_snapshot().analyze(test_now());
        summary.total_stars = 999;
        cache
            .store("octocat", test_now() - chrono::Duration::hours(1), &Envelope::success(summary))
            .unwrap();
    }

    #[tokio::test]
    async fn fresh_cache_skips_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let args = args(&temp_dir);
        let settings = settings();
        stale_marker(&SummaryCache::new(&args.cache_path, settings.cache_ttl));
        let fetcher = CountingFetcher::default();

        let envelope = resolve(&args, &settings, Some(&fetcher), test_now()).await.unwrap();

        assert_eq!(fetcher.calls(), 0);
        assert_eq!(envelope.data.unwrap().total_stars, 999);
    }

    #[tokio::test]
    async fn force_refetches_and_overwrites_cache() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args {
            force: true,
            ..args(&temp_dir)
        };
        let settings = settings();
        let cache = SummaryCache::new(&args.cache_path, settings.cache_ttl);
        stale_marker(&cache);
        let fetcher = CountingFetcher::default();

        let envelope = resolve(&args, &settings, Some(&fetcher), test_now()).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(envelope.data.unwrap().total_stars, 40);
        let cached = cache.load_fresh("octocat", test_now()).unwrap();
        assert_eq!(cached.data.unwrap().total_stars, 40);
    }

    #[tokio::test]
    async fn cache_miss_fetches_and_stores() {
        let temp_dir = TempDir::new().unwrap();
        let args = args(&temp_dir);
        let settings = settings();
        let fetcher = CountingFetcher::default();

        resolve(&args, &settings, Some(&fetcher), test_now()).await.unwrap();
        resolve(&args, &settings, Some(&fetcher), test_now()).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn saved_snapshot_leaves_cache_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot_path = temp_dir.path().join("snapshot.json");
        fs::write(&snapshot_path, snapshot_json().to_string()).unwrap();
        let args = Args {
            snapshot_path: Some(snapshot_path.display().to_string()),
            ..args(&temp_dir)
        };
        let settings = settings();
        stale_marker(&SummaryCache::new(&args.cache_path, settings.cache_ttl));
        let before = fs::read_to_string(&args.cache_path).unwrap();

        let envelope = resolve::<CountingFetcher>(&args, &settings, None, test_now())
            .await
            .unwrap();

        assert_eq!(envelope.data.unwrap().total_stars, 40);
        assert_eq!(fs::read_to_string(&args.cache_path).unwrap(), before);
    }

    #[tokio::test]
    async fn saved_snapshot_does_not_create_cache() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot_path = temp_dir.path().join("snapshot.json");
        fs::write(&snapshot_path, snapshot_json().to_string()).unwrap();
        let args = Args {
            snapshot_path: Some(snapshot_path.display().to_string()),
            ..args(&temp_dir)
        };

        resolve::<CountingFetcher>(&args, &settings(), None, test_now())
            .await
            .unwrap();

        assert!(!Path::new(&args.cache_path).exists());
    }

    #[tokio::test]
    async fn missing_token_is_an_internal_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = args(&temp_dir);

        let err = run(&args, test_now()).await.unwrap_err();
        assert!(matches!(err, StatsError::MissingToken));

        let (status, envelope) = Envelope::failure(&err);
        assert_eq!(status.code(), 500);
        assert!(!envelope.success);
        assert!(!Path::new(&args.cache_path).exists());
    }

    #[tokio::test]
    async fn missing_username_is_a_settings_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args {
            username: None,
            ..args(&temp_dir)
        };

        let err = resolve::<CountingFetcher>(&args, &Settings::default(), None, test_now())
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::Settings(_)));
    }
}

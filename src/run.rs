use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cli::parser::{self, Command};
use crate::config::Config;
use crate::error::RotError;
use crate::github::client::{GitHubClient, IssueSource};
use crate::ignored::IgnoredRepos;
use crate::output;
use crate::report::{self, Report, WeeklyCounts};
use crate::rot;
use crate::slack::{Notifier, SlackClient};
use crate::storage::{CounterStore, FileCounterStore};

/// What to report on and where to send it.
#[derive(Debug, Clone, Copy)]
pub struct ReportJob<'a> {
    pub org: &'a str,
    pub channel: &'a str,
    pub threshold_days: u32,
    pub ignored: &'a IgnoredRepos,
}

/// Entry point shared by the binary and the acceptance tests.
///
/// `env` resolves environment variables; everything written to stdout is also
/// copied to `stdout_additional` when given.
pub async fn run(
    args: Vec<String>,
    env: &dyn Fn(&str) -> Option<String>,
    mut stdout_additional: Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    match parser::parse_args(&args) {
        Command::Help => output::println(parser::USAGE, &mut stdout_additional)?,
        Command::Unknown(message) => return Err(RotError::Usage(message).into()),
        Command::Run(options) => {
            let config = Config::resolve(options, env)?;
            execute(&config, &mut stdout_additional).await?;
        }
    }
    Ok(())
}

async fn execute(
    config: &Config,
    stdout_additional: &mut Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    let ignored = match &config.ignored_repos_path {
        Some(path) => IgnoredRepos::load(path)?,
        None => IgnoredRepos::default(),
    };
    debug!("ignoring {} repositories", ignored.len());

    let job = ReportJob {
        org: &config.github_org,
        channel: &config.channel,
        threshold_days: config.threshold_days,
        ignored: &ignored,
    };
    let store = FileCounterStore::new(&config.counter_path);
    let github = GitHubClient::new(&config.github_api_url, &config.github_token)
        .context("Failed to create GitHub client")?;
    let now = Utc::now();

    if config.dry_run {
        preview_report(&github, &store, &job, now, stdout_additional).await?;
        return Ok(());
    }

    let slack = SlackClient::new(&config.slack_api_url, &config.slack_token)
        .context("Failed to create Slack client")?;
    publish_report(&github, &slack, &store, &job, now).await?;
    Ok(())
}

/// Reads last week's count, fetches and ranks the open issues, and formats the
/// report. The counter is read first so a broken counter file fails the run
/// before any network traffic.
pub async fn prepare_report<S, C>(
    source: &S,
    store: &C,
    job: &ReportJob<'_>,
    now: DateTime<Utc>,
) -> anyhow::Result<(Report, WeeklyCounts)>
where
    S: IssueSource + ?Sized,
    C: CounterStore + ?Sized,
{
    let last_week = store.load()?;

    let issues = source
        .open_issues(job.org)
        .await
        .with_context(|| format!("Failed to fetch open issues for {}", job.org))?;
    let fetched = issues.len();

    let rotten = rot::rotten_issues(issues, job.ignored, job.threshold_days, now);
    info!(
        "{} of {fetched} open issue(s) in {} untouched for {}+ days",
        rotten.len(),
        job.org,
        job.threshold_days
    );

    let counts = WeeklyCounts {
        this_week: rotten.len() as u64,
        last_week,
    };
    let report = report::weekly_report(&rotten, counts, job.threshold_days, now);
    Ok((report, counts))
}

/// Prints the report instead of posting it. The counter file is read but never
/// written.
pub async fn preview_report<S, C>(
    source: &S,
    store: &C,
    job: &ReportJob<'_>,
    now: DateTime<Utc>,
    writer: &mut Option<&mut dyn Write>,
) -> anyhow::Result<WeeklyCounts>
where
    S: IssueSource + ?Sized,
    C: CounterStore + ?Sized,
{
    let (report, counts) = prepare_report(source, store, job, now).await?;
    output::print_report(&report, writer)?;
    info!(
        "dry run: {} rotten issue(s), counter left at {}",
        counts.this_week, counts.last_week
    );
    Ok(counts)
}

/// Runs the whole pipeline and only advances the counter once the report has
/// been delivered.
pub async fn publish_report<S, N, C>(
    source: &S,
    notifier: &N,
    store: &C,
    job: &ReportJob<'_>,
    now: DateTime<Utc>,
) -> anyhow::Result<WeeklyCounts>
where
    S: IssueSource + ?Sized,
    N: Notifier + ?Sized,
    C: CounterStore + ?Sized,
{
    let (report, counts) = prepare_report(source, store, job, now).await?;

    notifier
        .notify(job.channel, &report)
        .await
        .with_context(|| format!("Failed to post report to {}", job.channel))?;

    store.save(counts.this_week)?;
    info!(
        "report posted to {}: {} rotten issue(s), {} last week",
        job.channel, counts.this_week, counts.last_week
    );
    Ok(counts)
}

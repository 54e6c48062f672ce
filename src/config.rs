use std::path::PathBuf;

use crate::cli::parser::Options;
use crate::error::{Result, RotError};

pub const GITHUB_TOKEN_VAR: &str = "GH_TOKEN";
pub const SLACK_TOKEN_VAR: &str = "SLACK_TOKEN";
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";
pub const SLACK_API_URL_VAR: &str = "SLACK_API_URL";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
pub const DEFAULT_COUNTER_FILE: &str = "issues-last-week.txt";
pub const DEFAULT_THRESHOLD_DAYS: u32 = 100;

/// Everything a run needs, resolved from flags and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub github_token: String,
    pub slack_token: String,
    pub github_api_url: String,
    pub slack_api_url: String,
    pub channel: String,
    pub github_org: String,
    pub ignored_repos_path: Option<PathBuf>,
    pub threshold_days: u32,
    pub counter_path: PathBuf,
    pub dry_run: bool,
}

impl Config {
    /// Merges parsed flags with environment variables read through `env`.
    ///
    /// Tokens are checked before flags, so a missing token is reported even when
    /// the flags are also incomplete.
    pub fn resolve<F>(options: Options, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = env(GITHUB_TOKEN_VAR).ok_or(RotError::MissingEnv(GITHUB_TOKEN_VAR))?;
        let slack_token = env(SLACK_TOKEN_VAR).ok_or(RotError::MissingEnv(SLACK_TOKEN_VAR))?;

        let channel = options.channel.filter(|c| !c.is_empty()).ok_or_else(|| {
            RotError::Usage(
                "You need to specify which slack channel to send the message to. Like this '-channel=my-slack-channel'"
                    .to_string(),
            )
        })?;
        let github_org = options.github_org.filter(|o| !o.is_empty()).ok_or_else(|| {
            RotError::Usage(
                "You need to specify which github-organisation to check for rottening issues. Like this '-github-org=my-github-org'"
                    .to_string(),
            )
        })?;

        Ok(Self {
            github_token,
            slack_token,
            github_api_url: api_url(&env, GITHUB_API_URL_VAR, DEFAULT_GITHUB_API_URL),
            slack_api_url: api_url(&env, SLACK_API_URL_VAR, DEFAULT_SLACK_API_URL),
            channel,
            github_org,
            ignored_repos_path: options.ignored_repos_path.filter(|p| !p.as_os_str().is_empty()),
            threshold_days: options.threshold_days.unwrap_or(DEFAULT_THRESHOLD_DAYS),
            counter_path: options
                .counter_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COUNTER_FILE)),
            dry_run: options.dry_run,
        })
    }
}

fn api_url<F>(env: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env(var)
        .filter(|url| !url.trim().is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::github::issues::Issue;
use crate::ignored::IgnoredRepos;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed between `then` and `now`, never negative.
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_seconds().div_euclid(SECONDS_PER_DAY).max(0)
}

pub fn is_rotten(
    issue: &Issue,
    ignored: &IgnoredRepos,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> bool {
    !issue.is_pull_request()
        && !ignored.contains(&issue.repository.name)
        && now - issue.updated_at >= TimeDelta::days(i64::from(threshold_days))
}

/// Keeps the issues that are not pull requests, not in an ignored repository,
/// and untouched for at least `threshold_days`.
pub fn filter_rotten(
    issues: Vec<Issue>,
    ignored: &IgnoredRepos,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| is_rotten(issue, ignored, threshold_days, now))
        .collect()
}

/// Oldest `updated_at` first.
pub fn sort_oldest_first(issues: &mut [Issue]) {
    issues.sort_by_key(|issue| issue.updated_at);
}

pub fn rotten_issues(
    issues: Vec<Issue>,
    ignored: &IgnoredRepos,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Vec<Issue> {
    let mut rotten = filter_rotten(issues, ignored, threshold_days, now);
    sort_oldest_first(&mut rotten);
    for issue in &rotten {
        debug!("rotten for {} days: {issue}", days_since(issue.updated_at, now));
    }
    rotten
}

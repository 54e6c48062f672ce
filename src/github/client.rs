use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Result, RotError};
use crate::github::issues::{self, Issue};

/// GitHub caps `per_page` at 100; only this single page is read.
pub const PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!("rottening/", env!("CARGO_PKG_VERSION"));

/// Anything that can list the open issues of an organization.
#[async_trait]
pub trait IssueSource {
    async fn open_issues(&self, org: &str) -> Result<Vec<Issue>>;
}

pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn org_issues_url(&self, org: &str) -> String {
        format!("{}/orgs/{}/issues", self.api_url, org)
    }

    pub async fn fetch_org_issues(&self, org: &str) -> Result<Vec<Issue>> {
        let url = self.org_issues_url(org);
        let per_page = PER_PAGE.to_string();
        info!("fetching open issues for {org}");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("filter", "all"),
                ("state", "open"),
                ("per_page", per_page.as_str()),
            ])
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(RotError::GitHubStatus {
                status: status.as_u16(),
                body,
            });
        }

        let issues = issues::parse_issues(&body)?;
        debug!("github returned {} open issues for {org}", issues.len());
        Ok(issues)
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn open_issues(&self, org: &str) -> Result<Vec<Issue>> {
        self.fetch_org_issues(org).await
    }
}

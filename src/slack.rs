use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, RotError};
use crate::report::Report;

pub const NEXT_BATCH_PRETEXT: &str = "*Next batch of newer but still rottening issues: *";

/// Anything that can deliver a report to a channel.
#[async_trait]
pub trait Notifier {
    async fn notify(&self, channel: &str, report: &Report) -> Result<()>;
}

/// Body of a `chat.postMessage` call
#[derive(Serialize, Debug, PartialEq)]
pub struct PostMessage {
    pub channel: String,
    pub text: String,
    pub mrkdwn: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Attachment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    pub mrkdwn_in: Vec<&'static str>,
}

/// Response from `chat.postMessage`
#[derive(Deserialize, Debug)]
pub struct PostMessageResponse {
    pub ok: bool,
    pub error: Option<String>,
}

/// Turns a report into a Slack message; every block after the first is
/// introduced by [`NEXT_BATCH_PRETEXT`].
pub fn build_message(channel: &str, report: &Report) -> PostMessage {
    let attachments = report
        .attachments
        .iter()
        .enumerate()
        .map(|(index, text)| Attachment {
            text: text.clone(),
            pretext: (index > 0).then(|| NEXT_BATCH_PRETEXT.to_string()),
            mrkdwn_in: vec!["text", "pretext"],
        })
        .collect();

    PostMessage {
        channel: channel.to_string(),
        text: report.text.clone(),
        mrkdwn: true,
        attachments,
    }
}

/// Slack answers 200 even on failure, so `ok` decides.
pub fn check_response(response: &PostMessageResponse) -> Result<()> {
    if response.ok {
        Ok(())
    } else {
        Err(RotError::Slack(
            response
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        ))
    }
}

pub struct SlackClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl SlackClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub async fn post_message(&self, message: &PostMessage) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/chat.postMessage", self.api_url))
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RotError::Slack(format!("HTTP {status}: {}", body.trim())));
        }

        check_response(&serde_json::from_str::<PostMessageResponse>(&body)?)
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn notify(&self, channel: &str, report: &Report) -> Result<()> {
        let message = build_message(channel, report);
        info!(
            "posting report to #{channel} with {} attachment(s)",
            message.attachments.len()
        );
        self.post_message(&message).await
    }
}

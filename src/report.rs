use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::github::issues::Issue;
use crate::rot;

/// Slack truncates attachment text past this many characters.
pub const MAX_ATTACHMENT_CHARS: usize = 3500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCounts {
    pub this_week: u64,
    pub last_week: u64,
}

/// The message to post: a header plus issue bullets split into attachment blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub attachments: Vec<String>,
}

/// Builds the weekly summary for `issues`, which are expected to be filtered
/// and sorted oldest first.
///
/// When nothing is rotten the report is a short congratulation with no
/// attachments; otherwise the header compares `counts.this_week` against
/// `counts.last_week` and every issue gets one bullet.
pub fn weekly_report(
    issues: &[Issue],
    counts: WeeklyCounts,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Report {
    if counts.this_week == 0 {
        return Report {
            text: format!(
                "No rottening issues! Great work :fiestaparrot:\n Last week we had *{}* rottening issues.",
                counts.last_week
            ),
            attachments: Vec::new(),
        };
    }

    let bullets = issues.iter().map(|issue| bullet(issue, now));

    Report {
        text: header(counts, threshold_days),
        attachments: pack_attachments(bullets, MAX_ATTACHMENT_CHARS),
    }
}

pub fn header(counts: WeeklyCounts, threshold_days: u32) -> String {
    let WeeklyCounts {
        this_week,
        last_week,
    } = counts;

    let comparison = match this_week.cmp(&last_week) {
        Ordering::Less => format!(
            "That is *{}* fewer than last week :slightly_smiling_face:",
            last_week - this_week
        ),
        Ordering::Greater => format!(
            "That is *{}* more than last week :white_frowning_face:",
            this_week - last_week
        ),
        Ordering::Equal => "That is the same number as last week :neutral_face:".to_string(),
    };

    format!(
        "Currently we have *{this_week}* issues that have not updated for over *{threshold_days}* days\n{comparison}\n\n*Rottening issues:* \n\n"
    )
}

pub fn bullet(issue: &Issue, now: DateTime<Utc>) -> String {
    // backticks break the link markup
    let title = issue.title.replace('`', "");
    format!(
        "• <{}|{}> in the <{}|{}> repo\nLast updated *{}* days ago\n\n",
        issue.url,
        title,
        issue.repository.url,
        issue.repository.name,
        rot::days_since(issue.updated_at, now)
    )
}

/// Concatenates bullets into blocks of at most `cap` characters. A bullet that
/// does not fit in the running block starts a new one; a bullet longer than
/// `cap` on its own is cut to `cap`.
pub fn pack_attachments<I>(bullets: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for bullet in bullets {
        let mut bullet_chars = bullet.chars().count();
        let bullet = if bullet_chars > cap {
            bullet_chars = cap;
            bullet.chars().take(cap).collect()
        } else {
            bullet
        };

        if current_chars + bullet_chars > cap && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        current.push_str(&bullet);
        current_chars += bullet_chars;
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

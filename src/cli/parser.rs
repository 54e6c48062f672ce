use std::path::PathBuf;

/// Enum representing what the command line asked for
#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
    Unknown(String),
}

/// Flag values as given on the command line, before validation
#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub channel: Option<String>,
    pub github_org: Option<String>,
    pub ignored_repos_path: Option<PathBuf>,
    pub threshold_days: Option<u32>,
    pub counter_path: Option<PathBuf>,
    pub dry_run: bool,
}

pub const USAGE: &str = "\
Usage: rottening -channel=<slack-channel> -github-org=<org> [options]

Options:
  -channel string              The slack channel to post to
  -github-org string           The github organisation to check for rotten issues in
  -ignored-repos-path string   The relative path to a file containing a list of repos to ignore
  -rottening-treshold int      The treshold in days for when an issue is considered rotten (default 100)
  -counter-file string         The file holding last week's issue count (default \"issues-last-week.txt\")
  -dry-run                     Print the report instead of posting it
  -h, -help                    Show this help

Every value is passed through a flag; positional arguments are rejected.

Environment:
  GH_TOKEN      GitHub token with the public_repo scope (required)
  SLACK_TOKEN   Slack bot token (required)";

/// Parse command line arguments and return a Command
///
/// Flags follow the Go `flag` conventions: one or two leading dashes, and the
/// value either after `=` or as the next argument.
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    let mut options = Options::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        let Some(flag) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
            return Command::Unknown(format!("unexpected argument: {arg}"));
        };
        if flag.is_empty() {
            return Command::Unknown(format!("unexpected argument: {arg}"));
        }

        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (flag, None),
        };

        match name {
            "h" | "help" => return Command::Help,
            "dry-run" => match inline.as_deref() {
                None | Some("true") => options.dry_run = true,
                Some("false") => options.dry_run = false,
                Some(other) => {
                    return Command::Unknown(format!(
                        "invalid boolean value \"{other}\" for flag -dry-run"
                    ));
                }
            },
            "channel" | "github-org" | "ignored-repos-path" | "rottening-treshold"
            | "rottening-threshold" | "counter-file" => {
                let Some(value) = inline.or_else(|| rest.next().cloned()) else {
                    return Command::Unknown(format!("flag needs an argument: -{name}"));
                };
                match name {
                    "channel" => options.channel = Some(value),
                    "github-org" => options.github_org = Some(value),
                    "ignored-repos-path" => options.ignored_repos_path = Some(PathBuf::from(value)),
                    "counter-file" => options.counter_path = Some(PathBuf::from(value)),
                    _ => match value.parse::<u32>() {
                        Ok(days) => options.threshold_days = Some(days),
                        Err(_) => {
                            return Command::Unknown(format!(
                                "invalid value \"{value}\" for flag -{name}: expected a number of days"
                            ));
                        }
                    },
                }
            }
            other => return Command::Unknown(format!("flag provided but not defined: -{other}")),
        }
    }

    Command::Run(options)
}

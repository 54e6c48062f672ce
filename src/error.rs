#[derive(Debug, thiserror::Error)]
pub enum RotError {
    #[error("{0} environment variable needs to be set.")]
    MissingEnv(&'static str),

    #[error("{0}")]
    Usage(String),

    #[error(
        "received status code {status} and body '{body}'\nmake sure that the github token you are using has the public_repo scope"
    )]
    GitHubStatus { status: u16, body: String },

    #[error("slack error: {0}")]
    Slack(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RotError>;

/// Error taxonomy for the analyzer pipeline

#[derive(thiserror::Error, Debug)]
pub enum AnalyzerError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Provider(String),

    /// Built through `From`, which drops the request URL (it carries the api key)
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(e: reqwest::Error) -> Self {
        AnalyzerError::Http(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

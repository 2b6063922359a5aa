use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    NotInRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::NotInRange(e) => write!(f, "Value out of range: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// Outcome classification for a single upstream request.
///
/// A 429 with a parseable body is deliberately *not* represented here; it is
/// a variant success carried by `upstream::FetchOutcome::Throttled`.
#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Protocol(u16),
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "Transport error: {}", e),
            FetchError::Protocol(status) => write!(f, "Unexpected upstream status: {}", status),
            FetchError::Parse(e) => write!(f, "Payload parse error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

#[derive(Debug)]
pub enum SessionError {
    InvalidConfig(ConfigError),
    AlreadyRunning,
    ConfigureFailed(FetchError),
    Superseded,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidConfig(e) => write!(f, "Invalid attack configuration: {}", e),
            SessionError::AlreadyRunning => write!(f, "Session is not idle"),
            SessionError::ConfigureFailed(e) => write!(f, "Upstream configure failed: {}", e),
            SessionError::Superseded => {
                write!(f, "Configure superseded by a concurrent stop request")
            }
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug)]
pub enum WebError {
    BindFailed(String),
    AssetMissing(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BindFailed(e) => write!(f, "Web server bind failed: {}", e),
            WebError::AssetMissing(e) => write!(f, "Embedded asset missing: {}", e),
        }
    }
}

impl std::error::Error for WebError {}

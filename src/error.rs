//! Application error type.
//!
//! The swipe controller itself never fails; everything that can go wrong lives
//! at the edges (terminal, config file, HTTP client) and is funneled through
//! [`AppError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be encoded or decoded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal could not be put into (or restored from) TUI mode.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl AppError {
    /// Terminal mode switches report plain io errors; keep them apart from file IO.
    pub fn terminal(e: impl std::fmt::Display) -> Self {
        AppError::Terminal(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }

    #[test]
    fn terminal_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::Unsupported, "no raw mode");
        let err = AppError::terminal(io);
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.to_string(), "Terminal error: no raw mode");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = parse.into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}

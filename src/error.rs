use thiserror::Error;

pub type Result<T> = std::result::Result<T, TileError>;

#[derive(Debug, Error)]
pub enum TileError {
    /// Malformed placement data.
    #[error("format error{}: {message}", .line.map(|l| format!(" on line {l}")).unwrap_or_default())]
    Format {
        line: Option<usize>,
        message: String,
    },

    #[error("invalid parameter: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TileError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            line: None,
            message: message.into(),
        }
    }

    pub(crate) fn format_at(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line: Some(line),
            message: message.into(),
        }
    }
}

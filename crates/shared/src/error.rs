use thiserror::Error;

use crate::domain::DialogKind;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("failed to launch dialog program '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{kind} dialog exited with status {code:?}: {stderr}")]
    Backend {
        kind: DialogKind,
        code: Option<i32>,
        stderr: String,
    },
    #[error("{kind} dialog timed out")]
    TimedOut { kind: DialogKind },
    #[error("could not decode {kind} response '{raw}'")]
    Parse { kind: DialogKind, raw: String },
    #[error("invalid calendar default date {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("dialog pipe failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress ticker stopped abnormally: {0}")]
    Ticker(String),
}

impl DialogError {
    pub fn parse(kind: DialogKind, raw: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            raw: raw.into(),
        }
    }
}

use std::path::PathBuf;

use async_trait::async_trait;
use shared::{
    domain::{
        CalendarRequest, ColorRequest, Credentials, DialogOptions, EntryRequest,
        FileSelectRequest, ListRequest, Notification, PasswordRequest, ProgressRequest,
        QuestionRequest, Rgb,
    },
    error::DialogError,
};

pub mod progress;
pub mod script;
pub mod scripted;
mod sequencer;
pub mod transcript;

pub use progress::{ProgressSchedule, ProgressTicker};
pub use scripted::{ScriptedAnswers, ScriptedBackend};
pub use sequencer::{DialogStep, RunSummary, Sequencer, SequencerError};
pub use transcript::{TranscriptEntry, TranscriptFormat};

/// Request/response contract of a native dialog facility.
///
/// Every call carries the presentation options explicitly. `Ok(None)` means
/// the user dismissed the dialog; `Err` means the backend itself failed.
#[async_trait]
pub trait DialogBackend: Send + Sync {
    async fn question(
        &self,
        options: &DialogOptions,
        request: &QuestionRequest,
    ) -> Result<bool, DialogError>;
    async fn select_file(
        &self,
        options: &DialogOptions,
        request: &FileSelectRequest,
    ) -> Result<Option<Vec<PathBuf>>, DialogError>;
    async fn entry(
        &self,
        options: &DialogOptions,
        request: &EntryRequest,
    ) -> Result<Option<String>, DialogError>;
    async fn progress(
        &self,
        options: &DialogOptions,
        request: &ProgressRequest,
    ) -> Result<Box<dyn ProgressHandle>, DialogError>;
    async fn password(
        &self,
        options: &DialogOptions,
        request: &PasswordRequest,
    ) -> Result<Option<Credentials>, DialogError>;
    async fn color(
        &self,
        options: &DialogOptions,
        request: &ColorRequest,
    ) -> Result<Option<Rgb>, DialogError>;
    async fn calendar(
        &self,
        options: &DialogOptions,
        request: &CalendarRequest,
    ) -> Result<Option<String>, DialogError>;
    async fn list(
        &self,
        options: &DialogOptions,
        request: &ListRequest,
    ) -> Result<Option<Vec<String>>, DialogError>;
    /// Fire-and-forget; returns once the notification has been handed off.
    async fn notify(
        &self,
        options: &DialogOptions,
        notification: &Notification,
    ) -> Result<(), DialogError>;
}

/// Live handle to an open progress dialog.
#[async_trait]
pub trait ProgressHandle: Send {
    async fn set_percent(&mut self, percent: u8) -> Result<(), DialogError>;
    async fn close(self: Box<Self>) -> Result<(), DialogError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

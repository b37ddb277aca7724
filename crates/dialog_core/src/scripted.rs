//! In-memory backend answering every dialog from canned values.
//!
//! Used for headless runs and as the recording fake in tests.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use shared::{
    domain::{
        CalendarRequest, ColorRequest, Credentials, DialogKind, DialogOptions, EntryRequest,
        FileSelectRequest, ListRequest, Notification, PasswordRequest, ProgressRequest,
        QuestionRequest, Rgb,
    },
    error::DialogError,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{DialogBackend, ProgressHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedAnswers {
    pub confirm: bool,
    pub files: Option<Vec<PathBuf>>,
    pub entry: Option<String>,
    pub credentials: Option<Credentials>,
    pub color: Option<Rgb>,
    pub date: Option<String>,
    pub list: Option<Vec<String>>,
    /// Kind of dialog that fails with a backend error instead of answering.
    pub fail_on: Option<DialogKind>,
}

impl Default for ScriptedAnswers {
    fn default() -> Self {
        Self {
            confirm: true,
            files: Some(vec![PathBuf::from("/tmp")]),
            entry: Some("kaixo".into()),
            credentials: Some(Credentials {
                username: Some("miren".into()),
                password: "sekretua".into(),
            }),
            color: Some(Rgb::new(255, 0, 0)),
            date: Some("1985/08/21".into()),
            list: Some(vec!["bi".into()]),
            fail_on: None,
        }
    }
}

impl ScriptedAnswers {
    /// Every dialog dismissed; the question answered "no".
    pub fn dismissed() -> Self {
        Self {
            confirm: false,
            files: None,
            entry: None,
            credentials: None,
            color: None,
            date: None,
            list: None,
            fail_on: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogCall {
    pub kind: DialogKind,
    pub options: DialogOptions,
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<DialogCall>,
    notifications: Vec<Notification>,
    percents: Vec<u8>,
    progress_closes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    answers: ScriptedAnswers,
    recorder: Arc<Mutex<Recorder>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedBackend {
    pub fn new(answers: ScriptedAnswers) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<DialogCall> {
        self.recorder.lock().await.calls.clone()
    }

    pub async fn kinds(&self) -> Vec<DialogKind> {
        self.recorder
            .lock()
            .await
            .calls
            .iter()
            .map(|call| call.kind)
            .collect()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.recorder.lock().await.notifications.clone()
    }

    pub async fn progress_percents(&self) -> Vec<u8> {
        self.recorder.lock().await.percents.clone()
    }

    pub async fn progress_closes(&self) -> usize {
        self.recorder.lock().await.progress_closes
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(
        &self,
        kind: DialogKind,
        options: &DialogOptions,
    ) -> Result<InFlightGuard, DialogError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let guard = InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        };

        self.recorder.lock().await.calls.push(DialogCall {
            kind,
            options: options.clone(),
        });
        debug!(%kind, "scripted dialog answered");
        tokio::task::yield_now().await;

        if self.answers.fail_on == Some(kind) {
            return Err(DialogError::Backend {
                kind,
                code: Some(-1),
                stderr: "scripted failure".into(),
            });
        }
        Ok(guard)
    }
}

#[async_trait]
impl DialogBackend for ScriptedBackend {
    async fn question(
        &self,
        options: &DialogOptions,
        _request: &QuestionRequest,
    ) -> Result<bool, DialogError> {
        let _guard = self.enter(DialogKind::Question, options).await?;
        Ok(self.answers.confirm)
    }

    async fn select_file(
        &self,
        options: &DialogOptions,
        _request: &FileSelectRequest,
    ) -> Result<Option<Vec<PathBuf>>, DialogError> {
        let _guard = self.enter(DialogKind::SelectFile, options).await?;
        Ok(self.answers.files.clone())
    }

    async fn entry(
        &self,
        options: &DialogOptions,
        _request: &EntryRequest,
    ) -> Result<Option<String>, DialogError> {
        let _guard = self.enter(DialogKind::Entry, options).await?;
        Ok(self.answers.entry.clone())
    }

    async fn progress(
        &self,
        options: &DialogOptions,
        _request: &ProgressRequest,
    ) -> Result<Box<dyn ProgressHandle>, DialogError> {
        let _guard = self.enter(DialogKind::Progress, options).await?;
        Ok(Box::new(ScriptedProgress {
            recorder: Arc::clone(&self.recorder),
        }))
    }

    async fn password(
        &self,
        options: &DialogOptions,
        _request: &PasswordRequest,
    ) -> Result<Option<Credentials>, DialogError> {
        let _guard = self.enter(DialogKind::Password, options).await?;
        Ok(self.answers.credentials.clone())
    }

    async fn color(
        &self,
        options: &DialogOptions,
        _request: &ColorRequest,
    ) -> Result<Option<Rgb>, DialogError> {
        let _guard = self.enter(DialogKind::Color, options).await?;
        Ok(self.answers.color)
    }

    async fn calendar(
        &self,
        options: &DialogOptions,
        _request: &CalendarRequest,
    ) -> Result<Option<String>, DialogError> {
        let _guard = self.enter(DialogKind::Calendar, options).await?;
        Ok(self.answers.date.clone())
    }

    async fn list(
        &self,
        options: &DialogOptions,
        _request: &ListRequest,
    ) -> Result<Option<Vec<String>>, DialogError> {
        let _guard = self.enter(DialogKind::List, options).await?;
        Ok(self.answers.list.clone())
    }

    async fn notify(
        &self,
        options: &DialogOptions,
        notification: &Notification,
    ) -> Result<(), DialogError> {
        let _guard = self.enter(DialogKind::Notify, options).await?;
        self.recorder
            .lock()
            .await
            .notifications
            .push(notification.clone());
        Ok(())
    }
}

struct ScriptedProgress {
    recorder: Arc<Mutex<Recorder>>,
}

#[async_trait]
impl ProgressHandle for ScriptedProgress {
    async fn set_percent(&mut self, percent: u8) -> Result<(), DialogError> {
        self.recorder.lock().await.percents.push(percent);
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), DialogError> {
        self.recorder.lock().await.progress_closes += 1;
        Ok(())
    }
}

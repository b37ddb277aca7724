//! Dialog backend that shells out to zenity.

use std::{path::PathBuf, process::Stdio};

use async_trait::async_trait;
use dialog_core::{DialogBackend, ProgressHandle};
use shared::{
    domain::{
        CalendarRequest, ColorRequest, Credentials, DialogKind, DialogOptions, EntryRequest,
        FileSelectRequest, ListRequest, Notification, PasswordRequest, ProgressRequest,
        QuestionRequest, Rgb,
    },
    error::DialogError,
};
use tokio::{
    io::AsyncWriteExt,
    process::{Child, ChildStdin, Command},
};
use tracing::{debug, warn};

pub mod args;
pub mod output;

pub const DEFAULT_PROGRAM: &str = "zenity";

const EXIT_OK: i32 = 0;
const EXIT_CANCEL: i32 = 1;
const EXIT_TIMEOUT: i32 = 5;

#[derive(Debug, Clone)]
pub struct ZenityBackend {
    program: String,
    base_args: Vec<String>,
}

impl ZenityBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    /// Arguments placed before the dialog flags, e.g. a wrapper such as
    /// `flatpak-spawn --host zenity` split into program and base args.
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.base_args).args(args);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> DialogError {
        DialogError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Runs one modal dialog to completion. `Ok(None)` when dismissed.
    async fn run(&self, kind: DialogKind, args: Vec<String>) -> Result<Option<String>, DialogError> {
        debug!(%kind, program = %self.program, "opening zenity dialog");
        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| self.spawn_error(source))?;

        interpret_exit(kind, output.status.code(), &output.stdout, &output.stderr)
    }
}

fn interpret_exit(
    kind: DialogKind,
    code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> Result<Option<String>, DialogError> {
    match code {
        Some(EXIT_OK) => {
            let text = String::from_utf8_lossy(stdout);
            Ok(Some(
                text.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string(),
            ))
        }
        Some(EXIT_CANCEL) => {
            debug!(%kind, "dialog dismissed");
            Ok(None)
        }
        Some(EXIT_TIMEOUT) => Err(DialogError::TimedOut { kind }),
        code => Err(DialogError::Backend {
            kind,
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }),
    }
}

#[async_trait]
impl DialogBackend for ZenityBackend {
    async fn question(
        &self,
        options: &DialogOptions,
        request: &QuestionRequest,
    ) -> Result<bool, DialogError> {
        let answer = self
            .run(DialogKind::Question, args::question(options, request))
            .await?;
        Ok(answer.is_some())
    }

    async fn select_file(
        &self,
        options: &DialogOptions,
        request: &FileSelectRequest,
    ) -> Result<Option<Vec<PathBuf>>, DialogError> {
        let answer = self
            .run(DialogKind::SelectFile, args::file_selection(options, request))
            .await?;
        Ok(answer.map(|raw| {
            output::split_values(&raw)
                .into_iter()
                .map(PathBuf::from)
                .collect()
        }))
    }

    async fn entry(
        &self,
        options: &DialogOptions,
        request: &EntryRequest,
    ) -> Result<Option<String>, DialogError> {
        self.run(DialogKind::Entry, args::entry(options, request))
            .await
    }

    async fn progress(
        &self,
        options: &DialogOptions,
        request: &ProgressRequest,
    ) -> Result<Box<dyn ProgressHandle>, DialogError> {
        debug!(program = %self.program, "opening zenity progress dialog");
        let mut child = self
            .command(&args::progress(options, request))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;
        let stdin = child.stdin.take();

        Ok(Box::new(ZenityProgress { child, stdin }))
    }

    async fn password(
        &self,
        options: &DialogOptions,
        request: &PasswordRequest,
    ) -> Result<Option<Credentials>, DialogError> {
        let answer = self
            .run(DialogKind::Password, args::password(options, request))
            .await?;
        Ok(answer.map(|raw| output::credentials(&raw, request.with_username)))
    }

    async fn color(
        &self,
        options: &DialogOptions,
        request: &ColorRequest,
    ) -> Result<Option<Rgb>, DialogError> {
        self.run(DialogKind::Color, args::color(options, request))
            .await?
            .map(|raw| output::color(&raw))
            .transpose()
    }

    async fn calendar(
        &self,
        options: &DialogOptions,
        request: &CalendarRequest,
    ) -> Result<Option<String>, DialogError> {
        self.run(DialogKind::Calendar, args::calendar(options, request))
            .await
    }

    async fn list(
        &self,
        options: &DialogOptions,
        request: &ListRequest,
    ) -> Result<Option<Vec<String>>, DialogError> {
        let answer = self
            .run(DialogKind::List, args::list(options, request))
            .await?;
        Ok(answer.map(|raw| output::split_values(&raw)))
    }

    async fn notify(
        &self,
        options: &DialogOptions,
        notification: &Notification,
    ) -> Result<(), DialogError> {
        let mut child = self
            .command(&args::notification(options, notification))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!(?status, "notification process exited"),
                Err(err) => warn!(%err, "failed to reap notification process"),
            }
        });
        Ok(())
    }
}

/// Open `zenity --progress` process fed through its stdin.
///
/// Once the user dismisses the window the pipe breaks; `stdin` is then
/// dropped and later updates are discarded.
pub struct ZenityProgress {
    child: Child,
    stdin: Option<ChildStdin>,
}

async fn write_percent(stdin: &mut ChildStdin, percent: u8) -> std::io::Result<()> {
    stdin.write_all(format!("{percent}\n").as_bytes()).await?;
    stdin.flush().await
}

#[async_trait]
impl ProgressHandle for ZenityProgress {
    async fn set_percent(&mut self, percent: u8) -> Result<(), DialogError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Ok(());
        };
        match write_percent(stdin, percent).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!(percent, "progress dialog dismissed");
                self.stdin = None;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn close(mut self: Box<Self>) -> Result<(), DialogError> {
        drop(self.stdin.take());
        let status = self.child.wait().await?;
        match status.code() {
            Some(EXIT_OK) | Some(EXIT_CANCEL) => Ok(()),
            code => Err(DialogError::Backend {
                kind: DialogKind::Progress,
                code,
                stderr: String::new(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

use std::{io::Write, sync::Arc};

use shared::{
    domain::{
        CalendarRequest, ColorRequest, DialogKind, DialogOptions, DialogResult, EntryRequest,
        FileSelectRequest, ListRequest, Notification, PasswordRequest, ProgressRequest,
        QuestionRequest,
    },
    error::DialogError,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    progress::{ProgressSchedule, ProgressTicker},
    transcript::{TranscriptEntry, TranscriptFormat},
    DialogBackend,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep {
    Question(QuestionRequest),
    SelectFile(FileSelectRequest),
    Entry(EntryRequest),
    Progress(ProgressRequest),
    Password(PasswordRequest),
    Color(ColorRequest),
    Calendar(CalendarRequest),
    List(ListRequest),
    Notify(Notification),
}

impl DialogStep {
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::Question(_) => DialogKind::Question,
            Self::SelectFile(_) => DialogKind::SelectFile,
            Self::Entry(_) => DialogKind::Entry,
            Self::Progress(_) => DialogKind::Progress,
            Self::Password(_) => DialogKind::Password,
            Self::Color(_) => DialogKind::Color,
            Self::Calendar(_) => DialogKind::Calendar,
            Self::List(_) => DialogKind::List,
            Self::Notify(_) => DialogKind::Notify,
        }
    }
}

#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("step {index} ({kind}) failed: {source}")]
    Step {
        index: usize,
        kind: DialogKind,
        source: DialogError,
    },
    #[error("failed to write transcript: {0}")]
    Transcript(#[from] std::io::Error),
    #[error("failed to encode transcript entry: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: Vec<DialogKind>,
    pub entries: Vec<TranscriptEntry>,
}

/// Runs an ordered list of dialog steps, one at a time.
///
/// Each step waits for its dialog to resolve before the next one is
/// requested. Dismissed dialogs do not stop the chain; backend failures do.
/// A `Notify` step is terminal.
pub struct Sequencer {
    backend: Arc<dyn DialogBackend>,
    options: DialogOptions,
    steps: Vec<DialogStep>,
    schedule: ProgressSchedule,
    format: TranscriptFormat,
}

impl Sequencer {
    pub fn new(backend: Arc<dyn DialogBackend>, options: DialogOptions) -> Self {
        Self {
            backend,
            options,
            steps: Vec::new(),
            schedule: ProgressSchedule::default(),
            format: TranscriptFormat::default(),
        }
    }

    pub fn with_steps(mut self, steps: Vec<DialogStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_progress_schedule(mut self, schedule: ProgressSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_format(mut self, format: TranscriptFormat) -> Self {
        self.format = format;
        self
    }

    pub fn steps(&self) -> &[DialogStep] {
        &self.steps
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary, SequencerError> {
        let mut summary = RunSummary::default();

        for (index, step) in self.steps.iter().enumerate() {
            let kind = step.kind();
            info!(step = index, %kind, "opening dialog");

            let response = self
                .execute(step)
                .await
                .map_err(|source| SequencerError::Step {
                    index,
                    kind,
                    source,
                })?;
            summary.completed.push(kind);

            if let Some(response) = response {
                let entry = TranscriptEntry::new(kind, response);
                if let Some(line) = entry.render(self.format)? {
                    writeln!(out, "{line}")?;
                    out.flush()?;
                }
                summary.entries.push(entry);
            }

            if kind == DialogKind::Notify {
                let skipped = self.steps.len() - index - 1;
                if skipped > 0 {
                    warn!(skipped, "steps after notify are not executed");
                }
                break;
            }
        }

        info!(completed = summary.completed.len(), "dialog chain finished");
        Ok(summary)
    }

    async fn execute(&self, step: &DialogStep) -> Result<Option<DialogResult>, DialogError> {
        let backend = self.backend.as_ref();
        let options = &self.options;

        let result = match step {
            DialogStep::Question(request) => {
                DialogResult::Confirmed(backend.question(options, request).await?)
            }
            DialogStep::SelectFile(request) => backend
                .select_file(options, request)
                .await?
                .map_or(DialogResult::Cancelled, DialogResult::from_paths),
            DialogStep::Entry(request) => backend
                .entry(options, request)
                .await?
                .map_or(DialogResult::Cancelled, DialogResult::Text),
            DialogStep::Progress(request) => {
                let handle = backend.progress(options, request).await?;
                let percent = ProgressTicker::start(handle, self.schedule)
                    .finish()
                    .await?;
                DialogResult::Percent(percent)
            }
            DialogStep::Password(request) => backend
                .password(options, request)
                .await?
                .map_or(DialogResult::Cancelled, |credentials| {
                    DialogResult::Text(credentials.to_string())
                }),
            DialogStep::Color(request) => backend
                .color(options, request)
                .await?
                .map_or(DialogResult::Cancelled, DialogResult::Color),
            DialogStep::Calendar(request) => backend
                .calendar(options, request)
                .await?
                .map_or(DialogResult::Cancelled, DialogResult::Text),
            DialogStep::List(request) => backend
                .list(options, request)
                .await?
                .map_or(DialogResult::Cancelled, DialogResult::Selection),
            DialogStep::Notify(notification) => {
                backend.notify(options, notification).await?;
                return Ok(None);
            }
        };

        Ok(Some(result))
    }
}

use serde::Serialize;
use shared::domain::{DialogKind, DialogResult};

const CONFIRMED: &str = "BAI";
const DECLINED: &str = "EZ";
/// Label the entry dialog's answer is echoed under.
const ENTRY_PREFIX: &str = "erantzuna: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub step: DialogKind,
    pub response: DialogResult,
}

impl TranscriptEntry {
    pub fn new(step: DialogKind, response: DialogResult) -> Self {
        Self { step, response }
    }

    /// Renders the line printed for this step, if the step prints one.
    pub fn render(&self, format: TranscriptFormat) -> Result<Option<String>, serde_json::Error> {
        match format {
            TranscriptFormat::Text => Ok(self.render_text()),
            TranscriptFormat::Json => serde_json::to_string(self).map(Some),
        }
    }

    fn render_text(&self) -> Option<String> {
        match (self.step, &self.response) {
            (DialogKind::Question, DialogResult::Confirmed(true)) => Some(CONFIRMED.to_string()),
            (DialogKind::Question, _) => Some(DECLINED.to_string()),
            (DialogKind::Progress | DialogKind::Notify, _) => None,
            (DialogKind::Entry, response) => Some(format!(
                "{}.response: {ENTRY_PREFIX}{response}",
                DialogKind::Entry.label()
            )),
            (step, response) => Some(format!("{}.response: {response}", step.label())),
        }
    }
}

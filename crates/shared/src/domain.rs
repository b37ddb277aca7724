use std::{fmt, path::PathBuf};

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::DialogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogKind {
    #[serde(rename = "question")]
    Question,
    #[serde(rename = "selectFile")]
    SelectFile,
    #[serde(rename = "entry")]
    Entry,
    #[serde(rename = "progress")]
    Progress,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "color")]
    Color,
    #[serde(rename = "calendar")]
    Calendar,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "notify")]
    Notify,
}

impl DialogKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::SelectFile => "selectFile",
            Self::Entry => "entry",
            Self::Progress => "progress",
            Self::Password => "password",
            Self::Color => "color",
            Self::Calendar => "calendar",
            Self::List => "list",
            Self::Notify => "notify",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation options applied to every dialog request.
///
/// Unset fields are left to the backend's own defaults. A blank value
/// (`""`) deserializes as unset, so settings layers can clear a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogOptions {
    #[serde(deserialize_with = "blank_or_number")]
    pub height: Option<u32>,
    #[serde(deserialize_with = "blank_or_number")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub ok_label: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub cancel_label: Option<String>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

fn blank_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(number)) => Ok(Some(number)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&text), &"a size in pixels")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelectRequest {
    pub message: String,
    pub multiple: bool,
    pub directory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRequest {
    pub title: String,
    pub message: String,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRequest {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub title: String,
    pub message: String,
    /// Ask for a username alongside the password.
    pub with_username: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub title: String,
    pub message: String,
    pub default_date: NaiveDate,
    /// strftime-style format of the returned date, e.g. `%Y/%m/%d`.
    pub date_format: String,
}

impl CalendarRequest {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        (year, month, day): (i32, u32, u32),
        date_format: impl Into<String>,
    ) -> Result<Self, DialogError> {
        let default_date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DialogError::InvalidDate { year, month, day })?;
        Ok(Self {
            title: title.into(),
            message: message.into(),
            default_date,
            date_format: date_format.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub title: String,
    pub message: String,
    pub header: String,
    pub options: Vec<String>,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: String,
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.username {
            Some(username) => write!(f, "{username}|{}", self.password),
            None => f.write_str(&self.password),
        }
    }
}

/// Value produced by one completed dialog interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DialogResult {
    Confirmed(bool),
    Text(String),
    Percent(u8),
    Color(Rgb),
    Selection(Vec<String>),
    Cancelled,
}

impl DialogResult {
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self::Selection(
            paths
                .into_iter()
                .map(|path| path.display().to_string())
                .collect(),
        )
    }
}

impl fmt::Display for DialogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Percent(percent) => write!(f, "{percent}"),
            Self::Color(rgb) => write!(f, "{rgb}"),
            Self::Selection(items) => f.write_str(&items.join(",")),
            Self::Cancelled => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_displays_with_spaced_components() {
        assert_eq!(Rgb::new(255, 0, 0).to_string(), "rgb(255, 0, 0)");
    }

    #[test]
    fn credentials_join_username_and_password() {
        let with_user = Credentials {
            username: Some("miren".into()),
            password: "sekretua".into(),
        };
        let bare = Credentials {
            username: None,
            password: "sekretua".into(),
        };
        assert_eq!(with_user.to_string(), "miren|sekretua");
        assert_eq!(bare.to_string(), "sekretua");
    }

    #[test]
    fn selection_displays_comma_joined() {
        let result = DialogResult::Selection(vec!["bat".into(), "bi".into()]);
        assert_eq!(result.to_string(), "bat,bi");
        assert_eq!(DialogResult::Cancelled.to_string(), "");
    }

    #[test]
    fn calendar_request_rejects_impossible_date() {
        let err = CalendarRequest::new("t", "m", (1985, 2, 30), "%Y/%m/%d").unwrap_err();
        assert!(matches!(
            err,
            DialogError::InvalidDate {
                year: 1985,
                month: 2,
                day: 30
            }
        ));

        let ok = CalendarRequest::new("t", "m", (1985, 8, 21), "%Y/%m/%d").expect("valid date");
        assert_eq!(ok.default_date, NaiveDate::from_ymd_opt(1985, 8, 21).unwrap());
    }

    #[test]
    fn dialog_kind_serializes_as_transcript_label() {
        let json = serde_json::to_string(&DialogKind::SelectFile).expect("serialize");
        assert_eq!(json, "\"selectFile\"");
    }

    #[test]
    fn blank_options_deserialize_as_unset() {
        let options: DialogOptions = serde_json::from_str(
            r#"{"height": "", "width": 640, "icon": "", "ok_label": " ", "cancel_label": "Utzi"}"#,
        )
        .expect("options");
        assert_eq!(
            options,
            DialogOptions {
                height: None,
                width: Some(640),
                icon: None,
                ok_label: None,
                cancel_label: Some("Utzi".into()),
            }
        );

        let sized: DialogOptions =
            serde_json::from_str(r#"{"height": "300"}"#).expect("numeric text");
        assert_eq!(sized.height, Some(300));
        assert!(serde_json::from_str::<DialogOptions>(r#"{"width": "wide"}"#).is_err());
    }
}

//! The canned demo chain: every dialog kind once, ending in a notification.

use shared::{
    domain::{
        CalendarRequest, ColorRequest, DialogOptions, EntryRequest, FileSelectRequest,
        ListRequest, Notification, PasswordRequest, ProgressRequest, QuestionRequest,
    },
    error::DialogError,
};

use crate::DialogStep;

pub const DEMO_HEIGHT: u32 = 300;
pub const DEMO_WIDTH: u32 = 400;
pub const DEMO_ICON: &str = "info";
pub const DEMO_OK_LABEL: &str = "Ados";
pub const DEMO_CANCEL_LABEL: &str = "Utzi";

pub const DEMO_LIST_OPTIONS: [&str; 3] = ["bat", "bi", "hiru"];
pub const DEMO_NOTIFY_TITLE: &str = "Test";
pub const DEMO_NOTIFY_MESSAGE: &str = "akabo proba";

pub fn demo_options() -> DialogOptions {
    DialogOptions {
        height: Some(DEMO_HEIGHT),
        width: Some(DEMO_WIDTH),
        icon: Some(DEMO_ICON.into()),
        ok_label: Some(DEMO_OK_LABEL.into()),
        cancel_label: Some(DEMO_CANCEL_LABEL.into()),
    }
}

pub fn demo_script() -> Result<Vec<DialogStep>, DialogError> {
    Ok(vec![
        DialogStep::Question(QuestionRequest {
            title: "title".into(),
            message: "oeoeoe".into(),
        }),
        DialogStep::SelectFile(FileSelectRequest {
            message: "hartzu hutsuneekin".into(),
            multiple: true,
            directory: true,
        }),
        DialogStep::Entry(EntryRequest {
            title: "hartzu hutsuneekin".into(),
            message: "nahi duzuna idatzi".into(),
            placeholder: Some("placeholder".into()),
        }),
        DialogStep::Progress(ProgressRequest {
            title: "ari naiz".into(),
            message: "zenbat?".into(),
        }),
        DialogStep::Password(PasswordRequest {
            title: "sartu pasahitza".into(),
            message: "izena eta pasahitza".into(),
            with_username: true,
        }),
        DialogStep::Color(ColorRequest {
            message: "aukeratu kolorea".into(),
        }),
        DialogStep::Calendar(CalendarRequest::new(
            "aukeratu eguna",
            "testua",
            (1985, 8, 21),
            "%Y/%m/%d",
        )?),
        DialogStep::List(ListRequest {
            title: "aukeratu eguna".into(),
            message: "testua".into(),
            header: "goiburua".into(),
            options: DEMO_LIST_OPTIONS.iter().map(|s| s.to_string()).collect(),
            multiple: true,
        }),
        DialogStep::Notify(Notification {
            title: DEMO_NOTIFY_TITLE.into(),
            message: DEMO_NOTIFY_MESSAGE.into(),
        }),
    ])
}

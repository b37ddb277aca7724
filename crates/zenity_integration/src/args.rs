//! Command-line construction for each zenity dialog.

use chrono::Datelike;
use shared::domain::{
    CalendarRequest, ColorRequest, DialogKind, DialogOptions, EntryRequest, FileSelectRequest,
    ListRequest, Notification, PasswordRequest, ProgressRequest, QuestionRequest,
};

/// Joins multi-value answers (file paths, list rows).
pub const SEPARATOR: &str = "|";

/// Dialogs that render OK/Cancel buttons with configurable labels.
fn shows_buttons(kind: DialogKind) -> bool {
    matches!(
        kind,
        DialogKind::Question
            | DialogKind::Entry
            | DialogKind::Password
            | DialogKind::Calendar
            | DialogKind::List
    )
}

fn common_args(kind: DialogKind, options: &DialogOptions) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(width) = options.width {
        args.push(format!("--width={width}"));
    }
    if let Some(height) = options.height {
        args.push(format!("--height={height}"));
    }
    if let Some(icon) = &options.icon {
        args.push(format!("--window-icon={icon}"));
        if kind == DialogKind::Question {
            args.push(format!("--icon-name={icon}"));
        }
    }
    if shows_buttons(kind) {
        if let Some(label) = &options.ok_label {
            args.push(format!("--ok-label={label}"));
        }
        if let Some(label) = &options.cancel_label {
            args.push(format!("--cancel-label={label}"));
        }
    }
    args
}

fn with_common(kind: DialogKind, options: &DialogOptions, mut args: Vec<String>) -> Vec<String> {
    args.extend(common_args(kind, options));
    args
}

pub fn question(options: &DialogOptions, request: &QuestionRequest) -> Vec<String> {
    with_common(
        DialogKind::Question,
        options,
        vec![
            "--question".into(),
            format!("--title={}", request.title),
            format!("--text={}", request.message),
        ],
    )
}

pub fn file_selection(options: &DialogOptions, request: &FileSelectRequest) -> Vec<String> {
    let mut args = vec![
        "--file-selection".into(),
        format!("--title={}", request.message),
        format!("--separator={SEPARATOR}"),
    ];
    if request.multiple {
        args.push("--multiple".into());
    }
    if request.directory {
        args.push("--directory".into());
    }
    with_common(DialogKind::SelectFile, options, args)
}

pub fn entry(options: &DialogOptions, request: &EntryRequest) -> Vec<String> {
    let mut args = vec![
        "--entry".into(),
        format!("--title={}", request.title),
        format!("--text={}", request.message),
    ];
    if let Some(placeholder) = &request.placeholder {
        args.push(format!("--entry-text={placeholder}"));
    }
    with_common(DialogKind::Entry, options, args)
}

pub fn progress(options: &DialogOptions, request: &ProgressRequest) -> Vec<String> {
    with_common(
        DialogKind::Progress,
        options,
        vec![
            "--progress".into(),
            format!("--title={}", request.title),
            format!("--text={}", request.message),
            "--percentage=0".into(),
            "--auto-close".into(),
        ],
    )
}

// zenity's password dialog has no text label; the message is folded into the title.
pub fn password(options: &DialogOptions, request: &PasswordRequest) -> Vec<String> {
    let mut args = vec![
        "--password".into(),
        format!("--title={}: {}", request.title, request.message),
    ];
    if request.with_username {
        args.push("--username".into());
    }
    with_common(DialogKind::Password, options, args)
}

pub fn color(options: &DialogOptions, request: &ColorRequest) -> Vec<String> {
    with_common(
        DialogKind::Color,
        options,
        vec![
            "--color-selection".into(),
            format!("--title={}", request.message),
        ],
    )
}

pub fn calendar(options: &DialogOptions, request: &CalendarRequest) -> Vec<String> {
    let date = request.default_date;
    with_common(
        DialogKind::Calendar,
        options,
        vec![
            "--calendar".into(),
            format!("--title={}", request.title),
            format!("--text={}", request.message),
            format!("--year={}", date.year()),
            format!("--month={}", date.month()),
            format!("--day={}", date.day()),
            format!("--date-format={}", request.date_format),
        ],
    )
}

pub fn list(options: &DialogOptions, request: &ListRequest) -> Vec<String> {
    let mut args = vec![
        "--list".into(),
        format!("--title={}", request.title),
        format!("--text={}", request.message),
        format!("--column={}", request.header),
        format!("--separator={SEPARATOR}"),
    ];
    if request.multiple {
        args.push("--multiple".into());
    }
    let mut args = with_common(DialogKind::List, options, args);
    // Rows are positional and must follow every flag.
    args.extend(request.options.iter().cloned());
    args
}

pub fn notification(options: &DialogOptions, notification: &Notification) -> Vec<String> {
    with_common(
        DialogKind::Notify,
        options,
        vec![
            "--notification".into(),
            format!("--text={}\n{}", notification.title, notification.message),
        ],
    )
}

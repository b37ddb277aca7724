use super::*;
use shared::domain::{DialogKind, DialogResult, Notification, QuestionRequest};
use std::time::Duration;

use crate::{
    script::{demo_options, demo_script, DEMO_NOTIFY_MESSAGE, DEMO_NOTIFY_TITLE},
    scripted::ScriptedAnswers,
};

const DEMO_ORDER: [DialogKind; 9] = [
    DialogKind::Question,
    DialogKind::SelectFile,
    DialogKind::Entry,
    DialogKind::Progress,
    DialogKind::Password,
    DialogKind::Color,
    DialogKind::Calendar,
    DialogKind::List,
    DialogKind::Notify,
];

fn demo_sequencer(backend: &ScriptedBackend) -> Sequencer {
    Sequencer::new(std::sync::Arc::new(backend.clone()), demo_options())
        .with_steps(demo_script().expect("demo script"))
}

fn lines(out: Vec<u8>) -> Vec<String> {
    String::from_utf8(out)
        .expect("utf8 transcript")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn demo_chain_runs_every_step_in_fixed_order() {
    let backend = ScriptedBackend::default();
    let mut out = Vec::new();

    let summary = demo_sequencer(&backend)
        .run(&mut out)
        .await
        .expect("chain runs");

    assert_eq!(backend.kinds().await, DEMO_ORDER.to_vec());
    assert_eq!(summary.completed, DEMO_ORDER.to_vec());
    assert_eq!(
        lines(out),
        vec![
            "BAI",
            "selectFile.response: /tmp",
            "entry.response: erantzuna: kaixo",
            "password.response: miren|sekretua",
            "color.response: rgb(255, 0, 0)",
            "calendar.response: 1985/08/21",
            "list.response: bi",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn progress_ticks_ten_times_then_closes_once() {
    let backend = ScriptedBackend::default();
    let steps: Vec<DialogStep> = demo_script()
        .expect("demo script")
        .into_iter()
        .filter(|step| step.kind() == DialogKind::Progress)
        .collect();
    let sequencer =
        Sequencer::new(std::sync::Arc::new(backend.clone()), demo_options()).with_steps(steps);

    let started = tokio::time::Instant::now();
    let summary = sequencer.run(&mut std::io::sink()).await.expect("progress runs");

    assert_eq!(
        backend.progress_percents().await,
        vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
    );
    assert_eq!(backend.progress_closes().await, 1);
    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert_eq!(
        summary.entries[0].response,
        DialogResult::Percent(100),
        "progress step resolves at 100"
    );
}

#[tokio::test(start_paused = true)]
async fn custom_schedule_still_finishes_at_one_hundred() {
    let backend = ScriptedBackend::default();
    let steps: Vec<DialogStep> = demo_script()
        .expect("demo script")
        .into_iter()
        .filter(|step| step.kind() == DialogKind::Progress)
        .collect();
    let sequencer = Sequencer::new(std::sync::Arc::new(backend.clone()), demo_options())
        .with_steps(steps)
        .with_progress_schedule(ProgressSchedule::new(Duration::from_millis(100), 30));

    sequencer.run(&mut std::io::sink()).await.expect("progress runs");

    assert_eq!(backend.progress_percents().await, vec![30, 60, 90, 100]);
    assert_eq!(backend.progress_closes().await, 1);
}

#[test]
fn schedule_percents_are_strictly_increasing() {
    let percents = ProgressSchedule::default().percents();
    assert_eq!(percents.len(), 10);
    assert!(percents.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(percents.last(), Some(&100));

    let clamped = ProgressSchedule::new(Duration::from_millis(1), 0).percents();
    assert_eq!(clamped.len(), 100);
    assert_eq!(clamped.first(), Some(&1));
}

#[tokio::test(start_paused = true)]
async fn declined_question_logs_ez_and_continues() {
    let backend = ScriptedBackend::new(ScriptedAnswers {
        confirm: false,
        ..ScriptedAnswers::default()
    });
    let mut out = Vec::new();

    demo_sequencer(&backend)
        .run(&mut out)
        .await
        .expect("chain runs");

    let lines = lines(out);
    assert_eq!(lines[0], "EZ");
    assert_eq!(lines[1], "selectFile.response: /tmp");
    assert_eq!(backend.kinds().await[1], DialogKind::SelectFile);
}

#[tokio::test(start_paused = true)]
async fn dismissed_dialogs_log_empty_responses_and_chain_continues() {
    let backend = ScriptedBackend::new(ScriptedAnswers::dismissed());
    let mut out = Vec::new();

    demo_sequencer(&backend)
        .run(&mut out)
        .await
        .expect("chain runs");

    assert_eq!(
        lines(out),
        vec![
            "EZ",
            "selectFile.response: ",
            "entry.response: erantzuna: ",
            "password.response: ",
            "color.response: ",
            "calendar.response: ",
            "list.response: ",
        ]
    );
    assert_eq!(backend.kinds().await, DEMO_ORDER.to_vec());
    assert_eq!(backend.notifications().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn list_response_is_followed_by_exactly_one_notification() {
    let backend = ScriptedBackend::default();
    let mut out = Vec::new();

    demo_sequencer(&backend)
        .run(&mut out)
        .await
        .expect("chain runs");

    assert_eq!(lines(out).last().map(String::as_str), Some("list.response: bi"));
    assert_eq!(
        backend.notifications().await,
        vec![Notification {
            title: DEMO_NOTIFY_TITLE.into(),
            message: DEMO_NOTIFY_MESSAGE.into(),
        }]
    );
    let kinds = backend.kinds().await;
    assert_eq!(kinds[kinds.len() - 2..], [DialogKind::List, DialogKind::Notify]);
}

#[tokio::test(start_paused = true)]
async fn multiple_list_choices_are_comma_joined() {
    let backend = ScriptedBackend::new(ScriptedAnswers {
        list: Some(vec!["bat".into(), "hiru".into()]),
        ..ScriptedAnswers::default()
    });
    let mut out = Vec::new();

    demo_sequencer(&backend)
        .run(&mut out)
        .await
        .expect("chain runs");

    assert!(lines(out).contains(&"list.response: bat,hiru".to_string()));
}

#[tokio::test(start_paused = true)]
async fn backend_failure_stops_the_chain_at_the_failing_step() {
    let backend = ScriptedBackend::new(ScriptedAnswers {
        fail_on: Some(DialogKind::Color),
        ..ScriptedAnswers::default()
    });
    let mut out = Vec::new();

    let err = demo_sequencer(&backend)
        .run(&mut out)
        .await
        .expect_err("color fails");

    assert!(matches!(
        err,
        SequencerError::Step {
            index: 5,
            kind: DialogKind::Color,
            ..
        }
    ));
    assert_eq!(backend.kinds().await, DEMO_ORDER[..6].to_vec());
    assert!(backend.notifications().await.is_empty());
    assert_eq!(
        lines(out).last().map(String::as_str),
        Some("password.response: miren|sekretua")
    );
}

#[tokio::test(start_paused = true)]
async fn backend_never_sees_more_than_one_request_in_flight() {
    let backend = ScriptedBackend::default();

    demo_sequencer(&backend)
        .run(&mut std::io::sink())
        .await
        .expect("chain runs");

    assert_eq!(backend.max_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn every_request_carries_the_configured_options() {
    let backend = ScriptedBackend::default();

    demo_sequencer(&backend)
        .run(&mut std::io::sink())
        .await
        .expect("chain runs");

    let calls = backend.calls().await;
    assert_eq!(calls.len(), DEMO_ORDER.len());
    assert!(calls.iter().all(|call| call.options == demo_options()));
}

#[tokio::test]
async fn steps_after_notify_are_not_executed() {
    let backend = ScriptedBackend::default();
    let sequencer = Sequencer::new(std::sync::Arc::new(backend.clone()), demo_options())
        .with_steps(vec![
            DialogStep::Notify(Notification {
                title: "Test".into(),
                message: "done".into(),
            }),
            DialogStep::Question(QuestionRequest {
                title: "late".into(),
                message: "never shown".into(),
            }),
        ]);

    let summary = sequencer.run(&mut std::io::sink()).await.expect("runs");

    assert_eq!(summary.completed, vec![DialogKind::Notify]);
    assert_eq!(backend.kinds().await, vec![DialogKind::Notify]);
}

#[tokio::test(start_paused = true)]
async fn json_transcript_emits_one_object_per_answered_step() {
    let backend = ScriptedBackend::default();
    let mut out = Vec::new();

    demo_sequencer(&backend)
        .with_format(TranscriptFormat::Json)
        .run(&mut out)
        .await
        .expect("chain runs");

    let values: Vec<serde_json::Value> = lines(out)
        .iter()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();

    assert_eq!(values.len(), 8);
    assert_eq!(
        values[0],
        serde_json::json!({"step": "question", "response": {"type": "confirmed", "value": true}})
    );
    assert_eq!(
        values[3],
        serde_json::json!({"step": "progress", "response": {"type": "percent", "value": 100}})
    );
    assert_eq!(
        values[5]["response"]["value"],
        serde_json::json!({"red": 255, "green": 0, "blue": 0})
    );
}

#[test]
fn question_transcript_uses_yes_no_words() {
    let yes = TranscriptEntry::new(DialogKind::Question, DialogResult::Confirmed(true));
    let no = TranscriptEntry::new(DialogKind::Question, DialogResult::Confirmed(false));

    assert_eq!(
        yes.render(TranscriptFormat::Text).expect("render").as_deref(),
        Some("BAI")
    );
    assert_eq!(
        no.render(TranscriptFormat::Text).expect("render").as_deref(),
        Some("EZ")
    );
}

#[test]
fn progress_and_notify_print_nothing_in_text_mode() {
    let progress = TranscriptEntry::new(DialogKind::Progress, DialogResult::Percent(100));
    assert_eq!(progress.render(TranscriptFormat::Text).expect("render"), None);
}

#[test]
fn entry_answer_is_echoed_with_its_label() {
    let typed = TranscriptEntry::new(DialogKind::Entry, DialogResult::Text("kaixo".into()));
    let dismissed = TranscriptEntry::new(DialogKind::Entry, DialogResult::Cancelled);

    assert_eq!(
        typed.render(TranscriptFormat::Text).expect("render").as_deref(),
        Some("entry.response: erantzuna: kaixo")
    );
    assert_eq!(
        dismissed.render(TranscriptFormat::Text).expect("render").as_deref(),
        Some("entry.response: erantzuna: ")
    );
}

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dialog_core::{
    script::demo_script, DialogBackend, ScriptedBackend, Sequencer, TranscriptFormat,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zenity_integration::ZenityBackend;

mod config;

use config::{load_settings, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    /// Real dialogs rendered by zenity.
    Zenity,
    /// Canned answers, no windows.
    Scripted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatChoice {
    Text,
    Json,
}

impl From<FormatChoice> for TranscriptFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Text => Self::Text,
            FormatChoice::Json => Self::Json,
        }
    }
}

/// Opens every dialog kind in turn and prints each answer.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file name, with or without the `.toml` extension.
    #[arg(long, default_value = "dialogs")]
    config: String,
    #[arg(long, value_enum, default_value_t = BackendChoice::Zenity)]
    backend: BackendChoice,
    #[arg(long, value_enum, default_value_t = FormatChoice::Text)]
    format: FormatChoice,
    /// Overrides `zenity_bin` from the settings.
    #[arg(long)]
    zenity_bin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(zenity_bin) = args.zenity_bin {
        settings.zenity_bin = zenity_bin;
    }

    info!(backend = ?args.backend, "starting dialog chain");
    let sequencer = build_sequencer(args.backend, args.format, &settings)?;

    let mut stdout = std::io::stdout();
    sequencer
        .run(&mut stdout)
        .await
        .context("dialog chain aborted")?;

    Ok(())
}

fn build_backend(choice: BackendChoice, settings: &Settings) -> Arc<dyn DialogBackend> {
    match choice {
        BackendChoice::Zenity => Arc::new(
            ZenityBackend::new(settings.zenity_bin.clone())
                .with_base_args(settings.zenity_args.clone()),
        ),
        BackendChoice::Scripted => Arc::new(ScriptedBackend::default()),
    }
}

fn build_sequencer(
    backend: BackendChoice,
    format: FormatChoice,
    settings: &Settings,
) -> Result<Sequencer> {
    Ok(
        Sequencer::new(build_backend(backend, settings), settings.dialog.clone())
            .with_steps(demo_script()?)
            .with_progress_schedule(settings.progress.schedule()?)
            .with_format(format.into()),
    )
}

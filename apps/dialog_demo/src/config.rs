use std::time::Duration;

use anyhow::{ensure, Context};
use config::{Config, Environment, File};
use dialog_core::{
    progress::{DEFAULT_PERIOD, DEFAULT_STEP},
    script::{DEMO_CANCEL_LABEL, DEMO_HEIGHT, DEMO_ICON, DEMO_OK_LABEL, DEMO_WIDTH},
    ProgressSchedule,
};
use serde::Deserialize;
use shared::domain::DialogOptions;
use zenity_integration::DEFAULT_PROGRAM;

pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub zenity_bin: String,
    #[serde(default)]
    pub zenity_args: Vec<String>,
    pub dialog: DialogOptions,
    pub progress: ProgressSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProgressSettings {
    pub tick_ms: u64,
    pub step: u8,
}

impl ProgressSettings {
    pub fn schedule(&self) -> anyhow::Result<ProgressSchedule> {
        ensure!(self.tick_ms > 0, "progress.tick_ms must be positive");
        ensure!(
            (1..=100).contains(&self.step),
            "progress.step must lie in 1..=100, got {}",
            self.step
        );
        Ok(ProgressSchedule::new(
            Duration::from_millis(self.tick_ms),
            self.step,
        ))
    }
}

/// Reads `<config_name>[.toml]` if present, then `APP__*` environment
/// variables (`APP__DIALOG__WIDTH=500`, `APP__PROGRESS__STEP=20`, ...).
pub fn load_settings(config_name: &str) -> anyhow::Result<Settings> {
    load_settings_with_prefix(config_name, ENV_PREFIX)
}

pub(crate) fn load_settings_with_prefix(
    config_name: &str,
    env_prefix: &str,
) -> anyhow::Result<Settings> {
    let settings: Settings = Config::builder()
        .set_default("zenity_bin", DEFAULT_PROGRAM)?
        .set_default("dialog.height", i64::from(DEMO_HEIGHT))?
        .set_default("dialog.width", i64::from(DEMO_WIDTH))?
        .set_default("dialog.icon", DEMO_ICON)?
        .set_default("dialog.ok_label", DEMO_OK_LABEL)?
        .set_default("dialog.cancel_label", DEMO_CANCEL_LABEL)?
        .set_default("progress.tick_ms", u64::try_from(DEFAULT_PERIOD.as_millis())?)?
        .set_default("progress.step", i64::from(DEFAULT_STEP))?
        .add_source(File::with_name(config_name).required(false))
        .add_source(
            Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("zenity_args"),
        )
        .build()
        .with_context(|| format!("failed to read settings from '{config_name}'"))?
        .try_deserialize()
        .context("invalid dialog settings")?;

    settings.progress.schedule()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "pages.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000/_api".into(),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the settings file, then the environment.
///
/// A missing default file is fine; a missing file that was asked for explicitly is not.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_with(
    explicit_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if explicit_path.is_some() => {
            return Err(err).with_context(|| {
                format!("failed to read settings file '{}'", path.display())
            });
        }
        Err(_) => {}
    }

    apply_env(&mut settings, lookup);
    Ok(settings)
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout = timeout_from_secs(v);
    }
    Ok(())
}

pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("PAGES_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout = timeout_from_secs(parsed);
        }
    }
}

/// Zero disables the timeout.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

//! Configuration loading for the completion providers.
//!
//! Each backend reads one rc file from the per-user config directory
//! (`$XDG_CONFIG_HOME`, falling back to `~/.config`). The files use a
//! small INI-style section format for compatibility with existing
//! `openaiapirc` / `geminiapirc` files. When a file is missing, a
//! placeholder template is written and an error instructs the user to
//! fill it in — a one-time bootstrap, not a retryable runtime failure.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{PilotError, PilotResult};
use crate::spi::Backend;

const OPENAI_RC_NAME: &str = "openaiapirc";
const GEMINI_RC_NAME: &str = "geminiapirc";

const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

const OPENAI_TEMPLATE: &str =
    "[openai]\nsecret_key=\napi_base=https://api.openai.com/v1\nmodel=gpt-4-turbo-preview\n";
const GEMINI_TEMPLATE: &str = "[gemini]\napi_key=\n";

/// Environment-derived overrides, read once at process start.
///
/// Core logic never looks at the environment directly; everything it
/// needs is captured here and passed down.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub config_dir: Option<PathBuf>,
    pub openai_model: Option<String>,
    pub gemini_model: Option<String>,
}

impl EnvOverrides {
    /// Capture `XDG_CONFIG_HOME`, `OPENAI_DEFAULT_MODEL` and
    /// `GEMINI_DEFAULT_MODEL` from the process environment.
    pub fn from_env() -> Self {
        Self {
            config_dir: std::env::var_os("XDG_CONFIG_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            openai_model: std::env::var("OPENAI_DEFAULT_MODEL").ok(),
            gemini_model: std::env::var("GEMINI_DEFAULT_MODEL").ok(),
        }
    }

    /// Resolve the config directory: override, else `~/.config`.
    pub fn resolve_config_dir(&self) -> PilotResult<PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        dirs::home_dir()
            .map(|h| h.join(".config"))
            .ok_or_else(|| PilotError::Configuration("could not determine home directory".into()))
    }
}

/// Credentials and model selection for the OpenAI backend.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub secret_key: String,
    pub api_base: String,
    pub organization: Option<String>,
    pub model: String,
    pub temperature: f32,
}

/// Credentials and model selection for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
}

/// Settings for the selected backend.
#[derive(Debug, Clone)]
pub enum BackendSettings {
    OpenAi(OpenAiSettings),
    Gemini(GeminiSettings),
}

/// Load settings for `backend`, bootstrapping a template rc file if absent.
///
/// # Errors
///
/// `Configuration` when the rc file did not exist (a template is written
/// first so the user only has to fill in the key) or when it exists but
/// cannot be parsed.
pub fn load(backend: Backend, env: &EnvOverrides) -> PilotResult<BackendSettings> {
    let dir = env.resolve_config_dir()?;
    match backend {
        Backend::Openai => load_openai(&dir, env).map(BackendSettings::OpenAi),
        Backend::Gemini => load_gemini(&dir, env).map(BackendSettings::Gemini),
    }
}

fn load_openai(dir: &Path, env: &EnvOverrides) -> PilotResult<OpenAiSettings> {
    let path = dir.join(OPENAI_RC_NAME);
    ensure_rc_file(
        &path,
        OPENAI_TEMPLATE,
        "OpenAI",
        "https://platform.openai.com/api-keys",
    )?;

    let section = read_section(&path, "openai")?;
    let temperature = match section.get("temperature") {
        Some(raw) => raw.parse::<f32>().map_err(|_| {
            PilotError::Configuration(format!(
                "invalid temperature '{}' in {}",
                raw,
                path.display()
            ))
        })?,
        None => 1.0,
    };

    Ok(OpenAiSettings {
        secret_key: section.get("secret_key").cloned().unwrap_or_default(),
        api_base: section
            .get("api_base")
            .cloned()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        organization: section.get("organization").cloned(),
        model: resolve_model(&section, env.openai_model.as_deref(), OPENAI_DEFAULT_MODEL),
        temperature,
    })
}

fn load_gemini(dir: &Path, env: &EnvOverrides) -> PilotResult<GeminiSettings> {
    let path = dir.join(GEMINI_RC_NAME);
    ensure_rc_file(&path, GEMINI_TEMPLATE, "Gemini", "Google AI Studio")?;

    let section = read_section(&path, "gemini")?;
    Ok(GeminiSettings {
        api_key: section.get("api_key").cloned().unwrap_or_default(),
        model: resolve_model(&section, env.gemini_model.as_deref(), GEMINI_DEFAULT_MODEL),
    })
}

/// Model priority: rc file entry, then env override, then built-in default.
fn resolve_model(
    section: &HashMap<String, String>,
    env_model: Option<&str>,
    default: &str,
) -> String {
    section
        .get("model")
        .cloned()
        .or_else(|| env_model.map(str::to_string))
        .unwrap_or_else(|| default.to_string())
}

/// Write a placeholder rc file if none exists, then error out so the
/// user can populate it.
fn ensure_rc_file(path: &Path, template: &str, label: &str, key_url: &str) -> PilotResult<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, template)?;
    Err(PilotError::Configuration(format!(
        "{} API config file created at {}\n\
         Please edit it and add your API key.\n\
         If you do not yet have an API key, you can get it from: {}",
        label,
        path.display(),
        key_url
    )))
}

/// Read one `[section]` of an INI-style rc file into a key/value map.
///
/// Values keep everything after the first `=`, trimmed, with one layer
/// of surrounding quotes stripped. Lines outside the requested section,
/// blank lines and `#`/`;` comments are ignored.
fn read_section(path: &Path, section: &str) -> PilotResult<HashMap<String, String>> {
    let contents = fs::read_to_string(path)?;
    let mut values = HashMap::new();
    let mut in_section = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == section;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            values.insert(key.trim().to_string(), value.to_string());
        }
    }

    if values.is_empty() && !in_section {
        return Err(PilotError::Configuration(format!(
            "no [{}] section in {}",
            section,
            path.display()
        )));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_for(dir: &TempDir) -> EnvOverrides {
        EnvOverrides {
            config_dir: Some(dir.path().to_path_buf()),
            openai_model: None,
            gemini_model: None,
        }
    }

    #[test]
    fn missing_rc_file_writes_template_and_errors() {
        let dir = TempDir::new().unwrap();
        let result = load(Backend::Openai, &env_for(&dir));
        assert!(matches!(result, Err(PilotError::Configuration(_))));

        let written = fs::read_to_string(dir.path().join(OPENAI_RC_NAME)).unwrap();
        assert_eq!(written, OPENAI_TEMPLATE);
    }

    #[test]
    fn second_run_loads_template_values() {
        let dir = TempDir::new().unwrap();
        let env = env_for(&dir);
        let _ = load(Backend::Openai, &env);

        let settings = match load(Backend::Openai, &env).unwrap() {
            BackendSettings::OpenAi(s) => s,
            other => panic!("expected OpenAI settings, got {:?}", other),
        };
        assert_eq!(settings.secret_key, "");
        assert_eq!(settings.api_base, "https://api.openai.com/v1");
        assert_eq!(settings.model, "gpt-4-turbo-preview");
        assert_eq!(settings.temperature, 1.0);
    }

    #[test]
    fn quoted_values_are_unwrapped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(OPENAI_RC_NAME),
            "[openai]\nsecret_key=\"sk-test\"\nmodel='gpt-4o'\ntemperature=0.7\n",
        )
        .unwrap();

        let settings = match load(Backend::Openai, &env_for(&dir)).unwrap() {
            BackendSettings::OpenAi(s) => s,
            other => panic!("expected OpenAI settings, got {:?}", other),
        };
        assert_eq!(settings.secret_key, "sk-test");
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.temperature, 0.7);
    }

    #[test]
    fn rc_model_beats_env_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(GEMINI_RC_NAME),
            "[gemini]\napi_key=k\nmodel=gemini-2.0-flash\n",
        )
        .unwrap();

        let mut env = env_for(&dir);
        env.gemini_model = Some("gemini-1.5-flash".to_string());

        let settings = match load(Backend::Gemini, &env).unwrap() {
            BackendSettings::Gemini(s) => s,
            other => panic!("expected Gemini settings, got {:?}", other),
        };
        assert_eq!(settings.model, "gemini-2.0-flash");
    }

    #[test]
    fn env_override_beats_builtin_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(GEMINI_RC_NAME), "[gemini]\napi_key=k\n").unwrap();

        let mut env = env_for(&dir);
        env.gemini_model = Some("gemini-1.5-flash".to_string());

        let settings = match load(Backend::Gemini, &env).unwrap() {
            BackendSettings::Gemini(s) => s,
            other => panic!("expected Gemini settings, got {:?}", other),
        };
        assert_eq!(settings.model, "gemini-1.5-flash");
    }

    #[test]
    fn invalid_temperature_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(OPENAI_RC_NAME),
            "[openai]\nsecret_key=k\ntemperature=hot\n",
        )
        .unwrap();

        let result = load(Backend::Openai, &env_for(&dir));
        assert!(matches!(result, Err(PilotError::Configuration(_))));
    }
}

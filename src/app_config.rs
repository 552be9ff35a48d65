//! Application configuration loading for CLI defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// TOML-backed file configuration for cataloger defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default scan concurrency (same range as CLI).
    pub concurrency: Option<u8>,
    /// Default catalog document extension.
    pub extension: Option<String>,
    /// Abort scans on the first failed document.
    pub fail_fast: Option<bool>,
    /// Show a progress bar during scans.
    pub progress: Option<bool>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(concurrency) = self.concurrency
            && !(1..=100).contains(&concurrency)
        {
            bail!("Invalid config value for `concurrency`: {concurrency}. Expected range: 1..=100");
        }

        if let Some(extension) = &self.extension
            && extension.trim_start_matches('.').is_empty()
        {
            bail!("Invalid config value for `extension`: must not be empty");
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive for this setting.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/cataloger/config.toml`
/// 2. `$HOME/.config/cataloger/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    config_path_from(env_var_non_empty_os("XDG_CONFIG_HOME"), env_var_non_empty_os("HOME"))
}

fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("cataloger")
                .join("config.toml"),
        );
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("cataloger")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given, otherwise from the default path if present.
///
/// An explicit path that does not exist is an error; a missing default file is not.
pub fn load_file_config_from(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_number = line_index + 1;

        match key {
            "concurrency" => {
                let parsed = parse_integer_u8(value).with_context(|| {
                    format!("Invalid `concurrency` value on line {line_number}")
                })?;
                cfg.concurrency = Some(parsed);
            }
            "extension" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `extension` value on line {line_number}")
                })?;
                cfg.extension = Some(parsed);
            }
            "fail_fast" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `fail_fast` value on line {line_number}")
                })?;
                cfg.fail_fast = Some(parsed);
            }
            "progress" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `progress` value on line {line_number}")
                })?;
                cfg.progress = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `verbosity` value on line {line_number}")
                })?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u8(raw_value: &str) -> Result<u8> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<u16>()?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u8"))
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected boolean value (true or false)"),
    }
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

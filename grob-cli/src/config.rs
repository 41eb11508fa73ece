//! Scaffolding settings.
//!
//! Resolution order (lowest to highest priority):
//! 1. built-in defaults
//! 2. `grob.yaml` in the project root (or the current directory for `grob new`)
//! 3. `GROB_*` environment variables

use std::path::{Path, PathBuf};

use grob_edit::{EmitOptions, Formatter};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "grob.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GrobConfig {
    /// Go module path of the Grob framework.
    pub framework_module: String,
    pub framework_version: String,
    pub go_version: String,
    pub gin_version: String,
    pub dig_version: String,
    /// gofmt-compatible formatter run over rewritten files. Unset means
    /// `gofmt` from `PATH`.
    pub gofmt: Option<PathBuf>,
    /// Reformat rewritten files. When false they are written as edited.
    pub format: bool,
}

impl Default for GrobConfig {
    fn default() -> Self {
        Self {
            framework_module: "github.com/yuliussmayoru/grob-framework".into(),
            framework_version: "v0.1.0".into(),
            go_version: "1.19".into(),
            gin_version: "v1.8.1".into(),
            dig_version: "v1.15.0".into(),
            gofmt: None,
            format: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config load error: cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config load error: invalid '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl GrobConfig {
    /// Load `grob.yaml` from `dir` if present, then apply environment overrides.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            Self::default()
        };
        config.apply_env();
        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    fn apply_env(&mut self) {
        let overrides = [
            ("GROB_FRAMEWORK_MODULE", &mut self.framework_module),
            ("GROB_FRAMEWORK_VERSION", &mut self.framework_version),
            ("GROB_GO_VERSION", &mut self.go_version),
            ("GROB_GIN_VERSION", &mut self.gin_version),
            ("GROB_DIG_VERSION", &mut self.dig_version),
        ];
        for (var, slot) in overrides {
            if let Some(value) = env_value(var) {
                *slot = value;
            }
        }
        if let Some(gofmt) = env_value("GROB_GOFMT") {
            self.gofmt = Some(PathBuf::from(gofmt));
        }
        if let Some(value) = env_value("GROB_FORMAT") {
            match parse_switch(&value) {
                Some(format) => self.format = format,
                None => tracing::warn!(%value, "ignoring GROB_FORMAT, expected true or false"),
            }
        }
    }

    /// Serializer settings for rewritten composition files.
    pub fn emit_options(&self) -> EmitOptions {
        if !self.format {
            return EmitOptions::default();
        }
        match &self.gofmt {
            Some(program) => EmitOptions::with_formatter(Formatter::Command(program.clone())),
            None => EmitOptions::detect(),
        }
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

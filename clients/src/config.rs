//! Configuration for the `dissoc` client.
//!
//! Precedence: command-line flags > config file > defaults. The config file
//! is the one passed with `--config`, or `dissoc.toml` in the working
//! directory when present.
//!
//! ```toml
//! group = "rat"
//! json = false
//!
//! [limits]
//! max_check_width = 20
//! max_span_width = 12
//! precondition = "trusted"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use dissociation::{Kernel, Limits};
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "dissoc.toml";

/// Which carrier the command-line elements are parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// 64-bit integers under wrapping addition.
    #[default]
    Int,
    /// Nonzero rationals under multiplication, written `n` or `n/d`.
    Rat,
    /// 64-bit vectors under xor, written in decimal, `0b…` or `0x…`.
    Xor,
}

/// `dissoc` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Carrier for parsed elements.
    pub group: GroupKind,

    /// Emit JSON instead of text.
    pub json: bool,

    /// Kernel enumeration limits.
    pub limits: Limits,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or unknown keys.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the explicit file if given, else `dissoc.toml` if it exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected file cannot be read or parsed.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(group) = overrides.group {
            self.group = group;
        }
        if overrides.json {
            self.json = true;
        }
        if let Some(width) = overrides.max_check_width {
            self.limits.max_check_width = width;
        }
        if let Some(width) = overrides.max_span_width {
            self.limits.max_span_width = width;
        }
        if let Some(precondition) = overrides.precondition {
            self.limits.precondition = precondition;
        }
    }

    /// A kernel enforcing the configured limits.
    pub fn kernel(&self) -> Kernel {
        Kernel::new(self.limits)
    }
}

/// Values taken from command-line flags; `None` leaves the config untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--group`
    pub group: Option<GroupKind>,
    /// `--json`
    pub json: bool,
    /// `--max-check-width`
    pub max_check_width: Option<usize>,
    /// `--max-span-width`
    pub max_span_width: Option<usize>,
    /// `--trusted`
    pub precondition: Option<dissociation::PreconditionCheck>,
}

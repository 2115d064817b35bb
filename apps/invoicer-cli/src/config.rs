//! # Invoicer Configuration
//!
//! Issuer details, bank account and output settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     INVOICER_COMPANY_NAME="ACME TRADERS"                               │
//! │     INVOICER_OUTPUT_DIR=./bills                                        │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/invoicer/invoicer.toml (Linux)                           │
//! │     ~/Library/Application Support/com.invoicer.bill/invoicer.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Placeholder company, empty bank details, current directory         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [company]
//! name = "ACME TRADERS"
//! addressLines = ["12, Market Yard,", "Ahmedabad"]
//! gstin = "24AAAAA0000A1Z5"
//! stateName = "Gujarat"
//! stateCode = "24"
//! contact = "9800000000"
//! email = "accounts@acme.example"
//! jurisdiction = "AHMEDABAD"
//!
//! [bank]
//! holderName = "ACME TRADERS"
//! bankName = "Example Bank"
//! accountNo = "000111222333"
//! branchIfsc = "MAIN BRANCH & EXMP0000001"
//!
//! [output]
//! dir = "bills"
//! pretty = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use invoicer_core::{BankDetails, CompanyProfile};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Output Settings
// =============================================================================

/// Where and how document files are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory for generated files.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            dir: default_output_dir(),
            pretty: default_true(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoicerConfig {
    #[serde(default)]
    pub company: CompanyProfile,

    #[serde(default)]
    pub bank: BankDetails,

    #[serde(default)]
    pub output: OutputSettings,
}

impl InvoicerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (invoicer.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Writes the configuration as TOML and returns the path written.
    ///
    /// Refuses to replace an existing file unless `overwrite` is set.
    pub fn save(&self, config_path: Option<PathBuf>, overwrite: bool) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml()?)?;
        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.company.name.trim().is_empty() {
            return Err(ConfigError::Invalid("company.name must not be empty".into()));
        }

        // Printed as "SUBJECT TO <jurisdiction> JURISDICTION"
        if self.company.jurisdiction.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "company.jurisdiction must not be empty".into(),
            ));
        }

        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output.dir must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `INVOICER_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("INVOICER_COMPANY_NAME") {
            debug!(name = %name, "Overriding company name from environment");
            self.company.name = name;
        }

        if let Some(gstin) = lookup("INVOICER_GSTIN") {
            self.company.gstin = gstin;
        }

        if let Some(jurisdiction) = lookup("INVOICER_JURISDICTION") {
            self.company.jurisdiction = jurisdiction;
        }

        if let Some(account_no) = lookup("INVOICER_BANK_ACCOUNT_NO") {
            self.bank.account_no = account_no;
        }

        if let Some(dir) = lookup("INVOICER_OUTPUT_DIR") {
            debug!(dir = %dir, "Overriding output directory from environment");
            self.output.dir = PathBuf::from(dir);
        }

        if let Some(pretty) = lookup("INVOICER_OUTPUT_PRETTY") {
            match pretty.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.output.pretty = true,
                "0" | "false" | "no" => self.output.pretty = false,
                _ => warn!(value = %pretty, "Unknown INVOICER_OUTPUT_PRETTY value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "invoicer", "bill")
            .map(|dirs| dirs.config_dir().join("invoicer.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Configuration management for the route administration tool
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_DIR_NAME, CONFIG_GENERATED, DATABASE_FILE_NAME, DEFAULT_BUS_COMPANY, DEFAULT_CAPACITY_CONVENCIONAL,
    DEFAULT_CAPACITY_EXECUTIVO, DEFAULT_CAPACITY_LEITO, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, LOCAL_CONFIG_FILE,
};
use crate::fleet::BusType;
use crate::utils::datetime::YearRange;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub schedule: ScheduleConfig,
    pub fleet: FleetConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Bounds applied to typed route dates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Earliest accepted year (inclusive)
    pub min_year: i32,
    /// Latest accepted year (inclusive)
    pub max_year: i32,
}

/// Fleet defaults used when building route records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Company written on new routes
    pub default_company: String,
    /// Seats offered per bus type when no bus-specific count is known
    pub capacities: SeatCapacities,
}

/// Seat capacity per bus type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatCapacities {
    pub convencional: u32,
    pub executivo: u32,
    pub leito: u32,
}

/// Local database location
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file; defaults to the user data directory
    pub database_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl ScheduleConfig {
    pub fn years(&self) -> YearRange {
        YearRange::new(self.min_year, self.max_year)
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            default_company: DEFAULT_BUS_COMPANY.to_string(),
            capacities: SeatCapacities::default(),
        }
    }
}

impl FleetConfig {
    pub fn capacity_for(&self, bus_type: BusType) -> u32 {
        match bus_type {
            BusType::Convencional => self.capacities.convencional,
            BusType::Executivo => self.capacities.executivo,
            BusType::Leito => self.capacities.leito,
        }
    }
}

impl Default for SeatCapacities {
    fn default() -> Self {
        Self {
            convencional: DEFAULT_CAPACITY_CONVENCIONAL,
            executivo: DEFAULT_CAPACITY_EXECUTIVO,
            leito: DEFAULT_CAPACITY_LEITO,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.schedule.min_year > self.schedule.max_year {
            anyhow::bail!(
                "schedule.min_year ({}) cannot be greater than schedule.max_year ({})",
                self.schedule.min_year,
                self.schedule.max_year
            );
        }

        if self.fleet.default_company.trim().is_empty() {
            anyhow::bail!("fleet.default_company cannot be empty");
        }

        for bus_type in [BusType::Convencional, BusType::Executivo, BusType::Leito] {
            if self.fleet.capacity_for(bus_type) == 0 {
                anyhow::bail!("fleet.capacities.{} must be greater than zero", bus_type.as_db_str());
            }
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Resolve the SQLite file, falling back to the user data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::get_data_dir()?.join(DATABASE_FILE_NAME)),
        }
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# AG TUR Route Administration Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }

    /// Get the directory holding the database and log file
    pub fn get_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }
}

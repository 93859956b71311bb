//! Constants used throughout the application
//!
//! This module centralizes user-facing text, defaults and other constant values
//! to improve maintainability and consistency.

// Schedule defaults
/// Earliest year accepted in a route date unless configured otherwise
pub const DEFAULT_MIN_YEAR: i32 = 2024;
/// Latest year accepted in a route date unless configured otherwise
pub const DEFAULT_MAX_YEAR: i32 = 2035;

// Fleet defaults
pub const DEFAULT_BUS_COMPANY: &str = "AG TUR";
pub const DEFAULT_CAPACITY_CONVENCIONAL: u32 = 42;
/// One of the two route screens used 44 here; see DESIGN.md
pub const DEFAULT_CAPACITY_EXECUTIVO: u32 = 46;
pub const DEFAULT_CAPACITY_LEITO: u32 = 32;

// Route status values as stored
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

// Route card labels
pub const LABEL_ACTIVE: &str = "Ativa";
pub const LABEL_INACTIVE: &str = "Inativa";
pub const LABEL_NO_DURATION: &str = "N/A";
pub const LABEL_NO_BUS: &str = "Sem ônibus vinculado";

// Success Messages
pub const SUCCESS_ROUTE_CREATED: &str = "Rota cadastrada com sucesso";
pub const SUCCESS_ROUTE_UPDATED: &str = "Rota atualizada com sucesso";
pub const SUCCESS_ROUTE_DELETED: &str = "Rota excluída com sucesso";
pub const SUCCESS_ROUTE_STATUS: &str = "Status da rota atualizado com sucesso";

// CLI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";

// File names
pub const APP_DIR_NAME: &str = "agtur-admin";
pub const LOCAL_CONFIG_FILE: &str = "agtur-admin.toml";
pub const LOG_FILE_NAME: &str = "agtur-admin.log";
pub const DATABASE_FILE_NAME: &str = "routes.db";

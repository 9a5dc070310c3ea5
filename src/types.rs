//! Common types used throughout linnworks-query
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single report row: field name to value, in server order
pub type Record = JsonObject;

// ============================================================================
// Wire defaults
// ============================================================================

/// Default authorization endpoint
pub const DEFAULT_AUTH_URL: &str = "https://api.linnworks.net/api/Auth/AuthorizeByApplication";

/// Default paged script execution endpoint
pub const DEFAULT_SCRIPT_URL: &str =
    "https://eu-ext.linnworks.net/api/Dashboards/ExecuteCustomPagedScript";

/// Default number of rows requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

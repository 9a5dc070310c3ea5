//! Script parameter payload
//!
//! Each server-side script declares named, typed arguments. The request
//! carries them as an array of `ScriptParameter` objects.

use crate::types::JsonValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suffix turning a calendar date into the start of that day
pub const START_OF_DAY: &str = "T00:00:00.000Z";

/// Suffix turning a calendar date into the end of that day
pub const END_OF_DAY: &str = "T23:59:59.000Z";

/// Parameter kinds understood by the script endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Date,
    Boolean,
    Select,
    Int,
}

/// One script argument
///
/// Optional fields are left out of the JSON when unset; some scripts only
/// take `Type`, `Name` and `Value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScriptParameter {
    #[serde(rename = "Type")]
    pub kind: ParameterType,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_values: Option<Vec<JsonValue>>,

    pub value: JsonValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

impl ScriptParameter {
    /// Bare parameter with only type, name and value
    pub fn new(kind: ParameterType, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            default_value: None,
            available_values: None,
            value: value.into(),
            sort_order: None,
        }
    }

    /// Fully described parameter, the shape the dashboard scripts expect
    pub fn described(
        kind: ParameterType,
        name: impl Into<String>,
        description: impl Into<String>,
        default_value: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: Some(description.into()),
            default_value: Some(default_value.into()),
            available_values: Some(Vec::new()),
            value: value.into(),
            sort_order: Some(0),
        }
    }

    /// `startDate` set to midnight of `date`
    pub fn start_date(date: NaiveDate) -> Self {
        Self::described(
            ParameterType::Date,
            "startDate",
            "Start date",
            "",
            day_boundary(date, START_OF_DAY),
        )
    }

    /// `endDate` set to the last second of `date`
    pub fn end_date(date: NaiveDate) -> Self {
        Self::described(
            ParameterType::Date,
            "endDate",
            "End date",
            "",
            day_boundary(date, END_OF_DAY),
        )
    }

    /// Select-list parameter
    pub fn select(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self::new(ParameterType::Select, name, value)
    }

    /// Boolean parameter with a description and a `"0"`/`"1"` default
    pub fn boolean(name: impl Into<String>, description: impl Into<String>, value: bool) -> Self {
        Self::described(ParameterType::Boolean, name, description, "0", value)
    }
}

/// `2022-12-06` + suffix
pub fn day_boundary(date: NaiveDate, suffix: &str) -> String {
    format!("{}{suffix}", date.format("%Y-%m-%d"))
}

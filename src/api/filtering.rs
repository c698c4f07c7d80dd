//! Study query filters.
//!
//! Filters arrive from the command line as `FIELD.CONDITION.VALUE` and
//! travel to the service as a single `filter.{field}.{condition}`
//! query parameter.

use crate::error::GantryError;

/// Comparison operators accepted by the study search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCondition {
    Equals,
    EqualsOrNull,
    NotEquals,
    NotEqualsOrNull,
    Like,
    Gt,
    Ge,
    Lt,
    Le,
    In,
    InOrNull,
}

impl FilterCondition {
    /// Wire names of every condition, in a stable order.
    pub const NAMES: [&'static str; 11] = [
        "equals",
        "equals_or_null",
        "not_equals",
        "not_equals_or_null",
        "like",
        "gt",
        "ge",
        "lt",
        "le",
        "in",
        "in_or_null",
    ];

    /// Parse a wire name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "equals" => Some(Self::Equals),
            "equals_or_null" => Some(Self::EqualsOrNull),
            "not_equals" => Some(Self::NotEquals),
            "not_equals_or_null" => Some(Self::NotEqualsOrNull),
            "like" => Some(Self::Like),
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            "in" => Some(Self::In),
            "in_or_null" => Some(Self::InOrNull),
            _ => None,
        }
    }

    /// Wire name of this condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::EqualsOrNull => "equals_or_null",
            Self::NotEquals => "not_equals",
            Self::NotEqualsOrNull => "not_equals_or_null",
            Self::Like => "like",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::In => "in",
            Self::InOrNull => "in_or_null",
        }
    }

    /// Conditions that take a comma-separated list of values.
    pub fn expects_list(&self) -> bool {
        matches!(self, Self::In | Self::InOrNull)
    }
}

/// A parsed study filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyFilter {
    pub field: String,
    pub condition: FilterCondition,
    /// Value as transmitted; list conditions hold a JSON array.
    pub value: String,
}

impl StudyFilter {
    /// Parses `FIELD.CONDITION.VALUE`.
    ///
    /// Only the first two dots separate, so values may contain dots.
    /// List conditions comma-split the value and transmit it as a JSON
    /// array.
    pub fn parse(expression: &str) -> Result<Self, GantryError> {
        let mut parts = expression.splitn(3, '.');
        let (Some(field), Some(condition), Some(value)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(GantryError::InvalidFilterCondition {
                condition: expression.to_string(),
            });
        };

        let condition =
            FilterCondition::parse(condition).ok_or_else(|| GantryError::InvalidFilterCondition {
                condition: condition.to_string(),
            })?;

        let value = if condition.expects_list() {
            let items: Vec<&str> = value.split(',').collect();
            serde_json::to_string(&items).expect("string lists always encode")
        } else {
            value.to_string()
        };

        Ok(Self {
            field: field.to_string(),
            condition,
            value,
        })
    }

    /// Query parameter name, `filter.{field}.{condition}`.
    pub fn param_name(&self) -> String {
        format!("filter.{}.{}", self.field, self.condition.as_str())
    }
}

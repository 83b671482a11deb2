//! Compiled schema tree

use regex::Regex;
use serde_json::Value;
use std::fmt;

/// JSON Schema primitive type names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    Integer,
    String,
}

impl SchemaType {
    /// Parse a `type` keyword entry
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }

    /// Whether `value` is an instance of this type
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Null, Value::Null) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::Number, Value::Number(_)) => true,
            (Self::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            (Self::String, Value::String(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON type name of a value, for diagnostics
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One compiled (sub)schema
#[derive(Debug, Clone)]
pub(crate) enum SchemaNode {
    /// `true`: every value is accepted
    Always,
    /// `false`: no value is accepted
    Never,
    Rules(Box<NodeRules>),
}

/// Array `items` in either single-schema or tuple form
#[derive(Debug, Clone)]
pub(crate) enum ItemsRule {
    Single(SchemaNode),
    Tuple {
        prefix: Vec<SchemaNode>,
        /// `additionalItems`; `None` allows any extra items
        additional: Option<SchemaNode>,
    },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NodeRules {
    pub types: Option<Vec<SchemaType>>,
    pub nullable: bool,
    pub enum_values: Option<Vec<Value>>,
    pub const_value: Option<Value>,

    pub properties: Vec<(String, SchemaNode)>,
    pub required: Vec<String>,
    /// `None` allows any additional property
    pub additional_properties: Option<SchemaNode>,
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,

    pub items: Option<ItemsRule>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,

    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,

    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    pub multiple_of: Option<f64>,

    pub any_of: Vec<SchemaNode>,
    pub one_of: Vec<SchemaNode>,
    pub all_of: Vec<SchemaNode>,
    pub not: Option<SchemaNode>,
}

/// JSON equality where numerically equal numbers compare equal (`1 == 1.0`)
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            _ if x == y => true,
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

//! JSON Schema to validator compilation
//!
//! Schemas are interpreted once, at bridge time, into a [`SchemaNode`] tree.
//! Anything the validator could not enforce is rejected here so that invalid
//! input is never silently accepted later.

use super::error::SchemaError;
use super::node::{ItemsRule, NodeRules, SchemaNode, SchemaType};
use super::validator::InputValidator;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, trace};

/// Keywords that carry no validation meaning
const ANNOTATION_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "id",
    "$comment",
    "title",
    "description",
    "default",
    "examples",
    "format",
    "readOnly",
    "writeOnly",
    "deprecated",
    "definitions",
    "$defs",
    "contentMediaType",
    "contentEncoding",
    "contentSchema",
];

/// JSON Schema keywords the validator does not implement
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "$ref",
    "$dynamicRef",
    "$recursiveRef",
    "if",
    "then",
    "else",
    "patternProperties",
    "propertyNames",
    "dependencies",
    "dependentRequired",
    "dependentSchemas",
    "contains",
    "minContains",
    "maxContains",
    "prefixItems",
    "unevaluatedProperties",
    "unevaluatedItems",
];

/// Compiler behaviour switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Reject keywords that are neither JSON Schema validation keywords nor
    /// annotations (vendor extensions such as `x-order`). Off by default.
    #[serde(default)]
    pub deny_unknown_keywords: bool,
}

/// Compiles tool input schemas into [`InputValidator`]s
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    options: SchemaOptions,
}

impl SchemaCompiler {
    /// Create a compiler with the given options
    pub fn new(options: SchemaOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Compile a schema document.
    ///
    /// A `null` schema (a tool that declared no input schema) compiles as
    /// `{"type": "object"}`.
    pub fn compile(&self, schema: &Value) -> Result<InputValidator, SchemaError> {
        let source = if schema.is_null() {
            debug!("tool declares no input schema, accepting any object");
            json!({ "type": "object" })
        } else {
            schema.clone()
        };
        let root = self.compile_node(&source, "#")?;
        Ok(InputValidator::new(root, source))
    }

    fn compile_node(&self, schema: &Value, path: &str) -> Result<SchemaNode, SchemaError> {
        let obj = match schema {
            Value::Bool(true) => return Ok(SchemaNode::Always),
            Value::Bool(false) => return Ok(SchemaNode::Never),
            Value::Object(obj) => obj,
            other => {
                return Err(SchemaError::malformed(
                    path,
                    format!("expected a schema object or boolean, got {}", other),
                ));
            }
        };

        let mut rules = NodeRules::default();
        let mut additional_items = None;
        let mut draft4_exclusive_min = false;
        let mut draft4_exclusive_max = false;

        for (keyword, value) in obj {
            let at = format!("{}/{}", path, keyword);
            match keyword.as_str() {
                "type" => rules.types = Some(parse_types(value, &at)?),
                "nullable" => rules.nullable = expect_bool(value, &at)?,
                "enum" => rules.enum_values = Some(expect_array(value, &at)?.clone()),
                "const" => rules.const_value = Some(value.clone()),

                "properties" => rules.properties = self.compile_properties(value, &at)?,
                "required" => rules.required = parse_required(value, &at)?,
                "additionalProperties" => {
                    rules.additional_properties = Some(self.compile_node(value, &at)?)
                }
                "minProperties" => rules.min_properties = Some(expect_count(value, &at)?),
                "maxProperties" => rules.max_properties = Some(expect_count(value, &at)?),

                "items" => rules.items = Some(self.compile_items(value, &at)?),
                "additionalItems" => additional_items = Some(self.compile_node(value, &at)?),
                "minItems" => rules.min_items = Some(expect_count(value, &at)?),
                "maxItems" => rules.max_items = Some(expect_count(value, &at)?),
                "uniqueItems" => rules.unique_items = expect_bool(value, &at)?,

                "minLength" => rules.min_length = Some(expect_count(value, &at)?),
                "maxLength" => rules.max_length = Some(expect_count(value, &at)?),
                "pattern" => rules.pattern = Some(compile_pattern(value, &at)?),

                "minimum" => rules.minimum = Some(expect_number(value, &at)?),
                "maximum" => rules.maximum = Some(expect_number(value, &at)?),
                "exclusiveMinimum" => match value {
                    Value::Bool(flag) => draft4_exclusive_min = *flag,
                    _ => rules.exclusive_minimum = Some(expect_number(value, &at)?),
                },
                "exclusiveMaximum" => match value {
                    Value::Bool(flag) => draft4_exclusive_max = *flag,
                    _ => rules.exclusive_maximum = Some(expect_number(value, &at)?),
                },
                "multipleOf" => {
                    let divisor = expect_number(value, &at)?;
                    if divisor <= 0.0 {
                        return Err(SchemaError::malformed(&at, "must be greater than 0"));
                    }
                    rules.multiple_of = Some(divisor);
                }

                "anyOf" => rules.any_of = self.compile_subschemas(value, &at)?,
                "oneOf" => rules.one_of = self.compile_subschemas(value, &at)?,
                "allOf" => rules.all_of = self.compile_subschemas(value, &at)?,
                "not" => rules.not = Some(self.compile_node(value, &at)?),

                k if ANNOTATION_KEYWORDS.contains(&k) => {}
                k if UNSUPPORTED_KEYWORDS.contains(&k) => {
                    return Err(SchemaError::Unsupported {
                        path: path.to_string(),
                        keyword: k.to_string(),
                    });
                }
                k => {
                    if self.options.deny_unknown_keywords {
                        return Err(SchemaError::UnknownKeyword {
                            path: path.to_string(),
                            keyword: k.to_string(),
                        });
                    }
                    trace!(keyword = k, path, "ignoring unknown schema keyword");
                }
            }
        }

        // draft-4 spells exclusive bounds as booleans next to minimum/maximum
        if draft4_exclusive_min {
            let bound = rules.minimum.take().ok_or_else(|| {
                SchemaError::malformed(path, "exclusiveMinimum: true requires minimum")
            })?;
            rules.exclusive_minimum = Some(bound);
        }
        if draft4_exclusive_max {
            let bound = rules.maximum.take().ok_or_else(|| {
                SchemaError::malformed(path, "exclusiveMaximum: true requires maximum")
            })?;
            rules.exclusive_maximum = Some(bound);
        }

        // additionalItems only constrains the tuple form of items
        if let Some(ItemsRule::Tuple { additional, .. }) = rules.items.as_mut() {
            *additional = additional_items;
        }

        Ok(SchemaNode::Rules(Box::new(rules)))
    }

    fn compile_properties(
        &self,
        value: &Value,
        path: &str,
    ) -> Result<Vec<(String, SchemaNode)>, SchemaError> {
        let props: &Map<String, Value> = value
            .as_object()
            .ok_or_else(|| SchemaError::malformed(path, "expected an object of schemas"))?;

        props
            .iter()
            .map(|(name, prop)| -> Result<(String, SchemaNode), SchemaError> {
                let node = self.compile_node(prop, &format!("{}/{}", path, name))?;
                Ok((name.clone(), node))
            })
            .collect()
    }

    fn compile_items(&self, value: &Value, path: &str) -> Result<ItemsRule, SchemaError> {
        match value {
            Value::Array(items) => {
                let prefix = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.compile_node(item, &format!("{}/{}", path, i)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ItemsRule::Tuple {
                    prefix,
                    additional: None,
                })
            }
            other => Ok(ItemsRule::Single(self.compile_node(other, path)?)),
        }
    }

    fn compile_subschemas(&self, value: &Value, path: &str) -> Result<Vec<SchemaNode>, SchemaError> {
        let subschemas = expect_array(value, path)?;
        if subschemas.is_empty() {
            return Err(SchemaError::malformed(path, "must contain at least one schema"));
        }
        subschemas
            .iter()
            .enumerate()
            .map(|(i, sub)| self.compile_node(sub, &format!("{}/{}", path, i)))
            .collect()
    }
}

fn parse_types(value: &Value, path: &str) -> Result<Vec<SchemaType>, SchemaError> {
    let parse_one = |entry: &Value| -> Result<SchemaType, SchemaError> {
        let name = entry
            .as_str()
            .ok_or_else(|| SchemaError::malformed(path, "type names must be strings"))?;
        SchemaType::parse(name)
            .ok_or_else(|| SchemaError::malformed(path, format!("unknown type '{}'", name)))
    };

    match value {
        Value::String(_) => Ok(vec![parse_one(value)?]),
        Value::Array(entries) if !entries.is_empty() => entries.iter().map(parse_one).collect(),
        Value::Array(_) => Err(SchemaError::malformed(path, "type list must not be empty")),
        _ => Err(SchemaError::malformed(path, "expected a string or array of strings")),
    }
}

fn parse_required(value: &Value, path: &str) -> Result<Vec<String>, SchemaError> {
    expect_array(value, path)?
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::malformed(path, "required entries must be strings"))
        })
        .collect()
}

fn compile_pattern(value: &Value, path: &str) -> Result<Regex, SchemaError> {
    let source = value
        .as_str()
        .ok_or_else(|| SchemaError::malformed(path, "expected a regular expression string"))?;
    Regex::new(source)
        .map_err(|e| SchemaError::malformed(path, format!("invalid regular expression: {}", e)))
}

fn expect_bool(value: &Value, path: &str) -> Result<bool, SchemaError> {
    value
        .as_bool()
        .ok_or_else(|| SchemaError::malformed(path, "expected a boolean"))
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::malformed(path, "expected an array"))
}

fn expect_number(value: &Value, path: &str) -> Result<f64, SchemaError> {
    value
        .as_f64()
        .ok_or_else(|| SchemaError::malformed(path, "expected a number"))
}

fn expect_count(value: &Value, path: &str) -> Result<usize, SchemaError> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).map_err(|_| SchemaError::malformed(path, "value too large"));
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(f as usize),
        _ => Err(SchemaError::malformed(path, "expected a non-negative integer")),
    }
}

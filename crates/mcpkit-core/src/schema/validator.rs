//! Input validation against a compiled schema

use super::error::{ValidationError, ValidationIssue};
use super::node::{ItemsRule, NodeRules, SchemaNode, value_type_name, values_equal};
use serde_json::{Map, Value};

/// Floating point slack for `multipleOf`
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// Checks tool inputs against a compiled JSON Schema
///
/// Built once per tool by [`SchemaCompiler`](super::SchemaCompiler); checking
/// never modifies the input.
#[derive(Debug, Clone)]
pub struct InputValidator {
    root: SchemaNode,
    source: Value,
}

impl InputValidator {
    pub(crate) fn new(root: SchemaNode, source: Value) -> Self {
        Self { root, source }
    }

    /// The schema document this validator was compiled from
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// Validate `value`, reporting every violation found
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        check(&self.root, value, "$", &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        matches_node(&self.root, value)
    }
}

fn matches_node(node: &SchemaNode, value: &Value) -> bool {
    let mut scratch = Vec::new();
    check(node, value, "$", &mut scratch);
    scratch.is_empty()
}

fn push(issues: &mut Vec<ValidationIssue>, path: &str, message: impl Into<String>) {
    issues.push(ValidationIssue {
        path: path.to_string(),
        message: message.into(),
    });
}

fn check(node: &SchemaNode, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    match node {
        SchemaNode::Always => {}
        SchemaNode::Never => push(issues, path, "no value is allowed here"),
        SchemaNode::Rules(rules) => check_rules(rules, value, path, issues),
    }
}

fn check_rules(rules: &NodeRules, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    if rules.nullable && value.is_null() {
        return;
    }

    if let Some(types) = &rules.types {
        if !types.iter().any(|t| t.matches(value)) {
            let expected = types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(" or ");
            push(
                issues,
                path,
                format!("expected {}, got {}", expected, value_type_name(value)),
            );
            // type-specific keywords would only add noise
            return;
        }
    }

    if let Some(expected) = &rules.const_value {
        if !values_equal(expected, value) {
            push(issues, path, format!("expected constant {}", expected));
        }
    }

    if let Some(allowed) = &rules.enum_values {
        if !allowed.iter().any(|candidate| values_equal(candidate, value)) {
            let rendered = allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            push(issues, path, format!("value must be one of [{}]", rendered));
        }
    }

    match value {
        Value::Object(map) => check_object(rules, map, path, issues),
        Value::Array(items) => check_array(rules, items, path, issues),
        Value::String(s) => check_string(rules, s, path, issues),
        Value::Number(n) => {
            if let Some(n) = n.as_f64() {
                check_number(rules, n, path, issues);
            }
        }
        Value::Null | Value::Bool(_) => {}
    }

    check_combinators(rules, value, path, issues);
}

fn check_object(
    rules: &NodeRules,
    map: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for key in &rules.required {
        if !map.contains_key(key) {
            push(issues, path, format!("missing required property '{}'", key));
        }
    }

    for (key, child) in map {
        let child_path = format!("{}.{}", path, key);
        match rules.properties.iter().find(|(name, _)| name == key) {
            Some((_, schema)) => check(schema, child, &child_path, issues),
            None => match &rules.additional_properties {
                None | Some(SchemaNode::Always) => {}
                Some(SchemaNode::Never) => {
                    push(issues, path, format!("unknown property '{}' is not allowed", key))
                }
                Some(schema) => check(schema, child, &child_path, issues),
            },
        }
    }

    if let Some(min) = rules.min_properties {
        if map.len() < min {
            push(issues, path, format!("expected at least {} properties, got {}", min, map.len()));
        }
    }
    if let Some(max) = rules.max_properties {
        if map.len() > max {
            push(issues, path, format!("expected at most {} properties, got {}", max, map.len()));
        }
    }
}

fn check_array(rules: &NodeRules, items: &[Value], path: &str, issues: &mut Vec<ValidationIssue>) {
    match &rules.items {
        Some(ItemsRule::Single(schema)) => {
            for (i, item) in items.iter().enumerate() {
                check(schema, item, &format!("{}[{}]", path, i), issues);
            }
        }
        Some(ItemsRule::Tuple { prefix, additional }) => {
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                match (prefix.get(i), additional) {
                    (Some(schema), _) => check(schema, item, &item_path, issues),
                    (None, Some(SchemaNode::Never)) => {
                        push(
                            issues,
                            path,
                            format!("expected at most {} items, got {}", prefix.len(), items.len()),
                        );
                        break;
                    }
                    (None, Some(schema)) => check(schema, item, &item_path, issues),
                    (None, None) => {}
                }
            }
        }
        None => {}
    }

    if let Some(min) = rules.min_items {
        if items.len() < min {
            push(issues, path, format!("expected at least {} items, got {}", min, items.len()));
        }
    }
    if let Some(max) = rules.max_items {
        if items.len() > max {
            push(issues, path, format!("expected at most {} items, got {}", max, items.len()));
        }
    }

    if rules.unique_items {
        let duplicate = items
            .iter()
            .enumerate()
            .any(|(i, a)| items[i + 1..].iter().any(|b| values_equal(a, b)));
        if duplicate {
            push(issues, path, "array items must be unique");
        }
    }
}

fn check_string(rules: &NodeRules, s: &str, path: &str, issues: &mut Vec<ValidationIssue>) {
    let len = s.chars().count();
    if let Some(min) = rules.min_length {
        if len < min {
            push(issues, path, format!("expected at least {} characters, got {}", min, len));
        }
    }
    if let Some(max) = rules.max_length {
        if len > max {
            push(issues, path, format!("expected at most {} characters, got {}", max, len));
        }
    }
    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(s) {
            push(issues, path, format!("does not match pattern '{}'", pattern.as_str()));
        }
    }
}

fn check_number(rules: &NodeRules, n: f64, path: &str, issues: &mut Vec<ValidationIssue>) {
    if let Some(min) = rules.minimum {
        if n < min {
            push(issues, path, format!("must be >= {}", min));
        }
    }
    if let Some(max) = rules.maximum {
        if n > max {
            push(issues, path, format!("must be <= {}", max));
        }
    }
    if let Some(min) = rules.exclusive_minimum {
        if n <= min {
            push(issues, path, format!("must be > {}", min));
        }
    }
    if let Some(max) = rules.exclusive_maximum {
        if n >= max {
            push(issues, path, format!("must be < {}", max));
        }
    }
    if let Some(divisor) = rules.multiple_of {
        let quotient = n / divisor;
        let rounded = quotient.round();
        let off_grid = (quotient - rounded).abs() > MULTIPLE_OF_EPSILON * quotient.abs().max(1.0);
        if off_grid || (rounded == 0.0 && n != 0.0) {
            push(issues, path, format!("must be a multiple of {}", divisor));
        }
    }
}

fn check_combinators(rules: &NodeRules, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    for schema in &rules.all_of {
        check(schema, value, path, issues);
    }

    if !rules.any_of.is_empty() && !rules.any_of.iter().any(|s| matches_node(s, value)) {
        push(
            issues,
            path,
            format!("does not match any of the {} allowed schemas", rules.any_of.len()),
        );
    }

    if !rules.one_of.is_empty() {
        let matched = rules.one_of.iter().filter(|s| matches_node(s, value)).count();
        match matched {
            1 => {}
            0 => push(
                issues,
                path,
                format!("does not match any of the {} allowed schemas", rules.one_of.len()),
            ),
            n => push(issues, path, format!("matches {} schemas, expected exactly one", n)),
        }
    }

    if let Some(schema) = &rules.not {
        if matches_node(schema, value) {
            push(issues, path, "matches a schema it must not match");
        }
    }
}

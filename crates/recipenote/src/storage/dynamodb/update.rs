//! Dynamic update-expression builder.
//!
//! Builds partial-update `SET` expressions from an arbitrary collection of
//! field changes. Every attribute name is aliased (`#fN`) and every value
//! bound as a placeholder (`:vN`), so field names are never interpolated
//! into the expression string and cannot collide with reserved words or
//! expression syntax. The `updatedAt` stamp is always refreshed, even for
//! an empty change set. Fields not named are left completely untouched.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};

/// A rendered update operation: the expression string plus its name and
/// value substitution maps.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Accumulates field changes for a partial update.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    sets: Vec<(String, AttributeValue)>,
    counters: Vec<String>,
}

impl UpdateBuilder {
    /// Start an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`.
    pub fn set(mut self, field: impl Into<String>, value: AttributeValue) -> Self {
        self.sets.push((field.into(), value));
        self
    }

    /// Set `field` only when `value` is present.
    pub fn set_opt(self, field: impl Into<String>, value: Option<AttributeValue>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    /// Increment `field` by one, treating a missing attribute as zero.
    pub fn increment(mut self, field: impl Into<String>) -> Self {
        self.counters.push(field.into());
        self
    }

    /// Render the expression, refreshing `updatedAt` with `now`.
    pub fn build(self, now: DateTime<Utc>) -> UpdateExpression {
        let mut clauses = Vec::with_capacity(self.sets.len() + self.counters.len() + 1);
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        let mut index = 0usize;
        for (field, value) in self.sets {
            let name = format!("#f{index}");
            let placeholder = format!(":v{index}");
            clauses.push(format!("{name} = {placeholder}"));
            names.insert(name, field);
            values.insert(placeholder, value);
            index += 1;
        }

        if !self.counters.is_empty() {
            values.insert(":zero".to_string(), AttributeValue::N("0".to_string()));
            values.insert(":one".to_string(), AttributeValue::N("1".to_string()));
            for field in self.counters {
                let name = format!("#f{index}");
                clauses.push(format!("{name} = if_not_exists({name}, :zero) + :one"));
                names.insert(name, field);
                index += 1;
            }
        }

        clauses.push("#updatedAt = :updatedAt".to_string());
        names.insert("#updatedAt".to_string(), "updatedAt".to_string());
        values.insert(
            ":updatedAt".to_string(),
            AttributeValue::S(now.to_rfc3339()),
        );

        UpdateExpression {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn empty_change_set_still_refreshes_updated_at() {
        let update = UpdateBuilder::new().build(now());

        assert_eq!(update.expression, "SET #updatedAt = :updatedAt");
        assert_eq!(update.names.get("#updatedAt").unwrap(), "updatedAt");
        assert_eq!(
            update.values.get(":updatedAt").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn fields_are_aliased_in_order() {
        let update = UpdateBuilder::new()
            .set("title", AttributeValue::S("Stew".to_string()))
            .set("category", AttributeValue::S("Korean".to_string()))
            .build(now());

        assert_eq!(
            update.expression,
            "SET #f0 = :v0, #f1 = :v1, #updatedAt = :updatedAt"
        );
        assert_eq!(update.names.get("#f0").unwrap(), "title");
        assert_eq!(update.names.get("#f1").unwrap(), "category");
        assert_eq!(update.values.get(":v0").unwrap().as_s().unwrap(), "Stew");
    }

    #[test]
    fn raw_field_names_never_reach_the_expression() {
        // "name" is a DynamoDB reserved word; hostile names carry expression
        // syntax outright. Both must only ever appear as alias targets.
        let update = UpdateBuilder::new()
            .set("name", AttributeValue::S("Alice".to_string()))
            .set("a = :a REMOVE PK", AttributeValue::S("x".to_string()))
            .build(now());

        assert!(!update.expression.contains("name"));
        assert!(!update.expression.contains("REMOVE"));
        assert_eq!(update.names.get("#f1").unwrap(), "a = :a REMOVE PK");
    }

    #[test]
    fn counter_renders_if_not_exists_arithmetic() {
        let update = UpdateBuilder::new()
            .set("title", AttributeValue::S("Stew".to_string()))
            .increment("version")
            .build(now());

        assert_eq!(
            update.expression,
            "SET #f0 = :v0, #f1 = if_not_exists(#f1, :zero) + :one, #updatedAt = :updatedAt"
        );
        assert_eq!(update.names.get("#f1").unwrap(), "version");
        assert_eq!(update.values.get(":zero").unwrap().as_n().unwrap(), "0");
        assert_eq!(update.values.get(":one").unwrap().as_n().unwrap(), "1");
    }

    #[test]
    fn set_opt_skips_absent_values() {
        let update = UpdateBuilder::new()
            .set_opt("title", None)
            .set_opt("category", Some(AttributeValue::S("Korean".to_string())))
            .build(now());

        assert_eq!(update.expression, "SET #f0 = :v0, #updatedAt = :updatedAt");
        assert_eq!(update.names.get("#f0").unwrap(), "category");
    }
}

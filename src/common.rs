//! Common utilities for DynamoDB operations.
//!
//! This module provides shared types used across read and write operations,
//! including records, key handling, and expression building.

/// Key types for identifying items in DynamoDB tables.
pub mod key;

use aws_sdk_dynamodb::types;
use serde_json::{Map, Value};
use std::collections;

/// A schemaless item: field name to JSON value.
pub type Record = Map<String, Value>;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        match names {
            Some(existing) => existing.extend(self.expression_attribute_names),
            None => *names = Some(self.expression_attribute_names),
        }
        match values {
            Some(existing) => existing.extend(self.expression_attribute_values),
            None => *values = Some(self.expression_attribute_values),
        }
        self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn input(expression: &str, name: &str, value: &str) -> ExpressionInput {
        ExpressionInput {
            expression: expression.to_string(),
            expression_attribute_names: collections::HashMap::from([(
                format!("#{name}"),
                name.to_string(),
            )]),
            expression_attribute_values: collections::HashMap::from([(
                format!(":{name}"),
                types::AttributeValue::S(value.to_string()),
            )]),
        }
    }

    #[rstest]
    #[case::empty(vec![], "")]
    #[case::single(vec![input("#a = :a", "a", "x")], "#a = :a")]
    #[case::many(
        vec![
            input("#a = :a", "a", "x"),
            input("#b = :b", "b", "y"),
            input("#c = :c", "c", "z"),
        ],
        "#a = :a, #b = :b, #c = :c"
    )]
    fn test_merge_joins_without_trailing_separator(
        #[case] items: Vec<ExpressionInput>,
        #[case] expected: &str,
    ) {
        let count = items.len();
        let merged = ExpressionInput::merge(", ", items);
        assert_eq!(merged.expression, expected);
        assert_eq!(merged.expression_attribute_names.len(), count);
        assert_eq!(merged.expression_attribute_values.len(), count);
    }

    #[test]
    fn test_merge_into_extends_existing_bindings() {
        let mut names = Some(collections::HashMap::from([(
            "#z".to_string(),
            "z".to_string(),
        )]));
        let mut values = None;
        let expression = input("#a = :a", "a", "x").merge_into(&mut names, &mut values);
        assert_eq!(expression, "#a = :a");
        assert_eq!(names.map(|names| names.len()), Some(2));
        assert_eq!(values.map(|values| values.len()), Some(1));
    }
}

use crate::{common, error::EmptySetClause, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Prefix shared by the name (`#set0`) and value (`:set0`) placeholders.
const SET_PLACEHOLDER: &str = "set";

/// Partial update: assign each listed attribute a new value, leave the rest untouched.
///
/// Attribute names never appear in the rendered expression; each assignment gets
/// its own positional name and value placeholder, so reserved words and names with
/// punctuation are safe.
///
/// ```rust
/// use bookshelf_crud::write::update_item::SetClause;
///
/// let clause = SetClause::try_from_fields([("title".to_string(), "Dune Messiah")]).unwrap();
/// assert_eq!(clause.assignments().len(), 1);
/// assert!(SetClause::<String>::try_from_fields([]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SetClause<T> {
    assignments: Vec<(String, T)>,
}

impl<T> SetClause<T> {
    /// Build a clause from `(attribute, value)` pairs; at least one is required.
    pub fn try_from_fields<I>(fields: I) -> Result<Self, EmptySetClause>
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let assignments: Vec<(String, T)> = fields.into_iter().collect();
        if assignments.is_empty() {
            return Err(EmptySetClause);
        }
        Ok(Self { assignments })
    }

    /// The `(attribute, value)` pairs, in input order.
    pub fn assignments(&self) -> &[(String, T)] {
        &self.assignments
    }

    /// Consume the clause, yielding its `(attribute, value)` pairs.
    pub fn into_assignments(self) -> Vec<(String, T)> {
        self.assignments
    }
}

impl<T: Serialize> TryFrom<SetClause<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(set_clause: SetClause<T>) -> Result<Self> {
        let mut operations = Vec::with_capacity(set_clause.assignments.len());
        for (index, (name, value)) in set_clause.assignments.into_iter().enumerate() {
            let name_placeholder = format!("#{SET_PLACEHOLDER}{index}");
            let value_placeholder = format!(":{SET_PLACEHOLDER}{index}");
            let value = to_attribute_value(value)?;
            let expression = format!("{name_placeholder} = {value_placeholder}");
            let operation = common::ExpressionInput {
                expression,
                expression_attribute_names: collections::HashMap::from([(
                    name_placeholder,
                    name,
                )]),
                expression_attribute_values: collections::HashMap::from([(
                    value_placeholder,
                    value,
                )]),
            };
            operations.push(operation);
        }
        let mut operation = common::ExpressionInput::merge(", ", operations);
        operation.expression = format!("SET {}", operation.expression);
        Ok(operation)
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use bookshelf_crud::{common, write};
/// use serde_json::{Value, json};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "book_id".to_string(),
///             value: Value::String("b1".to_string()),
///         },
///         ..Default::default()
///     },
///     set_clause: write::update_item::SetClause::try_from_fields([
///         ("title".to_string(), json!("Dune Messiah")),
///     ])?,
///     write_args: write::common::WriteArgs {
///         return_values: Some(types::ReturnValue::UpdatedNew),
///         table_name: "Books".to_string(),
///     },
/// };
/// // Sends "SET #set0 = :set0" with #set0 -> title.
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub keys: common::key::Keys<T>,
    /// The attributes to assign.
    pub set_clause: SetClause<T>,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let keys = update_item.keys.try_into()?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let operation = update_item.set_clause.try_into()?;
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            keys,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> UpdateItem<T> {
    /// Execute the update item operation.
    #[tracing::instrument(name = "bookshelf_crud.update_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.keys))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::single(
        vec![
            ("title".to_string(), json!("Dune Messiah")),
        ],
        common::ExpressionInput {
            expression: "SET #set0 = :set0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "title".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "Dune Messiah".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::many(
        vec![
            ("title".to_string(), json!("Dune")),
            ("pages".to_string(), json!(412)),
            ("tags".to_string(), json!(["scifi"])),
        ],
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1, #set2 = :set2".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "title".to_string()),
                    ("#set1".to_string(), "pages".to_string()),
                    ("#set2".to_string(), "tags".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "Dune".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::N(
                            "412".to_string()
                        )
                    ),
                    (
                        ":set2".to_string(),
                        types::AttributeValue::L(
                            vec![
                                types::AttributeValue::S(
                                    "scifi".to_string()
                                ),
                            ]
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::reserved_word_and_punctuation(
        vec![
            ("name".to_string(), json!("x")),
            ("first-edition".to_string(), json!(true)),
        ],
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "name".to_string()),
                    ("#set1".to_string(), "first-edition".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "x".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::Bool(true)
                    ),
                ]
            ),
        }
    )]
    fn test_set_clause(
        #[case] fields: Vec<(String, Value)>,
        #[case] expected: common::ExpressionInput,
    ) {
        let set_clause = SetClause::try_from_fields(fields).unwrap();
        let actual: common::ExpressionInput = set_clause.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_set_clause_rejects_empty_fields() {
        let actual = SetClause::<Value>::try_from_fields(Vec::new());
        assert_eq!(actual, Err(EmptySetClause));
    }

    #[test]
    fn test_placeholders_are_distinct_per_field() {
        let fields: Vec<(String, Value)> = (0..25)
            .map(|index| (format!("field{index}"), json!(index)))
            .collect();
        let set_clause = SetClause::try_from_fields(fields).unwrap();
        let actual: common::ExpressionInput = set_clause.try_into().unwrap();
        assert_eq!(actual.expression_attribute_names.len(), 25);
        assert_eq!(actual.expression_attribute_values.len(), 25);
        assert!(!actual.expression.ends_with(','));
    }

    #[test]
    fn test_update_item() {
        let update_item = UpdateItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "book_id".to_string(),
                    value: json!("b1"),
                },
                ..Default::default()
            },
            set_clause: SetClause::try_from_fields([("title".to_string(), json!("Dune Messiah"))])
                .unwrap(),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::UpdatedNew),
                table_name: "Books".to_string(),
            },
        };
        let expected = UpdateItemInput {
            keys: collections::HashMap::from([(
                "book_id".to_string(),
                types::AttributeValue::S("b1".to_string()),
            )]),
            update_expression: "SET #set0 = :set0".to_string(),
            write_operation: write::common::WriteInput {
                expression_attribute_names: Some(collections::HashMap::from([(
                    "#set0".to_string(),
                    "title".to_string(),
                )])),
                expression_attribute_values: Some(collections::HashMap::from([(
                    ":set0".to_string(),
                    types::AttributeValue::S("Dune Messiah".to_string()),
                )])),
                return_values: Some(types::ReturnValue::UpdatedNew),
                table_name: "Books".to_string(),
            },
        };
        let actual: UpdateItemInput = update_item.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}

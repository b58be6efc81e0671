use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// Ask for `ReturnValue::AllOld` to learn whether anything was actually removed:
/// DynamoDB answers a delete of an absent key with the same success status.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use bookshelf_crud::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "book_id".to_string(),
///             value: "b1".to_string(),
///         },
///         ..Default::default()
///     },
///     write_args: write::common::WriteArgs {
///         return_values: Some(types::ReturnValue::AllOld),
///         table_name: "Books".to_string(),
///     },
/// };
/// let output = delete_item.send(client).await?;
/// let existed = output.attributes().is_some_and(|attributes| !attributes.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct DeleteItem<T> {
    /// The primary key of the item to delete.
    pub keys: common::key::Keys<T>,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<DeleteItem<T>> for DeleteItemInput {
    type Error = Error;

    fn try_from(delete_item: DeleteItem<T>) -> Result<Self> {
        let keys = delete_item.keys.try_into()?;
        let operation = Self {
            keys,
            write_operation: delete_item.write_args.into(),
        };
        Ok(operation)
    }
}

impl<T: Serialize> DeleteItem<T> {
    /// Execute the delete item operation.
    #[tracing::instrument(name = "bookshelf_crud.delete_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.delete_item().set_key(Some(delete_item.keys));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::single_key(
        DeleteItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "book_id".to_string(),
                    value: Value::String(
                        "b1".to_string()
                    ),
                },
                ..Default::default()
            },
            write_args: write::common::WriteArgs {
                table_name: "Books".to_string(),
                ..Default::default()
            },
        },
        DeleteItemInput {
            keys: collections::HashMap::from(
                [
                    (
                        "book_id".to_string(),
                        types::AttributeValue::S(
                            "b1".to_string()
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                table_name: "Books".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::composite_key_all_old(
        DeleteItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "review_id".to_string(),
                    value: Value::String(
                        "r1".to_string()
                    ),
                },
                sort_key: Some(
                    common::key::Key {
                        name: "book_id".to_string(),
                        value: Value::String(
                            "b1".to_string()
                        ),
                    }
                ),
            },
            write_args: write::common::WriteArgs {
                return_values: Some(
                    types::ReturnValue::AllOld
                ),
                table_name: "Reviews".to_string(),
            },
        },
        DeleteItemInput {
            keys: collections::HashMap::from(
                [
                    (
                        "review_id".to_string(),
                        types::AttributeValue::S(
                            "r1".to_string()
                        )
                    ),
                    (
                        "book_id".to_string(),
                        types::AttributeValue::S(
                            "b1".to_string()
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                return_values: Some(
                    types::ReturnValue::AllOld
                ),
                table_name: "Reviews".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_delete_item(#[case] args: DeleteItem<Value>, #[case] expected: DeleteItemInput) {
        let actual: DeleteItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}

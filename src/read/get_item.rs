use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    single_read_operation: read::common::SingleReadInput,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf_crud::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "review_id".to_string(),
///             value: "r1".to_string(),
///         },
///         sort_key: Some(common::key::Key {
///             name: "book_id".to_string(),
///             value: "b1".to_string(),
///         }),
///     },
///     single_read_args: read::common::SingleReadArgs {
///         table_name: "Reviews".to_string(),
///         ..Default::default()
///     },
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<T> {
    /// The primary key of the item to retrieve.
    pub keys: common::key::Keys<T>,
    /// Additional read operation arguments (table name, consistent read).
    pub single_read_args: read::common::SingleReadArgs,
}

impl<T: Serialize> TryFrom<GetItem<T>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<T>) -> Result<Self> {
        let keys = get_item.keys.try_into()?;
        let operation = Self {
            keys,
            single_read_operation: get_item.single_read_args.into(),
        };
        Ok(operation)
    }
}

impl<T: Serialize> GetItem<T> {
    /// Execute the get item operation.
    #[tracing::instrument(name = "bookshelf_crud.get_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.get_item().set_key(Some(get_item.keys));
        crate::apply_single_read_operation!(builder, get_item.single_read_operation)
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
        GetItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "book_id".to_string(),
                    value: Value::String(
                        "b1".to_string()
                    ),
                },
                ..Default::default()
            },
            single_read_args: read::common::SingleReadArgs {
                table_name: "Books".to_string(),
                ..Default::default()
            },
        },
        GetItemInput {
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
            single_read_operation: read::common::SingleReadInput {
                table_name: "Books".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::composite_key_consistent(
        GetItem {
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
            single_read_args: read::common::SingleReadArgs {
                consistent_read: Some(true),
                table_name: "Reviews".to_string(),
            },
        },
        GetItemInput {
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
            single_read_operation: read::common::SingleReadInput {
                consistent_read: Some(true),
                table_name: "Reviews".to_string(),
            },
        }
    )]
    fn test_get_item(#[case] args: GetItem<Value>, #[case] expected: GetItemInput) {
        let actual: GetItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}

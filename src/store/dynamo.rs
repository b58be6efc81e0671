use crate::{
    common::{Record, key::Keys},
    error::StoreError,
    read, write,
    write::update_item::SetClause,
};

use super::{DeleteOutcome, Store};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types};
use serde_dynamo::from_item;
use serde_json::Value;

/// [`Store`] over an `aws_sdk_dynamodb::Client`.
///
/// The client is cheap to clone and safe to share across concurrent requests.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    consistent_read: Option<bool>,
}

impl DynamoStore {
    /// Wrap a configured client. Reads are eventually consistent.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            consistent_read: None,
        }
    }

    /// Choose strongly (`true`) or eventually (`false`) consistent reads for get and scan.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = Some(consistent_read);
        self
    }
}

#[async_trait]
impl Store for DynamoStore {
    async fn put(&self, table: &str, item: Record) -> Result<(), StoreError> {
        let put_item = write::put_item::PutItem {
            item,
            write_args: write::common::WriteArgs {
                table_name: table.to_string(),
                ..Default::default()
            },
        };
        put_item.send(&self.client).await?;
        Ok(())
    }

    async fn get(&self, table: &str, keys: Keys<Value>) -> Result<Option<Record>, StoreError> {
        let get_item = read::get_item::GetItem {
            keys,
            single_read_args: read::common::SingleReadArgs {
                consistent_read: self.consistent_read,
                table_name: table.to_string(),
            },
        };
        let output = get_item.send(&self.client).await?;
        let record: Option<Record> = output.item.map(from_item).transpose()?;
        Ok(record)
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let scan = read::scan::Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: self.consistent_read,
                table_name: table.to_string(),
                ..Default::default()
            },
        };
        let output = scan.send(&self.client).await?;
        let mut records = Vec::new();
        for item in output.items.unwrap_or_default() {
            let record: Record = from_item(item)?;
            records.push(record);
        }
        Ok(records)
    }

    async fn update(
        &self,
        table: &str,
        keys: Keys<Value>,
        set_clause: SetClause<Value>,
    ) -> Result<Record, StoreError> {
        let update_item = write::update_item::UpdateItem {
            keys,
            set_clause,
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::UpdatedNew),
                table_name: table.to_string(),
            },
        };
        let output = update_item.send(&self.client).await?;
        let attributes: Option<Record> = output.attributes.map(from_item).transpose()?;
        Ok(attributes.unwrap_or_default())
    }

    async fn delete(&self, table: &str, keys: Keys<Value>) -> Result<DeleteOutcome, StoreError> {
        let delete_item = write::delete_item::DeleteItem {
            keys,
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllOld),
                table_name: table.to_string(),
            },
        };
        let output = delete_item.send(&self.client).await?;
        let existed = output
            .attributes
            .is_some_and(|attributes| !attributes.is_empty());
        if existed {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Absent)
        }
    }
}

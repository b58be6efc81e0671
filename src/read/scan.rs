use crate::read;

use aws_sdk_dynamodb::{Client, error, operation};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Scan operation.
///
/// Follows `LastEvaluatedKey` until the table is exhausted and returns every
/// item in a single output. Unbounded: only suitable for small tables.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf_crud::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "Books".to_string(),
///         ..Default::default()
///     },
/// };
/// let output = scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Additional read operation arguments (table name, consistent read, page size).
    pub multiple_read_args: read::common::MultipleReadArgs,
}

impl From<Scan> for ScanInput {
    fn from(scan: Scan) -> Self {
        Self {
            multiple_read_operation: scan.multiple_read_args.into(),
        }
    }
}

impl Scan {
    /// Execute the scan operation.
    #[tracing::instrument(name = "bookshelf_crud.scan", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.into();
        let builder = client.scan();
        let mut paginator =
            crate::apply_multiple_read_operation!(builder, scan.multiple_read_operation)
                .into_paginator()
                .send();
        crate::get_paginated_output!(paginator, operation::scan::ScanOutput)
    }
}

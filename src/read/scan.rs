use crate::{client, common, error::Result, read};

use aws_sdk_dynamodb::operation;
use indexmap::IndexMap;
use serde::Serialize;

/// Optional inputs of a listing.
///
/// ```rust
/// use dynamodb_service::ListOptions;
/// use indexmap::IndexMap;
///
/// let options = ListOptions {
///     filters: IndexMap::from([("status".to_string(), "active")]),
///     limit: Some(25),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ListOptions<T> {
    /// Equality filters on non-key attributes, all of which must hold.
    ///
    /// Filtering happens after the read: it reduces what is returned, not what is scanned.
    pub filters: IndexMap<String, T>,
    /// The maximum number of items to return.
    ///
    /// Also used as the page size of every scan request.
    pub limit: Option<i32>,
    /// Resume after this position, as returned by a previous page.
    pub exclusive_start_key: Option<read::common::ContinuationToken>,
}

impl<T> Default for ListOptions<T> {
    fn default() -> Self {
        Self {
            filters: IndexMap::new(),
            limit: None,
            exclusive_start_key: None,
        }
    }
}

/// scan operation
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Scan<T> {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) options: ListOptions<T>,
    pub(crate) table_name: String,
}

impl<T: Serialize> TryFrom<Scan<T>> for operation::scan::ScanInput {
    type Error = crate::Error;

    fn try_from(scan: Scan<T>) -> Result<Self> {
        let conditions = common::condition::KeyCondition::all_equal(scan.options.filters);
        let filter = common::condition::KeyCondition::get_expression_input(conditions)?;
        let (filter_expression, expression_attribute_names, expression_attribute_values) =
            filter.into_parts();
        let input = Self::builder()
            .table_name(scan.table_name)
            .set_filter_expression(filter_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values)
            .set_limit(scan.options.limit)
            .set_exclusive_start_key(scan.options.exclusive_start_key)
            .set_consistent_read(scan.consistent_read)
            .build()?;
        Ok(input)
    }
}

async fn send_page<C: client::DynamoClient + ?Sized>(
    client: &C,
    input: operation::scan::ScanInput,
) -> Result<read::common::RawPage> {
    let output = client.scan(input).await?;
    Ok(read::common::RawPage::new(
        output.items,
        output.last_evaluated_key,
    ))
}

impl<T: Serialize> Scan<T> {
    /// Execute a single scan request; a non-positive limit yields an empty last page.
    pub(crate) async fn send_page<C: client::DynamoClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<read::common::RawPage> {
        let input: operation::scan::ScanInput = self.try_into()?;
        if read::common::is_empty_limit(input.limit) {
            return Ok(read::common::RawPage::default());
        }
        send_page(client, input).await
    }

    /// Follow continuation keys until the table is exhausted or `limit` items are collected.
    pub(crate) async fn send<C: client::DynamoClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<Vec<common::RawItem>> {
        let mut input: operation::scan::ScanInput = self.try_into()?;
        if read::common::is_empty_limit(input.limit) {
            return Ok(Vec::new());
        }
        let limit = input
            .limit
            .map(|limit| usize::try_from(limit).unwrap_or_default());
        let mut items = Vec::new();
        loop {
            let page = send_page(client, input.clone()).await?;
            items.extend(page.items);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                collected = items.len(),
                has_more = page.last_evaluated_key.is_some(),
                "scanned page"
            );
            if let Some(limit) = limit {
                if items.len() >= limit {
                    items.truncate(limit);
                    break;
                }
            }
            match page.last_evaluated_key {
                Some(last_evaluated_key) => input.exclusive_start_key = Some(last_evaluated_key),
                None => break,
            }
        }
        Ok(items)
    }
}

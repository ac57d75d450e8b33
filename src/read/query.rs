use crate::{client, common, error::Result, read, read::common::Order};

use aws_sdk_dynamodb::operation;
use serde::Serialize;

/// Optional inputs of a query.
///
/// ```rust
/// use dynamodb_service::{Order, QueryOptions};
///
/// let options = QueryOptions {
///     index_name: Some("by_email".to_string()),
///     order: Order::Descending,
///     limit: Some(10),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Query a declared secondary index instead of the table.
    pub index_name: Option<String>,
    /// Order of the range key values; ascending by default.
    pub order: Order,
    /// The maximum number of items to evaluate in the request.
    pub limit: Option<i32>,
    /// Resume after this position, as returned by a previous page.
    pub exclusive_start_key: Option<read::common::ContinuationToken>,
}

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Query<T> {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) hash_key: common::key::Key<T>,
    pub(crate) options: QueryOptions,
    pub(crate) range_condition: Option<common::condition::KeyCondition<T>>,
    pub(crate) table_name: String,
}

impl<T: Serialize> Query<T> {
    fn get_key_condition_expression(
        hash_key: common::key::Key<T>,
        range_condition: Option<common::condition::KeyCondition<T>>,
    ) -> Result<common::ExpressionInput> {
        let hash_key = common::condition::KeyCondition {
            condition: common::condition::Condition::Equals(hash_key.value),
            name: hash_key.name,
        };
        let mut conditions = vec![hash_key];
        if let Some(range_condition) = range_condition {
            conditions.push(range_condition);
        }
        common::condition::KeyCondition::get_expression_input(conditions)
    }
}

impl<T: Serialize> TryFrom<Query<T>> for operation::query::QueryInput {
    type Error = crate::Error;

    fn try_from(query: Query<T>) -> Result<Self> {
        let key_condition =
            Query::get_key_condition_expression(query.hash_key, query.range_condition)?;
        let (key_condition_expression, expression_attribute_names, expression_attribute_values) =
            key_condition.into_parts();
        let input = Self::builder()
            .table_name(query.table_name)
            .set_index_name(query.options.index_name)
            .set_key_condition_expression(key_condition_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values)
            .scan_index_forward(query.options.order.scan_index_forward())
            .set_limit(query.options.limit)
            .set_exclusive_start_key(query.options.exclusive_start_key)
            .set_consistent_read(query.consistent_read)
            .build()?;
        Ok(input)
    }
}

impl<T: Serialize> Query<T> {
    /// Execute a single query request; a non-positive limit yields an empty last page.
    pub(crate) async fn send<C: client::DynamoClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<read::common::RawPage> {
        let input: operation::query::QueryInput = self.try_into()?;
        if read::common::is_empty_limit(input.limit) {
            return Ok(read::common::RawPage::default());
        }
        let output = client.query(input).await?;
        Ok(read::common::RawPage::new(
            output.items,
            output.last_evaluated_key,
        ))
    }
}

//! The remote operations a [`Table`](crate::Table) consumes.
//!
//! [`DynamoClient`] takes and returns the SDK's own operation inputs and outputs, so the
//! request shaping done by this crate can be checked against any implementation, not only
//! a live [`Client`].

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, Error, operation};

/// The subset of the DynamoDB API used by a table service.
///
/// Implementations must send every populated field of the input and report failures
/// without interpreting them.
#[async_trait]
pub trait DynamoClient: Send + Sync {
    /// Fetch a single item by its full primary key.
    async fn get_item(
        &self,
        input: operation::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, Error>;

    /// Create or partially update a single item.
    async fn update_item(
        &self,
        input: operation::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, Error>;

    /// Delete a single item by its full primary key.
    async fn delete_item(
        &self,
        input: operation::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, Error>;

    /// Read one page of items matching a key condition.
    async fn query(
        &self,
        input: operation::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, Error>;

    /// Read one page of a full table scan.
    async fn scan(
        &self,
        input: operation::scan::ScanInput,
    ) -> Result<operation::scan::ScanOutput, Error>;

    /// Fetch up to 100 items by primary key in one call.
    async fn batch_get_item(
        &self,
        input: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput, Error>;
}

#[async_trait]
impl DynamoClient for Client {
    async fn get_item(
        &self,
        input: operation::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, Error> {
        Client::get_item(self)
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_consistent_read(input.consistent_read)
            .set_projection_expression(input.projection_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .send()
            .await
            .map_err(Error::from)
    }

    async fn update_item(
        &self,
        input: operation::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, Error> {
        Client::update_item(self)
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_update_expression(input.update_expression)
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values(input.return_values)
            .send()
            .await
            .map_err(Error::from)
    }

    async fn delete_item(
        &self,
        input: operation::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, Error> {
        Client::delete_item(self)
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values(input.return_values)
            .send()
            .await
            .map_err(Error::from)
    }

    async fn query(
        &self,
        input: operation::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, Error> {
        Client::query(self)
            .set_table_name(input.table_name)
            .set_index_name(input.index_name)
            .set_key_condition_expression(input.key_condition_expression)
            .set_filter_expression(input.filter_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_scan_index_forward(input.scan_index_forward)
            .set_limit(input.limit)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_consistent_read(input.consistent_read)
            .send()
            .await
            .map_err(Error::from)
    }

    async fn scan(
        &self,
        input: operation::scan::ScanInput,
    ) -> Result<operation::scan::ScanOutput, Error> {
        Client::scan(self)
            .set_table_name(input.table_name)
            .set_index_name(input.index_name)
            .set_filter_expression(input.filter_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_limit(input.limit)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_consistent_read(input.consistent_read)
            .send()
            .await
            .map_err(Error::from)
    }

    async fn batch_get_item(
        &self,
        input: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput, Error> {
        Client::batch_get_item(self)
            .set_request_items(input.request_items)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .send()
            .await
            .map_err(Error::from)
    }
}

use crate::{client, common, error::Result};

use aws_sdk_dynamodb::{operation, types};
use serde::Serialize;

/// The most keys DynamoDB accepts in one batch get request.
pub(crate) const MAX_BATCH_GET_KEYS: usize = 100;

/// Split `keys` into consecutive groups of at most `size` keys, keeping their order.
pub(crate) fn chunk_keys<K>(keys: Vec<K>, size: usize) -> Vec<Vec<K>> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(keys.len().div_ceil(size));
    let mut keys = keys.into_iter().peekable();
    while keys.peek().is_some() {
        chunks.push(keys.by_ref().take(size).collect());
    }
    chunks
}

/// batch get item operation on a single table
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct BatchGetItem<T> {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) keys: Vec<common::key::Keys<T>>,
    pub(crate) table_name: String,
}

fn get_input(
    table_name: &str,
    keys_and_attributes: types::KeysAndAttributes,
) -> Result<operation::batch_get_item::BatchGetItemInput> {
    let input = operation::batch_get_item::BatchGetItemInput::builder()
        .request_items(table_name, keys_and_attributes)
        .build()?;
    Ok(input)
}

impl<T: Serialize> BatchGetItem<T> {
    /// One request per chunk of at most [`MAX_BATCH_GET_KEYS`] keys.
    pub(crate) fn into_inputs(self) -> Result<Vec<operation::batch_get_item::BatchGetItemInput>> {
        let mut serialized_keys = Vec::with_capacity(self.keys.len());
        for key in self.keys {
            let key: common::RawItem = key.try_into()?;
            serialized_keys.push(key);
        }
        let mut inputs = Vec::new();
        for keys in chunk_keys(serialized_keys, MAX_BATCH_GET_KEYS) {
            let keys_and_attributes = types::KeysAndAttributes::builder()
                .set_keys(Some(keys))
                .set_consistent_read(self.consistent_read)
                .build()?;
            inputs.push(get_input(&self.table_name, keys_and_attributes)?);
        }
        Ok(inputs)
    }

    /// Execute the chunks one after the other.
    ///
    /// Keys DynamoDB reports as unprocessed are requested again, immediately, before moving to
    /// the next chunk. Items come back in response order; keys without an item are omitted.
    pub(crate) async fn send<C: client::DynamoClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<Vec<common::RawItem>> {
        let table_name = self.table_name.clone();
        let inputs = self.into_inputs()?;
        let mut items = Vec::new();
        for input in inputs {
            let mut next = Some(input);
            while let Some(input) = next.take() {
                let output = client.batch_get_item(input).await?;
                if let Some(found) = output
                    .responses
                    .and_then(|mut responses| responses.remove(&table_name))
                {
                    items.extend(found);
                }
                let unprocessed = output
                    .unprocessed_keys
                    .and_then(|mut unprocessed| unprocessed.remove(&table_name))
                    .filter(|unprocessed| !unprocessed.keys.is_empty());
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    collected = items.len(),
                    unprocessed = unprocessed.as_ref().map_or(0, |keys| keys.keys.len()),
                    "batch get response"
                );
                next = unprocessed
                    .map(|unprocessed| get_input(&table_name, unprocessed))
                    .transpose()?;
            }
        }
        Ok(items)
    }
}

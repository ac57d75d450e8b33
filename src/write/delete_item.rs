use crate::{client, common, error::Result};

use aws_sdk_dynamodb::operation;
use serde::Serialize;

/// delete item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct DeleteItem<T> {
    pub(crate) keys: common::key::Keys<T>,
    pub(crate) table_name: String,
}

impl<T: Serialize> TryFrom<DeleteItem<T>> for operation::delete_item::DeleteItemInput {
    type Error = crate::Error;

    fn try_from(delete_item: DeleteItem<T>) -> Result<Self> {
        let key: common::RawItem = delete_item.keys.try_into()?;
        let input = Self::builder()
            .table_name(delete_item.table_name)
            .set_key(Some(key))
            .build()?;
        Ok(input)
    }
}

impl<T: Serialize> DeleteItem<T> {
    /// Execute the delete; deleting a missing item succeeds.
    pub(crate) async fn send<C: client::DynamoClient + ?Sized>(self, client: &C) -> Result<()> {
        let input: operation::delete_item::DeleteItemInput = self.try_into()?;
        client.delete_item(input).await?;
        Ok(())
    }
}

use crate::{client, common, error::Result};

use aws_sdk_dynamodb::operation;
use serde::Serialize;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct GetItem<T> {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) keys: common::key::Keys<T>,
    pub(crate) table_name: String,
}

impl<T: Serialize> TryFrom<GetItem<T>> for operation::get_item::GetItemInput {
    type Error = crate::Error;

    fn try_from(get_item: GetItem<T>) -> Result<Self> {
        let key: common::RawItem = get_item.keys.try_into()?;
        let input = Self::builder()
            .table_name(get_item.table_name)
            .set_key(Some(key))
            .set_consistent_read(get_item.consistent_read)
            .build()?;
        Ok(input)
    }
}

impl<T: Serialize> GetItem<T> {
    /// Execute the get item operation; a missing item is `None`, not an error.
    pub(crate) async fn send<C: client::DynamoClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<Option<common::RawItem>> {
        let input: operation::get_item::GetItemInput = self.try_into()?;
        let output = client.get_item(input).await?;
        Ok(output.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::Value;
    use std::collections;

    #[rstest]
    #[case::empty(
        GetItem {
            keys: common::key::Keys {
                hash_key: common::key::Key {
                    name: "a".to_string(),
                    value: Value::String(
                        "b".to_string()
                    ),
                },
                ..Default::default()
            },
            table_name: "c".to_string(),
            ..Default::default()
        },
        operation::get_item::GetItemInput::builder()
            .table_name("c")
            .set_key(
                Some(
                    collections::HashMap::from(
                        [
                            (
                                "a".to_string(),
                                types::AttributeValue::S(
                                    "b".to_string()
                                )
                            ),
                        ]
                    )
                )
            )
            .build()
            .unwrap()
    )]
    #[case::full(
        GetItem {
            consistent_read: Some(true),
            keys: common::key::Keys {
                hash_key: common::key::Key {
                    name: "a".to_string(),
                    value: Value::String(
                        "b".to_string()
                    ),
                },
                range_key: Some(
                    common::key::Key {
                        name: "c".to_string(),
                        value: Value::Number(
                            0.into()
                        ),
                    }
                ),
            },
            table_name: "d".to_string(),
        },
        operation::get_item::GetItemInput::builder()
            .table_name("d")
            .set_key(
                Some(
                    collections::HashMap::from(
                        [
                            (
                                "a".to_string(),
                                types::AttributeValue::S(
                                    "b".to_string()
                                )
                            ),
                            (
                                "c".to_string(),
                                types::AttributeValue::N(
                                    "0".to_string()
                                )
                            ),
                        ]
                    )
                )
            )
            .consistent_read(true)
            .build()
            .unwrap()
    )]
    fn test_get_item(
        #[case] args: GetItem<Value>,
        #[case] expected: operation::get_item::GetItemInput,
    ) {
        let actual: operation::get_item::GetItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}

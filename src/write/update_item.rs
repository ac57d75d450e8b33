use crate::{client, common, error::Result};

use aws_sdk_dynamodb::{operation, types};
use std::collections;

/// Separator between the assignments of a `SET` clause.
const SET_SEPARATOR: &str = ", ";

/// Build `SET #set0 = :set0, #set1 = :set1, ...` over every attribute.
///
/// Attributes are assigned in name order so the same item always yields the same expression.
/// Placeholders are positional, so any attribute name can be written.
/// No attributes yield an empty expression.
fn get_set_expression(attributes: common::RawItem) -> common::ExpressionInput {
    let attributes: collections::BTreeMap<_, _> = attributes.into_iter().collect();
    let operations = attributes
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| {
            let placeholder = format!("#set{index}");
            let value_placeholder = format!(":set{index}");
            common::ExpressionInput {
                expression: format!("{placeholder} = {value_placeholder}"),
                expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
                expression_attribute_values: collections::HashMap::from([(
                    value_placeholder,
                    value,
                )]),
            }
        })
        .collect();
    let mut operation = common::ExpressionInput::merge(SET_SEPARATOR, operations);
    if !operation.expression.is_empty() {
        operation.expression = format!("SET {}", operation.expression);
    }
    operation
}

/// upsert of the non-key attributes of an item
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct UpdateItem {
    /// Attributes to write; must not contain the key attributes.
    pub(crate) attributes: common::RawItem,
    pub(crate) key: common::RawItem,
    pub(crate) table_name: String,
}

impl TryFrom<UpdateItem> for operation::update_item::UpdateItemInput {
    type Error = crate::Error;

    fn try_from(update_item: UpdateItem) -> Result<Self> {
        let (update_expression, expression_attribute_names, expression_attribute_values) =
            get_set_expression(update_item.attributes).into_parts();
        let input = Self::builder()
            .table_name(update_item.table_name)
            .set_key(Some(update_item.key))
            .set_update_expression(update_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values)
            .return_values(types::ReturnValue::AllNew)
            .build()?;
        Ok(input)
    }
}

impl UpdateItem {
    /// Execute the update and return the full item as it is after the write.
    pub(crate) async fn send<C: client::DynamoClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<common::RawItem> {
        let input: operation::update_item::UpdateItemInput = self.try_into()?;
        let output = client.update_item(input).await?;
        Ok(output.attributes.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn key() -> common::RawItem {
        collections::HashMap::from([
            ("a".to_string(), types::AttributeValue::S("b".to_string())),
            ("c".to_string(), types::AttributeValue::N("0".to_string())),
        ])
    }

    #[rstest]
    #[case::sorted_by_name(
        collections::HashMap::from(
            [
                (
                    "z".to_string(),
                    types::AttributeValue::Bool(true)
                ),
                (
                    "m".to_string(),
                    types::AttributeValue::S(
                        "n".to_string()
                    )
                ),
            ]
        ),
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "m".to_string()),
                    ("#set1".to_string(), "z".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "n".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::Bool(true)
                    ),
                ]
            ),
        }
    )]
    #[case::names_outside_placeholder_syntax(
        collections::HashMap::from(
            [
                (
                    "first-name".to_string(),
                    types::AttributeValue::S(
                        "Ada".to_string()
                    )
                ),
                (
                    "a.b".to_string(),
                    types::AttributeValue::N(
                        "1".to_string()
                    )
                ),
            ]
        ),
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "a.b".to_string()),
                    ("#set1".to_string(), "first-name".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::N(
                            "1".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::S(
                            "Ada".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::empty(
        collections::HashMap::new(),
        common::ExpressionInput::default()
    )]
    fn test_set_expression(
        #[case] attributes: common::RawItem,
        #[case] expected: common::ExpressionInput,
    ) {
        let actual = get_set_expression(attributes);
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::with_attributes(
        UpdateItem {
            attributes: collections::HashMap::from(
                [
                    (
                        "d".to_string(),
                        types::AttributeValue::L(
                            vec![
                                types::AttributeValue::N(
                                    "1".to_string()
                                )
                            ]
                        )
                    ),
                ]
            ),
            key: key(),
            table_name: "e".to_string(),
        },
        operation::update_item::UpdateItemInput::builder()
            .table_name("e")
            .set_key(Some(key()))
            .update_expression("SET #set0 = :set0")
            .set_expression_attribute_names(
                Some(
                    collections::HashMap::from(
                        [
                            ("#set0".to_string(), "d".to_string()),
                        ]
                    )
                )
            )
            .set_expression_attribute_values(
                Some(
                    collections::HashMap::from(
                        [
                            (
                                ":set0".to_string(),
                                types::AttributeValue::L(
                                    vec![
                                        types::AttributeValue::N(
                                            "1".to_string()
                                        )
                                    ]
                                )
                            ),
                        ]
                    )
                )
            )
            .return_values(types::ReturnValue::AllNew)
            .build()
            .unwrap()
    )]
    #[case::key_only(
        UpdateItem {
            key: key(),
            table_name: "e".to_string(),
            ..Default::default()
        },
        operation::update_item::UpdateItemInput::builder()
            .table_name("e")
            .set_key(Some(key()))
            .return_values(types::ReturnValue::AllNew)
            .build()
            .unwrap()
    )]
    fn test_update_item(
        #[case] args: UpdateItem,
        #[case] expected: operation::update_item::UpdateItemInput,
    ) {
        let actual: operation::update_item::UpdateItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}

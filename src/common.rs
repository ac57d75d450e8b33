//! Shared building blocks for DynamoDB requests.
//!
//! This module provides the pieces used across read and write operations:
//! key schemas and key values, key conditions and equality filters.

/// Key and filter conditions.
pub mod condition;

/// Key schemas and key values identifying items.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// A single item as sent to and returned by DynamoDB.
pub(crate) type RawItem = collections::HashMap<String, types::AttributeValue>;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

fn non_empty<K, V>(map: collections::HashMap<K, V>) -> Option<collections::HashMap<K, V>> {
    if map.is_empty() { None } else { Some(map) }
}

/// expression with its placeholders
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    /// Split into the optional request fields.
    ///
    /// DynamoDB rejects empty expressions and empty placeholder maps, so each part is `None`
    /// when there is nothing to send.
    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<String>,
        Option<collections::HashMap<String, String>>,
        Option<collections::HashMap<String, types::AttributeValue>>,
    ) {
        let expression = if self.expression.is_empty() {
            None
        } else {
            Some(self.expression)
        };
        (
            expression,
            non_empty(self.expression_attribute_names),
            non_empty(self.expression_attribute_values),
        )
    }
}

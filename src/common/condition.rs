use crate::{Error, common, error::Result};

use aws_sdk_dynamodb::types;
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::{cmp, collections, str::FromStr};

const AND: &str = " AND ";

/// Compare two attribute values by the natural ordering of their DynamoDB type.
///
/// Numbers compare exactly as decimals, strings lexicographically and binaries bytewise.
/// Values of different or non-key types are not comparable.
pub(crate) fn compare_attribute_values(
    left: &types::AttributeValue,
    right: &types::AttributeValue,
) -> Option<cmp::Ordering> {
    match (left, right) {
        (types::AttributeValue::N(left), types::AttributeValue::N(right)) => {
            let left = BigDecimal::from_str(left).ok()?;
            let right = BigDecimal::from_str(right).ok()?;
            Some(left.cmp(&right))
        }
        (types::AttributeValue::S(left), types::AttributeValue::S(right)) => Some(left.cmp(right)),
        (types::AttributeValue::B(left), types::AttributeValue::B(right)) => {
            Some(AsRef::<[u8]>::as_ref(left).cmp(AsRef::<[u8]>::as_ref(right)))
        }
        _ => None,
    }
}

/// Condition on a key attribute.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Condition<T> {
    /// Inclusive range; the lower bound must not exceed the upper bound.
    Between(T, T),
    Equals(T),
}

impl<T: Serialize> Condition<T> {
    fn get_expression(
        self,
        key_placeholder: &str,
        index: &mut usize,
    ) -> Result<(String, collections::HashMap<String, types::AttributeValue>)> {
        let mut expression_attribute_values = collections::HashMap::new();
        let expression = match self {
            Self::Between(start, end) => {
                let start = to_attribute_value(start)?;
                let end = to_attribute_value(end)?;
                if compare_attribute_values(&start, &end) == Some(cmp::Ordering::Greater) {
                    return Err(Error::RangeBoundsInverted { start, end });
                }
                let start_placeholder = format!(":between{index}");
                *index += 1;
                let end_placeholder = format!(":between{index}");
                *index += 1;
                let expression =
                    format!("{key_placeholder} BETWEEN {start_placeholder} AND {end_placeholder}");
                expression_attribute_values.insert(start_placeholder, start);
                expression_attribute_values.insert(end_placeholder, end);
                expression
            }
            Self::Equals(value) => {
                let value = to_attribute_value(value)?;
                let value_placeholder = format!(":eq{index}");
                *index += 1;
                let expression = format!("{key_placeholder} = {value_placeholder}");
                expression_attribute_values.insert(value_placeholder, value);
                expression
            }
        };
        Ok((expression, expression_attribute_values))
    }
}

/// Condition applied to an attribute.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct KeyCondition<T> {
    pub(crate) condition: Condition<T>,
    pub(crate) name: String,
}

impl<T: Serialize> KeyCondition<T> {
    /// Join the conditions with `AND`, in order.
    ///
    /// Placeholders are positional (`#n0`, `:eq1`, ...) so any attribute name can be used.
    pub(crate) fn get_expression_input(conditions: Vec<Self>) -> Result<common::ExpressionInput> {
        let mut expressions = Vec::with_capacity(conditions.len());
        let mut expression_attribute_names = collections::HashMap::with_capacity(conditions.len());
        let mut expression_attribute_values = collections::HashMap::new();
        let mut index = 0;
        for (position, condition) in conditions.into_iter().enumerate() {
            let placeholder = format!("#n{position}");
            let (expression, condition_expression_attribute_values) = condition
                .condition
                .get_expression(&placeholder, &mut index)?;
            expressions.push(expression);
            expression_attribute_names.insert(placeholder, condition.name);
            expression_attribute_values.extend(condition_expression_attribute_values);
        }
        let operation = common::ExpressionInput {
            expression: expressions.join(AND),
            expression_attribute_names,
            expression_attribute_values,
        };
        Ok(operation)
    }

    /// Equality on every `(attribute, value)` pair.
    pub(crate) fn all_equal(filters: IndexMap<String, T>) -> Vec<Self> {
        filters
            .into_iter()
            .map(|(name, value)| Self {
                condition: Condition::Equals(value),
                name,
            })
            .collect()
    }
}

use crate::{common, error::Result};

use aws_sdk_dynamodb::types;
use serde::de::DeserializeOwned;
use serde_dynamo::from_items;
use std::collections;

/// Opaque position returned by a query or scan page; pass it back to resume after it.
pub type ContinuationToken = collections::HashMap<String, types::AttributeValue>;

/// Order in which a query walks the range key.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Smallest range value first.
    #[default]
    Ascending,
    /// Largest range value first.
    Descending,
}

impl Order {
    pub(crate) fn scan_index_forward(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// One page of results.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<I> {
    /// The items of this page.
    pub items: Vec<I>,
    /// Where the next page starts; `None` once the table or partition is exhausted.
    pub last_evaluated_key: Option<ContinuationToken>,
}

impl<I> Page<I> {
    /// Whether there is nothing left to read after this page.
    pub fn is_last(&self) -> bool {
        self.last_evaluated_key.is_none()
    }
}

/// Whether `limit` leaves nothing to read; DynamoDB rejects such a limit instead.
pub(crate) fn is_empty_limit(limit: Option<i32>) -> bool {
    matches!(limit, Some(limit) if limit <= 0)
}

/// raw page as returned by a single query or scan call
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RawPage {
    pub(crate) items: Vec<common::RawItem>,
    pub(crate) last_evaluated_key: Option<ContinuationToken>,
}

impl RawPage {
    pub(crate) fn new(
        items: Option<Vec<common::RawItem>>,
        last_evaluated_key: Option<ContinuationToken>,
    ) -> Self {
        Self {
            items: items.unwrap_or_default(),
            last_evaluated_key: last_evaluated_key.filter(|key| !key.is_empty()),
        }
    }

    pub(crate) fn deserialize<I: DeserializeOwned>(self) -> Result<Page<I>> {
        let page = Page {
            items: from_items(self.items)?,
            last_evaluated_key: self.last_evaluated_key,
        };
        Ok(page)
    }
}

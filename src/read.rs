//! Read requests: get item, query, scan and batch get item.

pub(crate) mod batch_get_item;
pub(crate) mod common;
pub(crate) mod get_item;
pub(crate) mod query;
pub(crate) mod scan;

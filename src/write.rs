//! Write requests: update item and delete item.

pub(crate) mod delete_item;
pub(crate) mod update_item;

#![deny(missing_docs)]

//! # DynamoDB Service
//!
//! A generic, typed data-access layer over a single Amazon DynamoDB table.
//!
//! ## Overview
//!
//! A [`Table`] is bound to one table through a [`TableConfig`] and exposes:
//! - Upserts that write only the given attributes and return the resulting item
//! - Point reads by primary key, on the table or on a secondary index
//! - Partition queries, with range equality or inclusive range bounds
//! - Batch reads split into requests of at most 100 keys
//! - Filtered listings that follow scan pagination
//! - Deletes by primary key
//!
//! Expression strings, placeholders and attribute value encoding are handled internally;
//! items are plain serde types.
//!
//! ## Quick Example
//!
//! ```no_run
//! use aws_sdk_dynamodb::Client;
//! use dynamodb_service::{KeySchema, Order, PrimaryKey, QueryOptions, Table, TableConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! struct Event {
//!     user_id: String,
//!     seq: u32,
//!     kind: String,
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::from_conf(aws_sdk_dynamodb::config::Config::builder().build());
//! let events = Table::new(
//!     client,
//!     TableConfig::new("events", KeySchema::new("user_id").with_range_key("seq")),
//! );
//!
//! // Only `kind` is written; the key attributes come from the primary key.
//! let event: Event = events
//!     .upsert(
//!         PrimaryKey::new(serde_json::json!("user-1")).with_range(serde_json::json!(0)),
//!         serde_json::json!({ "kind": "login" }),
//!     )
//!     .await?;
//!
//! // Latest ten events of the user.
//! let latest: Vec<Event> = events
//!     .query(
//!         PrimaryKey::new("user-1"),
//!         QueryOptions {
//!             order: Order::Descending,
//!             limit: Some(10),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
mod common;
mod error;
mod read;
mod table;
mod write;

pub use client::DynamoClient;
pub use common::key::{KeySchema, PrimaryKey};
pub use error::{Error, Result};
pub use read::{
    common::{ContinuationToken, Order, Page},
    query::QueryOptions,
    scan::ListOptions,
};
pub use table::{IndexConfig, Table, TableConfig};

//! Table bindings and the service exposing typed operations on one table.

use crate::{
    Error,
    client::DynamoClient,
    common::{self, key::KeySchema, key::PrimaryKey},
    error::Result,
    read::{
        self,
        common::{Page, RawPage},
        query::QueryOptions,
        scan::ListOptions,
    },
    write,
};

use aws_sdk_dynamodb::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_dynamo::{from_item, from_items, to_item};

/// A secondary index declared on a table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexConfig {
    /// The index name, as passed to DynamoDB.
    pub index_name: String,
    /// The key attributes of the index.
    #[serde(flatten)]
    pub key_schema: KeySchema,
}

/// Binding of a service to one physical table.
///
/// Bindings are plain data and can be loaded from any serde format:
///
/// ```rust
/// use dynamodb_service::TableConfig;
///
/// let config: TableConfig = serde_json::from_str(
///     r#"{
///         "table_name": "events",
///         "hash_key": "user_id",
///         "range_key": "seq",
///         "indexes": [{ "index_name": "by_kind", "hash_key": "kind", "range_key": "seq" }]
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(config.index("by_kind").unwrap().hash_key, "kind");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableConfig {
    /// The table name, as passed to DynamoDB.
    pub table_name: String,
    /// The key attributes of the table.
    #[serde(flatten)]
    pub key_schema: KeySchema,
    /// Secondary indexes that may be queried.
    #[serde(default)]
    pub indexes: Vec<IndexConfig>,
    /// Use strongly consistent reads against the table itself (never against an index).
    #[serde(default)]
    pub consistent_read: bool,
}

impl TableConfig {
    /// Binding for `table_name` keyed by `key_schema`.
    pub fn new(table_name: impl Into<String>, key_schema: KeySchema) -> Self {
        Self {
            table_name: table_name.into(),
            key_schema,
            indexes: Vec::new(),
            consistent_read: false,
        }
    }

    /// Declare a secondary index.
    pub fn with_index(mut self, index_name: impl Into<String>, key_schema: KeySchema) -> Self {
        self.indexes.push(IndexConfig {
            index_name: index_name.into(),
            key_schema,
        });
        self
    }

    /// Enable or disable strongly consistent reads.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    /// The key schema of a declared index.
    pub fn index(&self, index_name: &str) -> Result<&KeySchema> {
        self.indexes
            .iter()
            .find(|index| index.index_name == index_name)
            .map(|index| &index.key_schema)
            .ok_or_else(|| Error::UnknownIndex {
                table: self.table_name.clone(),
                index: index_name.to_string(),
            })
    }

    /// The key schema a query reads with: the index's when one is named, the table's otherwise.
    fn read_schema(&self, index_name: Option<&str>) -> Result<&KeySchema> {
        match index_name {
            Some(index_name) => self.index(index_name),
            None => Ok(&self.key_schema),
        }
    }

    fn consistent_read(&self, index_name: Option<&str>) -> Option<bool> {
        (self.consistent_read && index_name.is_none()).then_some(true)
    }
}

/// Typed operations on a single DynamoDB table.
///
/// Items are any serde type; key values are any serde type whose DynamoDB representation
/// matches the declared key attribute. The client handle is injected and never reconfigured,
/// and each operation issues its requests one after the other.
///
/// Per-table services compose a `Table` rather than extend it:
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_service::{KeySchema, PrimaryKey, Table, TableConfig};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Deserialize, Serialize)]
/// struct User {
///     id: String,
///     name: String,
/// }
///
/// struct Users(Table);
///
/// impl Users {
///     fn new(client: Client) -> Self {
///         Self(Table::new(client, TableConfig::new("users", KeySchema::new("id"))))
///     }
///
///     async fn find(&self, id: &str) -> dynamodb_service::Result<Option<User>> {
///         self.0.get(PrimaryKey::new(id)).await
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Table<C = Client> {
    client: C,
    config: TableConfig,
}

impl<C: DynamoClient> Table<C> {
    /// Service over `config` using `client` for every request.
    pub fn new(client: C, config: TableConfig) -> Self {
        Self { client, config }
    }

    /// The table binding.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The injected client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Write `attributes` onto the item identified by `key`, creating it if needed.
    ///
    /// Key attributes present in `attributes` are ignored: keys never change through an update.
    /// With no other attribute left, only the key is ensured to exist. Returns the full item
    /// after the write.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.upsert",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn upsert<T, A, O>(&self, key: PrimaryKey<T>, attributes: A) -> Result<O>
    where
        T: Serialize,
        A: Serialize,
        O: DeserializeOwned,
    {
        let key = common::key::key_item(&self.config.key_schema, key)?;
        let mut attributes: common::RawItem = to_item(attributes)?;
        self.config.key_schema.split_off_key(&mut attributes);
        self.update(key, attributes).await
    }

    /// Upsert an item carrying its own key attributes.
    ///
    /// A missing key attribute is left for DynamoDB to reject.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.save",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn save<A, O>(&self, item: A) -> Result<O>
    where
        A: Serialize,
        O: DeserializeOwned,
    {
        let mut attributes: common::RawItem = to_item(item)?;
        let key = self.config.key_schema.split_off_key(&mut attributes);
        self.update(key, attributes).await
    }

    async fn update<O: DeserializeOwned>(
        &self,
        key: common::RawItem,
        attributes: common::RawItem,
    ) -> Result<O> {
        let item = write::update_item::UpdateItem {
            attributes,
            key,
            table_name: self.config.table_name.clone(),
        }
        .send(&self.client)
        .await?;
        Ok(from_item(item)?)
    }

    /// The item identified by `key`, or `None`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.get",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn get<T, O>(&self, key: PrimaryKey<T>) -> Result<Option<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        let item = read::get_item::GetItem {
            consistent_read: self.config.consistent_read(None),
            keys: self.config.key_schema.bind(key),
            table_name: self.config.table_name.clone(),
        }
        .send(&self.client)
        .await?;
        Ok(item.map(from_item).transpose()?)
    }

    /// The first item of `index_name` matching `key`, or `None`.
    ///
    /// Indexes cannot be read by key directly, so this is a one-item ascending query.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.get_from_index",
            skip_all,
            fields(table = %self.config.table_name, index = index_name),
            err
        )
    )]
    pub async fn get_from_index<T, O>(&self, index_name: &str, key: PrimaryKey<T>) -> Result<Option<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        let options = QueryOptions {
            index_name: Some(index_name.to_string()),
            limit: Some(1),
            ..Default::default()
        };
        let page = self.query_raw(key, options).await?;
        let item = page.items.into_iter().next();
        Ok(item.map(from_item).transpose()?)
    }

    /// Items of the partition `key.hash`, restricted to `key.range` when given.
    ///
    /// Returns one request page; use [`Table::query_page`] to continue past it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.query",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn query<T, O>(&self, key: PrimaryKey<T>, options: QueryOptions) -> Result<Vec<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        let page = self.query_page(key, options).await?;
        Ok(page.items)
    }

    /// Like [`Table::query`], also returning where the next page starts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.query_page",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn query_page<T, O>(&self, key: PrimaryKey<T>, options: QueryOptions) -> Result<Page<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        self.query_raw(key, options).await?.deserialize()
    }

    async fn query_raw<T: Serialize>(
        &self,
        key: PrimaryKey<T>,
        options: QueryOptions,
    ) -> Result<RawPage> {
        let schema = self.config.read_schema(options.index_name.as_deref())?;
        let keys = schema.bind(key);
        let range_condition = keys
            .range_key
            .map(|range_key| common::condition::KeyCondition {
                condition: common::condition::Condition::Equals(range_key.value),
                name: range_key.name,
            });
        read::query::Query {
            consistent_read: self.config.consistent_read(options.index_name.as_deref()),
            hash_key: keys.hash_key,
            options,
            range_condition,
            table_name: self.config.table_name.clone(),
        }
        .send(&self.client)
        .await
    }

    /// Items of the partition `hash` whose range key lies in `[start, end]`.
    ///
    /// Fails with [`Error::RangeBoundsInverted`] before any request when `start > end`.
    /// Returns one request page.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.query_between",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn query_between<T, O>(
        &self,
        hash: T,
        start: T,
        end: T,
        options: QueryOptions,
    ) -> Result<Vec<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        let schema = self.config.read_schema(options.index_name.as_deref())?;
        let range_key = schema.range_key.clone().ok_or_else(|| {
            Error::MissingRangeKey(
                options
                    .index_name
                    .clone()
                    .unwrap_or_else(|| self.config.table_name.clone()),
            )
        })?;
        let page = read::query::Query {
            consistent_read: self.config.consistent_read(options.index_name.as_deref()),
            hash_key: common::key::Key {
                name: schema.hash_key.clone(),
                value: hash,
            },
            options,
            range_condition: Some(common::condition::KeyCondition {
                condition: common::condition::Condition::Between(start, end),
                name: range_key,
            }),
            table_name: self.config.table_name.clone(),
        }
        .send(&self.client)
        .await?;
        Ok(from_items(page.items)?)
    }

    /// The items identified by `keys`, fetched 100 keys per request.
    ///
    /// Items come back in response order, not key order; keys without an item are skipped.
    ///
    /// Keys DynamoDB leaves unprocessed are requested again right away, with no delay, until
    /// none remain. Under sustained throttling this keeps calling the service; callers that need
    /// backoff should bound the number of keys per call or retry at their own layer.
    ///
    /// Duplicate keys in the same request of 100 are rejected by DynamoDB and surface as
    /// [`Error::Dynamo`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.batch_get",
            skip_all,
            fields(table = %self.config.table_name, keys = keys.len()),
            err
        )
    )]
    pub async fn batch_get<T, O>(&self, keys: Vec<PrimaryKey<T>>) -> Result<Vec<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        let keys = keys
            .into_iter()
            .map(|key| self.config.key_schema.bind(key))
            .collect();
        let items = read::batch_get_item::BatchGetItem {
            consistent_read: self.config.consistent_read(None),
            keys,
            table_name: self.config.table_name.clone(),
        }
        .send(&self.client)
        .await?;
        Ok(from_items(items)?)
    }

    /// Scan the table, following continuation keys until it is exhausted or
    /// `options.limit` items matching `options.filters` are collected.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.list",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn list<T, O>(&self, options: ListOptions<T>) -> Result<Vec<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        let items = self.scan(options).send(&self.client).await?;
        Ok(from_items(items)?)
    }

    /// A single scan page; pass `last_evaluated_key` back as `exclusive_start_key` to continue.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.list_page",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn list_page<T, O>(&self, options: ListOptions<T>) -> Result<Page<O>>
    where
        T: Serialize,
        O: DeserializeOwned,
    {
        self.scan(options)
            .send_page(&self.client)
            .await?
            .deserialize()
    }

    /// Every item of the table.
    pub async fn get_all<O: DeserializeOwned>(&self) -> Result<Vec<O>> {
        self.list(ListOptions::<()>::default()).await
    }

    fn scan<T>(&self, options: ListOptions<T>) -> read::scan::Scan<T> {
        read::scan::Scan {
            consistent_read: self.config.consistent_read(None),
            options,
            table_name: self.config.table_name.clone(),
        }
    }

    /// Delete the item identified by `key`; deleting a missing item succeeds.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_service.delete",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn delete<T: Serialize>(&self, key: PrimaryKey<T>) -> Result<()> {
        write::delete_item::DeleteItem {
            keys: self.config.key_schema.bind(key),
            table_name: self.config.table_name.clone(),
        }
        .send(&self.client)
        .await
    }
}

use aws_sdk_dynamodb::{error, types};
use thiserror::Error;

/// Result type returned by every table operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by table operations.
///
/// `RangeBoundsInverted`, `UnknownIndex` and `MissingRangeKey` are detected while the request
/// is being assembled, so they never reach DynamoDB. `Dynamo` carries the remote failure untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// The lower bound of a range query is greater than its upper bound.
    #[error("range start {start:?} is greater than range end {end:?}")]
    RangeBoundsInverted {
        /// The requested lower bound.
        start: types::AttributeValue,
        /// The requested upper bound.
        end: types::AttributeValue,
    },
    /// The index is not declared in the table binding.
    #[error("table `{table}` has no index named `{index}`")]
    UnknownIndex {
        /// The table the index was looked up on.
        table: String,
        /// The requested index name.
        index: String,
    },
    /// A range condition was requested on a table or index without a range key.
    #[error("`{0}` has no range key")]
    MissingRangeKey(String),
    /// An item or key value could not be converted to or from DynamoDB attribute values.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
    /// The SDK refused to assemble a request input.
    #[error(transparent)]
    Build(#[from] error::BuildError),
    /// DynamoDB (or the transport in front of it) rejected the request.
    #[error(transparent)]
    Dynamo(#[from] aws_sdk_dynamodb::Error),
}

impl Error {
    /// Whether the error was raised locally, before any request was sent.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::RangeBoundsInverted { .. } | Self::UnknownIndex { .. } | Self::MissingRangeKey(_)
        )
    }
}

use thiserror::Error;

use crate::transaction::TransactionId;

/// Failures surfaced by registry operations. All of these are expected,
/// recoverable conditions for the caller.
#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("no item registered under key '{0}'")]
    ItemNotFound(String),

    #[error("item '{0}' is not available")]
    ItemUnavailable(String),

    #[error("an item with key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("item '{0}' still has an open transaction")]
    ActiveTransaction(String),

    #[error("no transaction with id {0}")]
    TransactionNotFound(TransactionId),
}

//! # Storage Traits
//!
//! Abstraction over the remote `transactions` resource.

use anyhow::Result;
use async_trait::async_trait;
use shared::{NewTransactionRecord, TransactionRecord};
use std::rc::Rc;

/// Insert capability of the persistence backend
///
/// Futures are not required to be `Send`: the browser HTTP client runs on a
/// single-threaded executor.
#[async_trait(?Send)]
pub trait TransactionStore {
    /// Store exactly one row and return it with its server-assigned fields
    async fn insert(&self, record: &NewTransactionRecord) -> Result<TransactionRecord>;
}

#[async_trait(?Send)]
impl<T: TransactionStore + ?Sized> TransactionStore for Rc<T> {
    async fn insert(&self, record: &NewTransactionRecord) -> Result<TransactionRecord> {
        (**self).insert(record).await
    }
}

/// Test doubles for the storage seam and the form caller.
use std::cell::{Cell, RefCell};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{NewTransactionRecord, TransactionRecord};
use tokio::sync::Notify;

use super::TransactionStore;
use crate::domain::submission::FormCaller;

/// Store that keeps rows in memory and can be told to fail or to hold
/// inserts until released
#[derive(Default)]
pub struct InMemoryTransactionStore {
    rows: RefCell<Vec<TransactionRecord>>,
    attempts: Cell<usize>,
    failure: Option<String>,
    gate: Option<Notify>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Inserts wait for [`release`](Self::release) before completing
    pub fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Number of insert calls, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn rows(&self) -> Vec<TransactionRecord> {
        self.rows.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, record: &NewTransactionRecord) -> Result<TransactionRecord> {
        self.attempts.set(self.attempts.get() + 1);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }

        let stored = TransactionRecord {
            id: format!("tx-{}", self.rows.borrow().len() + 1),
            user_id: record.user_id.clone(),
            transaction_type: record.transaction_type,
            amount: record.amount,
            category: record.category.clone(),
            description: record.description.clone(),
            date: record.date.clone(),
            created_at: Some("2024-03-15T12:00:00+00:00".to_string()),
        };
        self.rows.borrow_mut().push(stored.clone());
        Ok(stored)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallerEvent {
    Added(TransactionRecord),
    Closed,
}

/// Caller that records every notification in order
#[derive(Default)]
pub struct RecordingCaller {
    events: RefCell<Vec<CallerEvent>>,
}

impl RecordingCaller {
    pub fn events(&self) -> Vec<CallerEvent> {
        self.events.borrow().clone()
    }
}

impl FormCaller for RecordingCaller {
    fn on_transaction_added(&self, record: TransactionRecord) {
        self.events.borrow_mut().push(CallerEvent::Added(record));
    }

    fn on_close(&self) {
        self.events.borrow_mut().push(CallerEvent::Closed);
    }
}

//! Submission state machine for the transaction form.
//!
//! `Idle -> Submitting -> Idle`. A submit validates the draft, issues one
//! insert through the [`TransactionStore`] and reports the stored row to the
//! [`FormCaller`]. Rejected and failed submits leave the draft untouched so the
//! user can correct it and try again.

use std::cell::Cell;

use log::{debug, error, info, warn};
use shared::{TransactionFormConfig, TransactionRecord, User};

use super::transaction_form::{validate, FormError, TransactionDraft};
use crate::storage::TransactionStore;

/// What the form reports back to whoever opened it
pub trait FormCaller {
    /// Called once per successful submission with the row the backend returned
    fn on_transaction_added(&self, record: TransactionRecord);
    /// Called once, when the user cancels or after a successful submission
    fn on_close(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

/// Result of one submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Stored; the caller has been notified and asked to close the form
    Saved(TransactionRecord),
    /// Stopped before any call to the backend
    Rejected(FormError),
    /// The backend insert failed
    Failed(FormError),
    /// The form was cancelled, or closed before anything was sent; nothing is
    /// reported to the caller
    Abandoned,
}

impl SubmitOutcome {
    pub fn error(&self) -> Option<&FormError> {
        match self {
            SubmitOutcome::Rejected(e) | SubmitOutcome::Failed(e) => Some(e),
            SubmitOutcome::Saved(_) | SubmitOutcome::Abandoned => None,
        }
    }

    /// Alert text for rejected and failed submissions
    pub fn user_message(&self, config: &TransactionFormConfig) -> Option<String> {
        self.error().map(|e| e.user_message(config))
    }
}

pub struct TransactionSubmitter<S> {
    store: S,
    user_id: String,
    current_balance: Cell<f64>,
    config: TransactionFormConfig,
    phase: Cell<SubmissionPhase>,
    closed: Cell<bool>,
    cancelled: Cell<bool>,
}

impl<S: TransactionStore> TransactionSubmitter<S> {
    pub fn new(store: S, user: &User, current_balance: f64, config: TransactionFormConfig) -> Self {
        Self {
            store,
            user_id: user.id.clone(),
            current_balance: Cell::new(current_balance),
            config,
            phase: Cell::new(SubmissionPhase::Idle),
            closed: Cell::new(false),
            cancelled: Cell::new(false),
        }
    }

    pub fn config(&self) -> &TransactionFormConfig {
        &self.config
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase.get()
    }

    /// True while an insert is in flight
    pub fn is_loading(&self) -> bool {
        self.phase.get() == SubmissionPhase::Submitting
    }

    pub fn current_balance(&self) -> f64 {
        self.current_balance.get()
    }

    /// The caller's balance may change while the form is open
    pub fn set_current_balance(&self, balance: f64) {
        self.current_balance.set(balance);
    }

    /// True once the form has closed, been cancelled, or saved a transaction
    pub fn is_finished(&self) -> bool {
        self.closed.get() || self.cancelled.get()
    }

    /// Detach from the caller without notifying it.
    ///
    /// An insert already in flight still completes at the backend, but its
    /// result is dropped. Used when the form goes away mid-request.
    pub fn cancel(&self) {
        if !self.cancelled.replace(true) && self.is_loading() {
            warn!("Transaction form cancelled with an insert in flight");
        }
    }

    /// User dismissed the form. Notifies the caller at most once.
    ///
    /// A row stored by an insert already in flight is still reported through
    /// `on_transaction_added`.
    pub fn close<C: FormCaller + ?Sized>(&self, caller: &C) {
        if self.cancelled.get() || self.closed.replace(true) {
            return;
        }
        debug!("Transaction form closed by user");
        caller.on_close();
    }

    pub async fn submit<C: FormCaller + ?Sized>(&self, draft: &TransactionDraft, caller: &C) -> SubmitOutcome {
        if self.is_finished() {
            return SubmitOutcome::Abandoned;
        }
        if self.is_loading() {
            warn!("Ignoring submit while another one is in flight");
            return SubmitOutcome::Rejected(FormError::AlreadySubmitting);
        }

        self.phase.set(SubmissionPhase::Submitting);

        let validated = match validate(draft, self.current_balance.get()) {
            Ok(validated) => validated,
            Err(e) => {
                warn!("Transaction draft rejected: {}", e);
                self.phase.set(SubmissionPhase::Idle);
                return SubmitOutcome::Rejected(e);
            }
        };

        let record = validated.to_record(&self.user_id, &self.config);
        info!(
            "Submitting {} transaction: amount={} category={} date={}",
            record.transaction_type, record.amount, record.category, record.date
        );

        let result = self.store.insert(&record).await;
        self.phase.set(SubmissionPhase::Idle);

        if self.cancelled.get() {
            match &result {
                Ok(stored) => warn!("Transaction {} stored after the form was cancelled", stored.id),
                Err(e) => warn!("Insert failed after the form was cancelled: {:#}", e),
            }
            return SubmitOutcome::Abandoned;
        }

        match result {
            Ok(stored) => {
                info!("Transaction {} stored", stored.id);
                caller.on_transaction_added(stored.clone());
                if !self.closed.replace(true) {
                    caller.on_close();
                }
                SubmitOutcome::Saved(stored)
            }
            Err(e) => {
                error!("Error al agregar transacción: {:#}", e);
                SubmitOutcome::Failed(FormError::Persistence(e))
            }
        }
    }
}

//! # Finanzas core
//!
//! Framework-agnostic logic behind the "Nueva Transacción" form: amount
//! formatting, draft validation, payload resolution and the submission state
//! machine. The UI layer only renders state and forwards events here.

pub mod domain;
pub mod storage;

pub use domain::money_format::{format_amount, format_currency, format_display, format_hours, parse_value};
pub use domain::submission::{FormCaller, SubmissionPhase, SubmitOutcome, TransactionSubmitter};
pub use domain::transaction_form::{validate, FormError, ResolvedEntry, TransactionDraft, ValidatedDraft};
pub use storage::TransactionStore;

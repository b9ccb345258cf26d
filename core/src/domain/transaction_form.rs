//! Draft state, validation and payload resolution for the transaction form.
//!
//! A [`TransactionDraft`] holds exactly what the user typed. [`validate`]
//! turns it into a [`ValidatedDraft`] whose [`ResolvedEntry`] carries parsed
//! numbers per kind, and that entry is what becomes the stored row.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{EntryKind, NewTransactionRecord, PayFrequency, TransactionFormConfig, TransactionType};
use thiserror::Error;

use super::money_format::{format_amount, format_currency, format_display, format_hours, parse_value};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form field state while the user is editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: EntryKind,
    /// Display string for income and expense amounts
    pub amount: String,
    pub category: String,
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    // Salary only
    pub salary_amount: String,
    pub frequency: PayFrequency,
    pub extra_hours: String,
    pub extra_rate: String,
}

impl TransactionDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            kind: EntryKind::default(),
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            salary_amount: String::new(),
            frequency: PayFrequency::default(),
            extra_hours: String::new(),
            extra_rate: String::new(),
        }
    }

    /// Empty draft dated with the current UTC day
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    pub fn set_amount_input(&mut self, raw: &str) {
        self.amount = format_display(raw);
    }

    pub fn set_salary_amount_input(&mut self, raw: &str) {
        self.salary_amount = format_display(raw);
    }

    pub fn set_extra_rate_input(&mut self, raw: &str) {
        self.extra_rate = format_display(raw);
    }

    /// Amount typed in the field that is active for the current kind
    pub fn base_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Salary => parse_value(&self.salary_amount),
            EntryKind::Income | EntryKind::Expense => parse_value(&self.amount),
        }
    }

    /// Overtime fields, only meaningful for salary. Negative input counts as zero.
    pub fn overtime(&self) -> Overtime {
        match self.kind {
            EntryKind::Salary => Overtime {
                hours: parse_value(&self.extra_hours).max(0.0),
                rate: parse_value(&self.extra_rate).max(0.0),
            },
            EntryKind::Income | EntryKind::Expense => Overtime::default(),
        }
    }

    pub fn total_amount(&self) -> f64 {
        self.base_amount() + self.overtime().total()
    }
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self::today()
    }
}

/// Extra hours worked on top of a salary
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overtime {
    pub hours: f64,
    pub rate: f64,
}

impl Overtime {
    pub fn total(&self) -> f64 {
        self.hours * self.rate
    }
}

/// A draft with its numbers parsed, split by kind
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedEntry {
    Income {
        amount: f64,
        category: String,
        description: Option<String>,
    },
    Expense {
        amount: f64,
        category: String,
        description: Option<String>,
    },
    Salary {
        base: f64,
        frequency: PayFrequency,
        overtime: Overtime,
    },
}

impl ResolvedEntry {
    /// Resolve a draft without validating it
    pub fn from_draft(draft: &TransactionDraft) -> Self {
        let description = Some(&draft.description)
            .filter(|d| !d.trim().is_empty())
            .cloned();

        match draft.kind {
            EntryKind::Income => ResolvedEntry::Income {
                amount: draft.base_amount(),
                category: draft.category.clone(),
                description,
            },
            EntryKind::Expense => ResolvedEntry::Expense {
                amount: draft.base_amount(),
                category: draft.category.clone(),
                description,
            },
            EntryKind::Salary => ResolvedEntry::Salary {
                base: draft.base_amount(),
                frequency: draft.frequency,
                overtime: draft.overtime(),
            },
        }
    }

    /// Amount before overtime
    pub fn base_amount(&self) -> f64 {
        match self {
            ResolvedEntry::Income { amount, .. } | ResolvedEntry::Expense { amount, .. } => *amount,
            ResolvedEntry::Salary { base, .. } => *base,
        }
    }

    pub fn total_amount(&self) -> f64 {
        match self {
            ResolvedEntry::Salary { base, overtime, .. } => base + overtime.total(),
            _ => self.base_amount(),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            ResolvedEntry::Income { .. } | ResolvedEntry::Salary { .. } => TransactionType::Income,
            ResolvedEntry::Expense { .. } => TransactionType::Expense,
        }
    }

    fn category(&self, config: &TransactionFormConfig) -> String {
        match self {
            ResolvedEntry::Income { category, .. } | ResolvedEntry::Expense { category, .. } => category.clone(),
            ResolvedEntry::Salary { .. } => config.salary_category.clone(),
        }
    }

    fn description(&self, config: &TransactionFormConfig) -> Option<String> {
        match self {
            ResolvedEntry::Income { description, .. } | ResolvedEntry::Expense { description, .. } => {
                description.clone()
            }
            ResolvedEntry::Salary { frequency, overtime, .. } => {
                let base = format!("{} ({})", config.salary_category, frequency);
                let extra = overtime.total();
                if extra > 0.0 {
                    Some(format!(
                        "{} - Horas extra: {} x {} = {}",
                        base,
                        format_hours(overtime.hours),
                        format_amount(overtime.rate, 2, 3),
                        format_amount(extra, 2, 3)
                    ))
                } else {
                    Some(base)
                }
            }
        }
    }

    /// Build the row sent to the backend
    pub fn to_record(&self, user_id: &str, date: &str, config: &TransactionFormConfig) -> NewTransactionRecord {
        NewTransactionRecord {
            user_id: user_id.to_string(),
            transaction_type: self.transaction_type(),
            amount: self.total_amount(),
            category: self.category(config),
            description: self.description(config),
            date: date.to_string(),
        }
    }
}

/// A draft that passed validation and is ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub entry: ResolvedEntry,
    /// The date exactly as typed; known to parse
    pub date: String,
}

impl ValidatedDraft {
    pub fn to_record(&self, user_id: &str, config: &TransactionFormConfig) -> NewTransactionRecord {
        self.entry.to_record(user_id, &self.date, config)
    }
}

/// Everything that can stop a submission
#[derive(Debug, Error)]
pub enum FormError {
    #[error("a category is required")]
    MissingCategory,

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("expense exceeds available balance of {balance}")]
    InsufficientBalance { balance: f64 },

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("failed to store transaction: {0}")]
    Persistence(#[source] anyhow::Error),
}

impl FormError {
    /// Message shown to the user in the blocking alert
    pub fn user_message(&self, config: &TransactionFormConfig) -> String {
        match self {
            FormError::MissingCategory => "Selecciona una categoría.".to_string(),
            FormError::InvalidDate(_) => "Ingresa una fecha válida.".to_string(),
            FormError::InvalidAmount => "El monto debe ser mayor a 0.".to_string(),
            FormError::InsufficientBalance { balance } => format!(
                "No tienes suficiente dinero para este gasto. Balance actual: {}",
                format_currency(*balance, config)
            ),
            FormError::AlreadySubmitting => "La transacción ya se está guardando.".to_string(),
            FormError::Persistence(_) => "Error al agregar transacción. Por favor, intenta de nuevo.".to_string(),
        }
    }
}

/// Check a draft against the available balance.
///
/// Required fields are checked first, then the amount rules: the total
/// (base plus overtime) must be positive, and an expense may not exceed
/// `current_balance`. Overtime never applies to expenses.
pub fn validate(draft: &TransactionDraft, current_balance: f64) -> Result<ValidatedDraft, FormError> {
    if draft.kind != EntryKind::Salary && draft.category.trim().is_empty() {
        return Err(FormError::MissingCategory);
    }

    if NaiveDate::parse_from_str(&draft.date, DATE_FORMAT).is_err() {
        return Err(FormError::InvalidDate(draft.date.clone()));
    }

    let entry = ResolvedEntry::from_draft(draft);

    if entry.total_amount() <= 0.0 {
        return Err(FormError::InvalidAmount);
    }

    if let ResolvedEntry::Expense { amount, .. } = &entry {
        if *amount > current_balance {
            return Err(FormError::InsufficientBalance { balance: current_balance });
        }
    }

    Ok(ValidatedDraft {
        entry,
        date: draft.date.clone(),
    })
}

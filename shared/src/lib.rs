use serde::{Deserialize, Serialize};
use std::fmt;

/// Category name that every salary entry is stored under
pub const SALARY_CATEGORY: &str = "Salario";

/// Kind of a persisted transaction row.
///
/// Salary entries are stored as `Income`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind selected in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    #[default]
    Expense,
    Salary,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Income, EntryKind::Expense, EntryKind::Salary];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
            EntryKind::Salary => "salary",
        }
    }

    /// Label shown next to the radio button
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Ingreso",
            EntryKind::Expense => "Gasto",
            EntryKind::Salary => "Salario",
        }
    }

    /// Parse the value attribute of a form control
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "income" => Some(EntryKind::Income),
            "expense" => Some(EntryKind::Expense),
            "salary" => Some(EntryKind::Salary),
            _ => None,
        }
    }
}

/// How often a salary is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    #[default]
    Monthly,
    Biweekly,
    Semimonthly,
    Weekly,
}

impl PayFrequency {
    pub const ALL: [PayFrequency; 4] = [
        PayFrequency::Monthly,
        PayFrequency::Biweekly,
        PayFrequency::Semimonthly,
        PayFrequency::Weekly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayFrequency::Monthly => "monthly",
            PayFrequency::Biweekly => "biweekly",
            PayFrequency::Semimonthly => "semimonthly",
            PayFrequency::Weekly => "weekly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PayFrequency::Monthly => "Mensual",
            PayFrequency::Biweekly => "Quincenal",
            PayFrequency::Semimonthly => "Bisemanal (2 pagos/mes)",
            PayFrequency::Weekly => "Semanal",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        PayFrequency::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user handed to the form by its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Row sent to the `transactions` resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransactionRecord {
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    /// Serialized as `null` when absent
    pub description: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}

/// Row returned by the backend after insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Server-assigned identifier
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
    /// Server-assigned creation timestamp (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TransactionRecord {
    /// Signed effect of this record on the available balance
    pub fn balance_delta(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The two category lists offered by the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub income: Vec<Category>,
    pub expense: Vec<Category>,
}

impl CategoryCatalog {
    /// Categories offered for the given form kind. Salary shares the income list.
    pub fn categories_for(&self, kind: EntryKind) -> &[Category] {
        match kind {
            EntryKind::Income | EntryKind::Salary => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }

    pub fn contains(&self, kind: EntryKind, name: &str) -> bool {
        self.categories_for(kind).iter().any(|c| c.name == name)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        let income = [SALARY_CATEGORY, "Freelance", "Inversiones", "Ventas", "Regalos", "Otros ingresos"];
        let expense = [
            "Alimentación",
            "Transporte",
            "Vivienda",
            "Servicios",
            "Salud",
            "Educación",
            "Entretenimiento",
            "Ropa",
            "Otros gastos",
        ];
        Self {
            income: income.into_iter().map(Category::new).collect(),
            expense: expense.into_iter().map(Category::new).collect(),
        }
    }
}

/// Configuration for the transaction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormConfig {
    pub currency_symbol: String,
    pub salary_category: String,
    pub enable_debug_logging: bool,
}

impl Default for TransactionFormConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₡".to_string(),
            salary_category: SALARY_CATEGORY.to_string(),
            enable_debug_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_wire_format() {
        let record = NewTransactionRecord {
            user_id: "user-1".to_string(),
            transaction_type: TransactionType::Expense,
            amount: 1500.5,
            category: "Transporte".to_string(),
            description: None,
            date: "2024-03-01".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 1500.5);
        assert!(json["description"].is_null());
        assert_eq!(json["date"], "2024-03-01");
    }

    #[test]
    fn test_stored_record_accepts_server_fields() {
        let json = r#"{
            "id": "4f0c2f3e-0000-0000-0000-000000000001",
            "user_id": "user-1",
            "type": "income",
            "amount": 12000,
            "category": "Salario",
            "description": "Salario (monthly)",
            "date": "2024-03-01",
            "created_at": "2024-03-01T12:00:00+00:00"
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.transaction_type, TransactionType::Income);
        assert_eq!(record.amount, 12000.0);
        assert_eq!(record.created_at.as_deref(), Some("2024-03-01T12:00:00+00:00"));
        assert_eq!(record.balance_delta(), 12000.0);
    }

    #[test]
    fn test_salary_is_not_a_wire_type() {
        let json = r#"{"id":"1","user_id":"u","type":"salary","amount":1,"category":"Salario","description":null,"date":"2024-03-01"}"#;
        assert!(serde_json::from_str::<TransactionRecord>(json).is_err());
    }

    #[test]
    fn test_entry_kind_form_values() {
        assert_eq!(EntryKind::from_form_value("salary"), Some(EntryKind::Salary));
        assert_eq!(EntryKind::from_form_value("bonus"), None);
        assert_eq!(EntryKind::default(), EntryKind::Expense);
    }

    #[test]
    fn test_pay_frequency_values() {
        assert_eq!(PayFrequency::default(), PayFrequency::Monthly);
        assert_eq!(PayFrequency::from_form_value("semimonthly"), Some(PayFrequency::Semimonthly));
        assert_eq!(PayFrequency::Biweekly.to_string(), "biweekly");
        assert_eq!(PayFrequency::from_form_value("daily"), None);
    }

    #[test]
    fn test_category_catalog() {
        let catalog = CategoryCatalog::default();
        assert!(catalog.contains(EntryKind::Income, "Freelance"));
        assert!(catalog.contains(EntryKind::Salary, "Freelance"));
        assert!(catalog.contains(EntryKind::Expense, "Transporte"));
        assert!(!catalog.contains(EntryKind::Expense, "Freelance"));

        let loaded: CategoryCatalog =
            serde_json::from_str(r#"{"income":[{"name":"Bonos"}],"expense":[{"name":"Mascotas"}]}"#).unwrap();
        assert_eq!(loaded.categories_for(EntryKind::Expense), &[Category::new("Mascotas")]);
        assert!(serde_json::from_str::<CategoryCatalog>("[]").is_err());
    }
}

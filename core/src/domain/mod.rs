pub mod money_format;
pub mod submission;
pub mod transaction_form;

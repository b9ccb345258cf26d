pub mod use_transaction_form;

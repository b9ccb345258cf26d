//! # Storage Module
//!
//! The transaction form never talks to a database directly. It hands one
//! finished row to a [`TransactionStore`] and gets the stored row back. The
//! browser build implements the trait over HTTP; tests use the in-memory
//! store in [`test_utils`].

pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use traits::TransactionStore;

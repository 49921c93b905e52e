//! Transaction management for the expense tracking application.
//!
//! This module contains everything related to transactions:
//! - The [Transaction] model and database functions for storing, querying
//!   and managing transactions
//! - The view-level type filter
//! - View handlers and endpoints for transaction-related pages

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod filter;
mod form;
mod get_endpoint;
mod list_endpoint;
mod transactions_page;

pub use core::{
    NewTransaction, Transaction, TransactionType, create_transaction, create_transaction_table,
    get_transaction, get_transactions_by_user,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::update_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use filter::{TypeFilter, filter_by_type};
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use transactions_page::get_transactions_page;

#[cfg(test)]
pub(crate) use core::test_utils;

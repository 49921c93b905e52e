//! View-level filtering of transactions by type.

use serde::Deserialize;

use crate::transaction::{Transaction, TransactionType};

/// The type filter selected on the transactions page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep only income transactions.
    Income,
    /// Keep only expense transactions.
    Expense,
}

impl TypeFilter {
    /// The value used for this filter in query strings and form selects.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

/// Retain the transactions matching `filter`, preserving the input order.
///
/// [TypeFilter::All] is the identity filter.
pub fn filter_by_type(transactions: &[Transaction], filter: TypeFilter) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| match filter {
            TypeFilter::All => true,
            TypeFilter::Income => transaction.transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction.transaction_type == TransactionType::Expense,
        })
        .collect()
}

//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::Category, database_id::TransactionId, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The lowercase label used in the database and over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short label describing the transaction.
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Amounts are magnitudes and therefore non-negative; the direction of
    /// money comes from `transaction_type`.
    pub amount: f64,
    /// A longer text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// The raw category label.
    ///
    /// Labels are validated against [Category::ALL] when transactions are
    /// created or updated, but stored labels outside the set are tolerated
    /// when reading. Such labels are left out of the per-category summaries.
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// The user that owns the transaction.
    pub user_id: UserID,
}

/// The fields needed to create a transaction or fully replace an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A short label describing the transaction.
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A longer text description, may be empty.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// The category label, must be one of the canonical labels.
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// The user that owns the transaction.
    pub user_id: UserID,
}

impl NewTransaction {
    /// Check the title, amount and category against the write-time rules.
    ///
    /// # Errors
    ///
    /// Returns a:
    /// - [Error::EmptyTitle] if the title is blank,
    /// - [Error::InvalidAmount] if the amount is negative or not finite,
    /// - [Error::UnknownCategory] if the category label is outside the
    ///   canonical set.
    fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        if Category::from_label(&self.category).is_none() {
            return Err(Error::UnknownCategory(self.category.clone()));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                transaction_type TEXT NOT NULL
                    CHECK (transaction_type IN ('income', 'expense')),
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    // Composite index used by the dashboard and transactions pages.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date
            ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle], [Error::InvalidAmount] or [Error::UnknownCategory]
///   if validation fails,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    new_transaction.validate()?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\"
                (title, amount, description, date, category, transaction_type, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, title, amount, description, date, category, transaction_type, user_id",
        )?
        .query_row(
            (
                &new_transaction.title,
                new_transaction.amount,
                &new_transaction.description,
                new_transaction.date,
                &new_transaction.category,
                new_transaction.transaction_type,
                new_transaction.user_id.as_i64(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction owned by `user_id` from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by
///   `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, title, amount, description, date, category, transaction_type, user_id
             FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((id, user_id.as_i64()), map_transaction_row)?;

    Ok(transaction)
}

/// Get every transaction owned by `user_id`, most recent first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, title, amount, description, date, category, transaction_type, user_id
             FROM \"transaction\" WHERE user_id = ?1
             ORDER BY date DESC, id DESC",
        )?
        .query_map([user_id.as_i64()], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?;

    Ok(transactions)
}

/// Fully replace the transaction with `id` owned by
/// `new_transaction.user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle], [Error::InvalidAmount] or [Error::UnknownCategory]
///   if validation fails,
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a
///   transaction owned by the user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    new_transaction.validate()?;

    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET title = ?1, amount = ?2, description = ?3, date = ?4,
             category = ?5, transaction_type = ?6
         WHERE id = ?7 AND user_id = ?8",
        (
            &new_transaction.title,
            new_transaction.amount,
            &new_transaction.description,
            new_transaction.date,
            &new_transaction.category,
            new_transaction.transaction_type,
            id,
            new_transaction.user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete the transaction with `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a
///   transaction owned by the user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        category: row.get(5)?,
        transaction_type: row.get(6)?,
        user_id: UserID::new(row.get(7)?),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod test_utils {
    use rusqlite::Connection;
    use time::Date;

    use crate::{
        db::initialize,
        password::PasswordHash,
        user::{UserID, create_user},
    };

    use super::{NewTransaction, Transaction, TransactionType, create_transaction};

    /// An in-memory database with a single user with ID 1.
    pub fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        create_user(
            "Test User",
            "test@example.com",
            PasswordHash::new_unchecked("hash"),
            &conn,
        )
        .unwrap();

        conn
    }

    pub fn new_transaction(
        amount: f64,
        date: Date,
        category: &str,
        transaction_type: TransactionType,
    ) -> NewTransaction {
        NewTransaction {
            title: "test transaction".to_owned(),
            amount,
            description: String::new(),
            date,
            category: category.to_owned(),
            transaction_type,
            user_id: UserID::new(1),
        }
    }

    pub fn insert_transaction(
        connection: &Connection,
        amount: f64,
        date: Date,
        category: &str,
        transaction_type: TransactionType,
    ) -> Transaction {
        create_transaction(
            new_transaction(amount, date, category, transaction_type),
            connection,
        )
        .expect("Could not create transaction")
    }
}


#[cfg(test)]
mod transaction_type_tests {
    use super::TransactionType;

    #[test]
    fn serializes_to_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Income).unwrap(),
            "\"income\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"expense\""
        );
    }

    #[test]
    fn deserializes_from_lowercase() {
        assert_eq!(
            serde_json::from_str::<TransactionType>("\"income\"").unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            serde_json::from_str::<TransactionType>("\"expense\"").unwrap(),
            TransactionType::Expense
        );
    }
}

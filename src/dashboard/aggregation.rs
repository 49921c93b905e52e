//! Transaction data aggregation for the dashboard.
//!
//! Provides the pure functions that derive the dashboard's summary from a
//! transaction list: income/expense totals, the twelve-month series behind
//! the bar chart, and the per-category breakdowns behind the doughnut
//! charts. The summary is recomputed from a freshly loaded transaction list
//! on every request, nothing here is cached.

use crate::{category::Category, transaction::{Transaction, TransactionType}};

/// Three-letter labels for the twelve month buckets, Jan..Dec.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Income and expense totals bucketed by calendar month, Jan = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    /// Income per month.
    pub income: [f64; 12],
    /// Expenses per month.
    pub expense: [f64; 12],
}

impl Default for MonthlyTotals {
    fn default() -> Self {
        Self {
            income: [0.0; 12],
            expense: [0.0; 12],
        }
    }
}

/// A category and the summed amount of its transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category.
    pub category: Category,
    /// The summed amount, strictly positive.
    pub total: f64,
}

/// Everything the dashboard derives from a transaction list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
    /// The twelve-month income/expense series.
    pub monthly: MonthlyTotals,
    /// Per-category income sums in canonical category order, restricted to
    /// categories whose sum is strictly positive.
    pub income_by_category: Vec<CategoryTotal>,
    /// Per-category expense sums, same rules as `income_by_category`.
    pub expense_by_category: Vec<CategoryTotal>,
}

/// Derive a [Summary] from `transactions`.
///
/// Every transaction contributes its amount to exactly one of the
/// income/expense totals, exactly one monthly bucket, and, when its category
/// label is canonical, exactly one category bucket. A transaction with a
/// label outside [Category::ALL] still counts toward the totals and the
/// monthly series; it is only left out of the category breakdowns.
///
/// Records whose amount is not a finite number are logged and excluded from
/// every view. The write path rejects such amounts, so this only applies to
/// rows that bypassed it.
pub fn aggregate(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    let mut income_by_category = [0.0; Category::ALL.len()];
    let mut expense_by_category = [0.0; Category::ALL.len()];

    for transaction in transactions {
        if !transaction.amount.is_finite() {
            tracing::warn!(
                "Skipping transaction {} with non-finite amount {}",
                transaction.id,
                transaction.amount
            );
            continue;
        }

        let month = transaction.date.month() as usize - 1;
        let category_index = canonical_index(&transaction.category);

        match transaction.transaction_type {
            TransactionType::Income => {
                summary.total_income += transaction.amount;
                summary.monthly.income[month] += transaction.amount;
                if let Some(index) = category_index {
                    income_by_category[index] += transaction.amount;
                }
            }
            TransactionType::Expense => {
                summary.total_expense += transaction.amount;
                summary.monthly.expense[month] += transaction.amount;
                if let Some(index) = category_index {
                    expense_by_category[index] += transaction.amount;
                }
            }
        }
    }

    summary.balance = summary.total_income - summary.total_expense;
    summary.income_by_category = collect_positive_totals(&income_by_category);
    summary.expense_by_category = collect_positive_totals(&expense_by_category);

    summary
}

/// The position of `label` in the canonical category order, or `None` for
/// labels outside the set.
fn canonical_index(label: &str) -> Option<usize> {
    Category::ALL
        .iter()
        .position(|category| category.as_str() == label)
}

/// Pair each canonical category with its accumulated total, keeping only the
/// strictly positive ones. The result stays in canonical declaration order,
/// which keeps chart legends stable across renders.
fn collect_positive_totals(totals: &[f64; Category::ALL.len()]) -> Vec<CategoryTotal> {
    Category::ALL
        .iter()
        .zip(totals)
        .filter(|&(_, &total)| total > 0.0)
        .map(|(&category, &total)| CategoryTotal { category, total })
        .collect()
}

/// The label for one slice of a chart series.
///
/// `value / series_total * 100` rounded to one decimal place, e.g. `38.2%`.
/// When the series total is not strictly positive there is no meaningful
/// percentage, so the label is the literal value instead.
pub fn percentage_label(value: f64, series_total: f64) -> String {
    if series_total > 0.0 {
        format!("{:.1}%", value / series_total * 100.0)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Date, macros::date};

    use crate::{
        category::Category,
        transaction::{Transaction, TransactionType},
        user::UserID,
    };

    use super::{MonthlyTotals, aggregate, percentage_label};

    fn transaction(
        amount: f64,
        date: Date,
        category: &str,
        transaction_type: TransactionType,
    ) -> Transaction {
        Transaction {
            id: 1,
            title: "test".to_owned(),
            amount,
            description: String::new(),
            date,
            category: category.to_owned(),
            transaction_type,
            user_id: UserID::new(1),
        }
    }

    #[test]
    fn empty_list_yields_all_zeros() {
        let summary = aggregate(&[]);

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.monthly, MonthlyTotals::default());
        assert!(summary.income_by_category.is_empty());
        assert!(summary.expense_by_category.is_empty());
    }

    #[test]
    fn totals_and_monthly_series_match_worked_example() {
        let transactions = vec![
            transaction(
                100.0,
                date!(2024 - 01 - 15),
                "Salary / Wages",
                TransactionType::Income,
            ),
            transaction(40.0, date!(2024 - 01 - 20), "Groceries", TransactionType::Expense),
        ];

        let summary = aggregate(&transactions);

        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.total_expense, 40.0);
        assert_eq!(summary.balance, 60.0);

        assert_eq!(summary.monthly.income[0], 100.0);
        assert_eq!(summary.monthly.expense[0], 40.0);
        for month in 1..12 {
            assert_eq!(summary.monthly.income[month], 0.0);
            assert_eq!(summary.monthly.expense[month], 0.0);
        }

        assert_eq!(summary.income_by_category.len(), 1);
        assert_eq!(summary.income_by_category[0].category, Category::SalaryWages);
        assert_eq!(summary.income_by_category[0].total, 100.0);

        assert_eq!(summary.expense_by_category.len(), 1);
        assert_eq!(summary.expense_by_category[0].category, Category::Groceries);
        assert_eq!(summary.expense_by_category[0].total, 40.0);
    }

    #[test]
    fn balance_equals_income_minus_expense() {
        let transactions = vec![
            transaction(10.5, date!(2024 - 02 - 01), "Investments", TransactionType::Income),
            transaction(20.25, date!(2024 - 03 - 01), "Utilities", TransactionType::Expense),
            transaction(5.0, date!(2024 - 07 - 12), "Other", TransactionType::Income),
        ];

        let summary = aggregate(&transactions);

        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
        assert!(summary.total_income >= 0.0);
        assert!(summary.total_expense >= 0.0);
    }

    #[test]
    fn income_never_contributes_to_expense_accumulators() {
        let transactions = vec![transaction(
            100.0,
            date!(2024 - 05 - 10),
            "Groceries",
            TransactionType::Income,
        )];

        let summary = aggregate(&transactions);

        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.monthly.expense, [0.0; 12]);
        assert!(summary.expense_by_category.is_empty());

        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.monthly.income[4], 100.0);
        assert_eq!(summary.income_by_category.len(), 1);
    }

    #[test]
    fn each_transaction_lands_in_exactly_one_month_bucket() {
        let transactions = vec![
            transaction(1.0, date!(2024 - 01 - 31), "Other", TransactionType::Expense),
            transaction(2.0, date!(2024 - 12 - 01), "Other", TransactionType::Expense),
        ];

        let summary = aggregate(&transactions);

        assert_eq!(summary.monthly.expense[0], 1.0);
        assert_eq!(summary.monthly.expense[11], 2.0);
        let bucketed: f64 = summary.monthly.expense.iter().sum();
        assert_eq!(bucketed, summary.total_expense);
    }

    #[test]
    fn category_breakdown_never_contains_zero_totals() {
        let transactions = vec![transaction(
            0.0,
            date!(2024 - 01 - 15),
            "Groceries",
            TransactionType::Expense,
        )];

        let summary = aggregate(&transactions);

        assert!(summary.expense_by_category.is_empty());
    }

    #[test]
    fn category_breakdown_preserves_canonical_order_regardless_of_input_order() {
        // Input order is deliberately reversed relative to the canonical
        // category order.
        let transactions = vec![
            transaction(5.0, date!(2024 - 01 - 01), "Other", TransactionType::Expense),
            transaction(10.0, date!(2024 - 01 - 02), "Utilities", TransactionType::Expense),
            transaction(15.0, date!(2024 - 01 - 03), "Groceries", TransactionType::Expense),
        ];

        let summary = aggregate(&transactions);

        let categories: Vec<Category> = summary
            .expense_by_category
            .iter()
            .map(|entry| entry.category)
            .collect();
        assert_eq!(
            categories,
            vec![Category::Groceries, Category::Utilities, Category::Other]
        );
    }

    #[test]
    fn same_category_sums_income_and_expense_independently() {
        let transactions = vec![
            transaction(100.0, date!(2024 - 01 - 01), "Investments", TransactionType::Income),
            transaction(30.0, date!(2024 - 01 - 02), "Investments", TransactionType::Expense),
            transaction(50.0, date!(2024 - 02 - 01), "Investments", TransactionType::Income),
        ];

        let summary = aggregate(&transactions);

        assert_eq!(summary.income_by_category.len(), 1);
        assert_eq!(summary.income_by_category[0].total, 150.0);
        assert_eq!(summary.expense_by_category.len(), 1);
        assert_eq!(summary.expense_by_category[0].total, 30.0);
    }

    #[test]
    fn unmapped_category_counts_toward_totals_but_not_breakdowns() {
        let transactions = vec![transaction(
            25.0,
            date!(2024 - 06 - 15),
            "Yacht Upkeep",
            TransactionType::Expense,
        )];

        let summary = aggregate(&transactions);

        assert_eq!(summary.total_expense, 25.0);
        assert_eq!(summary.monthly.expense[5], 25.0);
        assert!(summary.expense_by_category.is_empty());
    }

    #[test]
    fn non_finite_amounts_are_excluded_from_every_view() {
        let transactions = vec![
            transaction(f64::NAN, date!(2024 - 01 - 15), "Groceries", TransactionType::Expense),
            transaction(10.0, date!(2024 - 01 - 20), "Groceries", TransactionType::Expense),
        ];

        let summary = aggregate(&transactions);

        assert_eq!(summary.total_expense, 10.0);
        assert_eq!(summary.monthly.expense[0], 10.0);
        assert_eq!(summary.expense_by_category.len(), 1);
        assert_eq!(summary.expense_by_category[0].total, 10.0);
    }

    #[test]
    fn percentage_label_rounds_to_one_decimal() {
        assert_eq!(percentage_label(40.0, 140.0), "28.6%");
        assert_eq!(percentage_label(100.0, 140.0), "71.4%");
        assert_eq!(percentage_label(50.0, 100.0), "50.0%");
    }

    #[test]
    fn percentage_label_falls_back_to_literal_value_for_zero_sum_series() {
        assert_eq!(percentage_label(40.0, 0.0), "40");
        assert_eq!(percentage_label(2.5, -1.0), "2.5");
    }
}

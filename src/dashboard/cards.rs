//! The summary tiles shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{dashboard::aggregation::Summary, html::format_currency};

/// Render the three summary tiles: total income, total expense and balance.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    html!(
        section id="summary-cards" class="w-full mx-auto mb-6"
        {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                (summary_card(
                    "Total Income",
                    summary.total_income,
                    "bg-green-100 dark:bg-green-900/30",
                    "text-green-600 dark:text-green-400",
                ))
                (summary_card(
                    "Total Expense",
                    summary.total_expense,
                    "bg-red-100 dark:bg-red-900/30",
                    "text-red-600 dark:text-red-400",
                ))
                (summary_card(
                    "Balance",
                    summary.balance,
                    "bg-blue-100 dark:bg-blue-900/30",
                    "text-blue-600 dark:text-blue-400",
                ))
            }
        }
    )
}

fn summary_card(
    label: &str,
    amount: f64,
    container_style: &str,
    amount_style: &str,
) -> Markup {
    html!(
        div class={ "p-4 rounded text-center " (container_style) }
        {
            p { (label) }
            p class={ "font-bold text-xl " (amount_style) }
            {
                (format_currency(amount))
            }
        }
    )
}

#[cfg(test)]
mod cards_tests {
    use crate::dashboard::aggregation::Summary;

    use super::summary_cards;

    #[test]
    fn cards_show_all_three_totals() {
        let summary = Summary {
            total_income: 100.0,
            total_expense: 40.0,
            balance: 60.0,
            ..Default::default()
        };

        let html = summary_cards(&summary).into_string();

        assert!(html.contains("Total Income"));
        assert!(html.contains("$100.00"));
        assert!(html.contains("Total Expense"));
        assert!(html.contains("$40.00"));
        assert!(html.contains("Balance"));
        assert!(html.contains("$60.00"));
    }

    #[test]
    fn cards_show_negative_balance() {
        let summary = Summary {
            total_income: 10.0,
            total_expense: 25.0,
            balance: -15.0,
            ..Default::default()
        };

        let html = summary_cards(&summary).into_string();

        assert!(html.contains("-$15.00"));
    }
}

//! The category breakdown lists rendered beside the doughnut charts.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, percentage_label},
    html::format_currency,
};

/// Render a category breakdown as a small table with amount and share.
///
/// The rows come in canonical category order; the share column is each
/// category's slice of the series total.
pub(super) fn category_breakdown_table(title: &str, breakdown: &[CategoryTotal]) -> Markup {
    let series_total: f64 = breakdown.iter().map(|entry| entry.total).sum();

    html!(
        div class="bg-white dark:bg-gray-800 p-4 rounded shadow-sm"
        {
            h3 class="text-lg font-semibold mb-2" { (title) }

            @if breakdown.is_empty() {
                p class="italic text-gray-500 dark:text-gray-400" { "No data yet." }
            } @else {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    tbody
                    {
                        @for entry in breakdown {
                            tr
                            {
                                td class="py-1" { (entry.category) }
                                td class="py-1 text-right" { (format_currency(entry.total)) }
                                td class="py-1 text-right"
                                {
                                    (percentage_label(entry.total, series_total))
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tables_tests {
    use crate::{category::Category, dashboard::aggregation::CategoryTotal};

    use super::category_breakdown_table;

    #[test]
    fn table_shows_amount_and_percentage_per_category() {
        let breakdown = vec![
            CategoryTotal {
                category: Category::Groceries,
                total: 40.0,
            },
            CategoryTotal {
                category: Category::Utilities,
                total: 60.0,
            },
        ];

        let html = category_breakdown_table("Expense by Category", &breakdown).into_string();

        assert!(html.contains("Groceries"));
        assert!(html.contains("$40.00"));
        assert!(html.contains("40.0%"));
        assert!(html.contains("Utilities"));
        assert!(html.contains("60.0%"));
    }

    #[test]
    fn empty_breakdown_shows_placeholder() {
        let html = category_breakdown_table("Income by Category", &[]).into_string();

        assert!(html.contains("No data yet."));
    }
}

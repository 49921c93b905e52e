//! Chart generation and rendering for the dashboard.
//!
//! This module creates the ECharts visualizations for the summary data:
//! - **Monthly Chart**: grouped bar chart of income vs expense per month
//! - **Category Doughnuts**: one doughnut per transaction type showing the
//!   category breakdown
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, MONTH_LABELS, Summary},
    html::HeadElement,
};

/// The fixed palette assigned to category chart slices.
///
/// Slices take colors in palette order so a category's color only depends on
/// its position in the breakdown, keeping renders stable.
pub(super) const FIXED_COLORS: [&str; 20] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#4a235a", "#1abc9c", "#c0392b", "#7d3c98", "#2471a3", "#2e4053",
    "#117864", "#b9770e", "#239b56", "#a93226",
];

/// The palette offset for the expense doughnut, so the two doughnuts do not
/// start on the same color.
const EXPENSE_PALETTE_OFFSET: usize = 5;

const INCOME_SERIES_COLOR: &str = "#22c55e";
const EXPENSE_SERIES_COLOR: &str = "#ef4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The grouped bar chart of monthly income vs expense.
pub(super) fn monthly_chart(summary: &Summary) -> Chart {
    let labels: Vec<String> = MONTH_LABELS.iter().map(|label| label.to_string()).collect();

    Chart::new()
        .title(Title::new().text("Monthly Income vs Expense"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_SERIES_COLOR))
                .data(summary.monthly.income.to_vec()),
        )
        .series(
            Bar::new()
                .name("Expense")
                .item_style(ItemStyle::new().color(EXPENSE_SERIES_COLOR))
                .data(summary.monthly.expense.to_vec()),
        )
}

/// The doughnut chart of income by category.
pub(super) fn income_doughnut_chart(summary: &Summary) -> Chart {
    doughnut_chart("Income by Category", &summary.income_by_category, 0)
}

/// The doughnut chart of expenses by category.
pub(super) fn expense_doughnut_chart(summary: &Summary) -> Chart {
    doughnut_chart(
        "Expense by Category",
        &summary.expense_by_category,
        EXPENSE_PALETTE_OFFSET,
    )
}

fn doughnut_chart(title: &str, breakdown: &[CategoryTotal], palette_offset: usize) -> Chart {
    let data: Vec<(f64, &'static str)> = breakdown
        .iter()
        .map(|entry| (entry.total, entry.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .color(
            assign_palette_colors(breakdown.len(), palette_offset)
                .into_iter()
                .map(Color::from)
                .collect(),
        )
        .series(
            Pie::new()
                .name(title.to_owned())
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

/// Assign `count` slice colors from [FIXED_COLORS], starting at
/// `palette_offset` and wrapping around the palette.
fn assign_palette_colors(count: usize, palette_offset: usize) -> Vec<&'static str> {
    (0..count)
        .map(|index| FIXED_COLORS[(index + palette_offset) % FIXED_COLORS.len()])
        .collect()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod charts_tests {
    use time::macros::date;

    use crate::{
        dashboard::aggregation::aggregate,
        transaction::{Transaction, TransactionType},
        user::UserID,
    };

    use super::{
        FIXED_COLORS, assign_palette_colors, expense_doughnut_chart, income_doughnut_chart,
        monthly_chart,
    };

    fn test_summary() -> crate::dashboard::aggregation::Summary {
        let transactions = vec![
            Transaction {
                id: 1,
                title: "Payday".to_owned(),
                amount: 100.0,
                description: String::new(),
                date: date!(2024 - 01 - 15),
                category: "Salary / Wages".to_owned(),
                transaction_type: TransactionType::Income,
                user_id: UserID::new(1),
            },
            Transaction {
                id: 2,
                title: "Weekly shop".to_owned(),
                amount: 40.0,
                description: String::new(),
                date: date!(2024 - 01 - 20),
                category: "Groceries".to_owned(),
                transaction_type: TransactionType::Expense,
                user_id: UserID::new(1),
            },
        ];

        aggregate(&transactions)
    }

    #[test]
    fn monthly_chart_contains_both_series_and_all_months() {
        let options = monthly_chart(&test_summary()).to_string();

        assert!(options.contains("Income"));
        assert!(options.contains("Expense"));
        assert!(options.contains("Jan"));
        assert!(options.contains("Dec"));
    }

    #[test]
    fn doughnut_charts_contain_only_active_categories() {
        let summary = test_summary();

        let income_options = income_doughnut_chart(&summary).to_string();
        assert!(income_options.contains("Salary / Wages"));
        assert!(!income_options.contains("Groceries"));

        let expense_options = expense_doughnut_chart(&summary).to_string();
        assert!(expense_options.contains("Groceries"));
        assert!(!expense_options.contains("Salary / Wages"));
    }

    #[test]
    fn palette_assignment_wraps_around() {
        let colors = assign_palette_colors(FIXED_COLORS.len() + 2, 5);

        assert_eq!(colors.len(), FIXED_COLORS.len() + 2);
        assert_eq!(colors[0], FIXED_COLORS[5]);
        assert_eq!(colors[FIXED_COLORS.len()], FIXED_COLORS[5]);
        assert_eq!(colors[1], FIXED_COLORS[6]);
    }
}

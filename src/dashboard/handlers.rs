//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{Summary, aggregate},
        cards::summary_cards,
        charts::{
            DashboardChart, charts_script, charts_view, expense_doughnut_chart,
            income_doughnut_chart, monthly_chart,
        },
        tables::category_breakdown_table,
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    shared_render::render,
    transaction::get_transactions_by_user,
    user::UserID,
};

/// The URL of the ECharts build loaded by the dashboard page.
const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of the signed-in user's data.
///
/// The summary is always derived from a freshly queried transaction list, so
/// it reflects every mutation that happened before this request.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(render(StatusCode::OK, dashboard_no_data_view(nav_bar)));
    }

    let summary = aggregate(&transactions);

    Ok(render(StatusCode::OK, dashboard_view(nav_bar, &summary)))
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                Start by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary tiles, charts and breakdown
/// tables.
fn dashboard_view(nav_bar: NavBar, summary: &Summary) -> Markup {
    let nav_bar = nav_bar.into_html();

    let charts = build_dashboard_charts(summary);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards(summary))

            (charts_view(&charts))

            section id="breakdowns" class="w-full mx-auto mb-8"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    (category_breakdown_table(
                        "Income by Category",
                        &summary.income_by_category,
                    ))
                    (category_breakdown_table(
                        "Expense by Category",
                        &summary.expense_by_category,
                    ))
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

/// Creates the array of dashboard charts from the summary.
///
/// The chart options are serialized to JSON for ECharts consumption. The
/// doughnut charts are only included when their breakdown has data, matching
/// how the tables render a placeholder instead.
fn build_dashboard_charts(summary: &Summary) -> Vec<DashboardChart> {
    let mut charts = vec![DashboardChart {
        id: "monthly-chart",
        options: monthly_chart(summary).to_string(),
    }];

    if !summary.income_by_category.is_empty() {
        charts.push(DashboardChart {
            id: "income-doughnut-chart",
            options: income_doughnut_chart(summary).to_string(),
        });
    }

    if !summary.expense_by_category.is_empty() {
        charts.push(DashboardChart {
            id: "expense-doughnut-chart",
            options: expense_doughnut_chart(summary).to_string(),
        });
    }

    charts
}

//! The transaction form shared by the create and edit pages.

use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    category::Category,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE, link},
    transaction::{NewTransaction, Transaction, TransactionType},
    user::UserID,
};

/// The form data for creating or fully updating a transaction.
///
/// The form layer rejects requests whose amount is not numeric or whose date
/// does not parse as a calendar date, so handlers only ever see well-formed
/// values.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// A short label describing the transaction.
    pub title: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category label chosen from the canonical set.
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
}

impl TransactionForm {
    /// Attach the owning user to the form data.
    pub fn into_new_transaction(self, user_id: UserID) -> NewTransaction {
        NewTransaction {
            title: self.title,
            amount: self.amount,
            description: self.description,
            date: self.date,
            category: self.category,
            transaction_type: self.transaction_type,
            user_id,
        }
    }
}

/// Whether the form creates a new transaction or edits an existing one.
pub enum FormAction {
    /// POST to the create endpoint.
    Create,
    /// PUT to the update endpoint for the given transaction.
    Edit(TransactionId),
}

impl FormAction {
    fn submit_label(&self) -> &'static str {
        match self {
            FormAction::Create => "Add",
            FormAction::Edit(_) => "Update",
        }
    }
}

/// Render the transaction form.
///
/// For [FormAction::Edit] the fields are pre-filled from `transaction`;
/// for [FormAction::Create] the date defaults to `default_date`.
pub fn transaction_form(
    action: FormAction,
    transaction: Option<&Transaction>,
    default_date: Date,
) -> Markup {
    let title = transaction.map(|t| t.title.clone()).unwrap_or_default();
    let amount = transaction
        .map(|t| t.amount.to_string())
        .unwrap_or_default();
    let date = transaction.map(|t| t.date).unwrap_or(default_date);
    let category = transaction
        .map(|t| t.category.clone())
        .unwrap_or_else(|| Category::ALL[0].as_str().to_owned());
    let transaction_type = transaction
        .map(|t| t.transaction_type)
        .unwrap_or(TransactionType::Income);
    let description = transaction
        .map(|t| t.description.clone())
        .unwrap_or_default();

    let submit_label = action.submit_label();
    let (post_action, put_action) = match action {
        FormAction::Create => (Some(endpoints::CREATE_TRANSACTION.to_owned()), None),
        FormAction::Edit(id) => (
            None,
            Some(format_endpoint(endpoints::UPDATE_TRANSACTION, id)),
        ),
    };

    html!(
        form
            hx-post=[post_action]
            hx-put=[put_action]
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            div
            {
                label for="title" class=(FORM_LABEL_STYLE) { "Title" }
                input
                    type="text"
                    name="title"
                    id="title"
                    value=(title)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    value=(amount)
                    min="0"
                    step="0.01"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    value=(date)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_SELECT_STYLE)
                {
                    @for option in Category::ALL {
                        option
                            value=(option.as_str())
                            selected[option.as_str() == category]
                        {
                            (option.as_str())
                        }
                    }
                }
            }

            div
            {
                label for="transaction_type" class=(FORM_LABEL_STYLE) { "Transaction Type" }
                select name="transaction_type" id="transaction_type" class=(FORM_SELECT_STYLE)
                {
                    option
                        value="income"
                        selected[transaction_type == TransactionType::Income]
                    {
                        "Income"
                    }
                    option
                        value="expense"
                        selected[transaction_type == TransactionType::Expense]
                    {
                        "Expense"
                    }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Notes" }
                textarea
                    name="description"
                    id="description"
                    rows="3"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (description)
                }
            }

            div class="flex items-center gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    (submit_label)
                }

                (link(endpoints::TRANSACTIONS_VIEW, "Cancel"))
            }
        }
    )
}

/// A redirect back to the transactions page after a successful mutation.
///
/// Mutations never patch state in place; the redirect forces a full reload
/// so the table and summary are always derived from a freshly queried
/// transaction list.
pub fn redirect_to_transactions() -> (HxRedirect, axum::http::StatusCode) {
    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        axum::http::StatusCode::SEE_OTHER,
    )
}

//! Alert partials for displaying success and error messages to users.
//!
//! Alerts are rendered into the page's fixed alert container via htmx's
//! `hx-target-error` and can be dismissed by the user.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling
pub struct AlertTemplate<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    /// Render the alert as HTML.
    ///
    /// The outer div carries `hx-swap-oob` so endpoints can return an alert
    /// alongside other content and have it land in the alert container.
    pub fn into_html(self) -> Markup {
        let (container_style, accent_style) = match self.alert_type {
            AlertType::Success => (
                "flex items-start gap-3 p-4 mb-4 rounded-lg border
                    text-green-800 border-green-300 bg-green-50
                    dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                "font-semibold",
            ),
            AlertType::Error => (
                "flex items-start gap-3 p-4 mb-4 rounded-lg border
                    text-red-800 border-red-300 bg-red-50
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                "font-semibold",
            ),
        };

        html!(
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    div
                    {
                        p class=(accent_style) { (self.message) }

                        @if !self.details.is_empty() {
                            p class="text-sm" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                            items-center justify-center h-8 w-8 hover:bg-gray-200
                            dark:hover:bg-gray-700"
                        aria-label="Close"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "✕"
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod alert_tests {
    use super::AlertTemplate;

    #[test]
    fn error_alert_contains_message_and_details() {
        let html = AlertTemplate::error("Something went wrong", "Try again later")
            .into_html()
            .into_string();

        assert!(html.contains("Something went wrong"));
        assert!(html.contains("Try again later"));
        assert!(html.contains("role=\"alert\""));
    }

    #[test]
    fn success_alert_omits_empty_details() {
        let html = AlertTemplate::success("Saved", "").into_html().into_string();

        assert!(html.contains("Saved"));
        assert!(!html.contains("text-sm"));
    }
}

//! Card components for headline numbers.

use maud::{Markup, html};

use crate::html::format_currency;

/// Renders a card showing the average transaction amount.
///
/// `None` means there are no transactions, which is shown as a message rather than "$0.00".
pub(super) fn average_card(average: Option<f64>) -> Markup {
    html! {
        div
            id="average-transaction-card"
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md w-full mb-4"
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" {
                "Average Transaction Amount"
            }

            @match average {
                Some(average) => {
                    p class="text-3xl font-bold" { (format_currency(average)) }
                }
                None => {
                    p class="text-xl text-gray-500" { "No transactions yet" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::average_card;

    #[test]
    fn shows_formatted_average() {
        let markup = average_card(Some(435.0)).into_string();

        assert!(markup.contains("$435.00"), "got {markup}");
    }

    #[test]
    fn shows_message_without_transactions() {
        let markup = average_card(None).into_string();

        assert!(markup.contains("No transactions yet"), "got {markup}");
        assert!(!markup.contains("$0.00"), "got {markup}");
    }
}

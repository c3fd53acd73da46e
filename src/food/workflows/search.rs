use log::error;

use super::{FoodScanner, Outcome};
use crate::food::api::search_path;
use crate::food::models::SearchResponse;
use crate::food::state::Workflow;

impl FoodScanner {
    /// Looks `query` up in the food database and replaces the search results.
    ///
    /// A blank query issues nothing and leaves the results alone. A failed request
    /// empties the results; the failure is only logged.
    pub async fn search(&self, query: &str) -> Outcome {
        self.store.set_search_query(query);

        let query = query.trim();
        if query.is_empty() {
            return Outcome::Skipped;
        }

        let ticket = self.store.begin(Workflow::Search);
        let results = match self.get::<SearchResponse>(&search_path(query)).await {
            Ok(response) => response.results,
            Err(e) => {
                error!("Search error: {}", e);
                Vec::new()
            }
        };

        self.finish(ticket, |state| state.search_results = results)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{food, scanner};
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_blank_query_issues_nothing() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::GET,
            &search_path("apple"),
            json!({ "results": [food("Apple", "Fruit")] }),
        );
        scanner.search("apple").await;

        for blank in ["", "   ", "\t\n"] {
            assert_eq!(scanner.search(blank).await, Outcome::Skipped);
        }

        assert_eq!(gateway.calls().len(), 1);
        let state = scanner.state();
        assert_eq!(state.search_results.len(), 1);
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_search_replaces_results() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::GET,
            &search_path("pizza"),
            json!({ "results": [food("Pizza", "Fast Food"), food("Pizza Rolls", "Snack")] }),
        );

        assert_eq!(scanner.search("pizza").await, Outcome::Applied);

        let state = scanner.state();
        assert_eq!(state.search_results.len(), 2);
        assert_eq!(state.search_results[1].name, "Pizza Rolls");
        assert_eq!(state.search_query, "pizza");
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_query_is_trimmed_and_encoded() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::GET,
            "/food/search?query=ice%20cream",
            json!({ "results": [] }),
        );

        scanner.search("  ice cream ").await;

        let calls = gateway.calls();
        assert_eq!(calls[0].path, "/food/search?query=ice%20cream");
    }

    #[tokio::test]
    async fn test_failure_clears_results() {
        let (scanner, gateway) = scanner();
        gateway.on(
            Method::GET,
            &search_path("apple"),
            json!({ "results": [food("Apple", "Fruit")] }),
        );
        gateway.fail(Method::GET, &search_path("kale"), 500);

        scanner.search("apple").await;
        assert_eq!(scanner.search("kale").await, Outcome::Applied);

        let state = scanner.state();
        assert!(state.search_results.is_empty());
        assert!(!state.loading());
    }
}
